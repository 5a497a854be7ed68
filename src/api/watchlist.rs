//! Watchlist service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{WatchlistFilter, WatchlistPage, WatchlistQuery};
use crate::Result;

/// Service for the authenticated member's watchlist.
///
/// # Example
///
/// ```no_run
/// use trademe_rs::{WatchlistFilter, WatchlistQuery};
/// # async fn example(client: trademe_rs::TrademeClient) -> trademe_rs::Result<()> {
/// let page = client
///     .watchlist()
///     .list(WatchlistFilter::ClosingToday, &WatchlistQuery::default().with_rows(25))
///     .await?;
/// for item in &page.list {
///     println!("{}: {:?}", item.listing_id, item.title);
/// }
/// # Ok(())
/// # }
/// ```
pub struct WatchlistService {
    inner: Arc<ClientInner>,
}

impl WatchlistService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get one page of the member's watchlist.
    pub async fn list(
        &self,
        filter: WatchlistFilter,
        query: &WatchlistQuery,
    ) -> Result<WatchlistPage> {
        self.inner
            .get_with_query(&format!("/v1/mytrademe/watchlist/{filter}.json"), query)
            .await
    }
}
