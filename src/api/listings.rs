//! Listings service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{ListedItemDetail, ListingId};
use crate::Result;

/// Service for listing detail lookups.
///
/// # Example
///
/// ```no_run
/// use trademe_rs::ListingId;
/// # async fn example(client: trademe_rs::TrademeClient) -> trademe_rs::Result<()> {
/// let listing = client.listings().get(ListingId::new(2149713186)).await?;
/// println!("{}: {:?} bids", listing.title, listing.bid_count);
/// # Ok(())
/// # }
/// ```
pub struct ListingsService {
    inner: Arc<ClientInner>,
}

impl ListingsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Get the full detail for a listing.
    pub async fn get(&self, id: ListingId) -> Result<ListedItemDetail> {
        self.inner.get(&format!("/v1/listings/{id}.json")).await
    }
}
