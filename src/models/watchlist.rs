//! Watchlist models and query parameters.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::ListingId;

/// Query parameters for the watchlist endpoint.
///
/// # Example
///
/// ```
/// use trademe_rs::WatchlistQuery;
///
/// let query = WatchlistQuery::default().with_rows(25).with_category("0350-");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct WatchlistQuery {
    /// Page number, starting at 1
    pub page: u32,
    /// Rows per page
    pub rows: u32,
    /// Optional category filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Default for WatchlistQuery {
    fn default() -> Self {
        Self {
            page: 1,
            rows: 50,
            category: None,
        }
    }
}

impl WatchlistQuery {
    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Set the number of rows per page.
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Restrict results to a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// One page of the member's watchlist, as returned by
/// `GET /v1/mytrademe/watchlist/{filter}.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WatchlistPage {
    /// Total number of watched items matching the filter
    #[serde(default)]
    pub total_count: Option<u32>,
    /// Current page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size used
    #[serde(default)]
    pub page_size: Option<u32>,
    /// The watched items on this page
    #[serde(default)]
    pub list: Vec<WatchlistItem>,
}

/// A single watched listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WatchlistItem {
    /// Listing ID
    pub listing_id: ListingId,
    /// Listing title
    #[serde(default)]
    pub title: Option<String>,
    /// Category path identifier
    #[serde(default)]
    pub category: Option<String>,
    /// Current price in NZD
    #[serde(default)]
    pub price_display: Option<String>,
    /// Auction start price in NZD
    #[serde(default)]
    pub start_price: Option<f64>,
    /// Number of bids placed
    #[serde(default)]
    pub bid_count: Option<u32>,
    /// Whether the listing has closed
    #[serde(default)]
    pub is_closed: Option<bool>,
    /// Fields this PoC does not model explicitly
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}
