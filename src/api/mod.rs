//! API service modules for Trade Me endpoints.
//!
//! Each service provides methods for a specific subset of the API. This
//! PoC covers listing detail and the member's watchlist.

mod listings;
mod watchlist;

pub use listings::ListingsService;
pub use watchlist::WatchlistService;
