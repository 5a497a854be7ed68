//! Primitive types and newtypes for type-safe API interactions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed Trade Me listing ID.
///
/// # Example
///
/// ```
/// use trademe_rs::ListingId;
///
/// let id = ListingId::new(2149713186);
/// assert_eq!(id.to_string(), "2149713186");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(u64);

impl ListingId {
    /// Create a new listing ID.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ListingId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Filter applied to the authenticated watchlist endpoint.
///
/// Maps to the `{filter}` path segment of
/// `/v1/mytrademe/watchlist/{filter}.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WatchlistFilter {
    /// All watched items.
    #[default]
    All,
    /// Items closing today.
    ClosingToday,
    /// Items where the user holds the leading bid.
    LeadingBids,
    /// Items whose reserve has been met.
    ReserveMet,
    /// Items whose reserve has not been met.
    ReserveNotMet,
}

impl WatchlistFilter {
    /// The path segment used in the request URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            WatchlistFilter::All => "All",
            WatchlistFilter::ClosingToday => "ClosingToday",
            WatchlistFilter::LeadingBids => "LeadingBids",
            WatchlistFilter::ReserveMet => "ReserveMet",
            WatchlistFilter::ReserveNotMet => "ReserveNotMet",
        }
    }
}

impl fmt::Display for WatchlistFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
