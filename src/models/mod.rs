//! Data models for the Trade Me API.
//!
//! This module contains the environment configuration, strongly-typed
//! identifiers, and response models for the endpoints this crate covers.

mod environment;
mod listing;
mod primitives;
mod watchlist;

pub use environment::{Environment, DEFAULT_ENVIRONMENT};
pub use listing::{ListedItemDetail, ListingAttribute, ListingMember, ListingPhoto, PhotoUrls};
pub use primitives::{ListingId, WatchlistFilter};
pub use watchlist::{WatchlistItem, WatchlistPage, WatchlistQuery};
