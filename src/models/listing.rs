//! Listing detail models.
//!
//! The Trade Me API serializes with PascalCase keys. Monetary amounts are
//! decimal dollar values; the API sends them as JSON numbers so `f64` is
//! used here, matching the precision the endpoint itself provides.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::ListingId;

/// Full detail for a single listing, as returned by
/// `GET /v1/listings/{id}.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedItemDetail {
    /// Listing ID
    pub listing_id: ListingId,
    /// Listing title
    pub title: String,
    /// Category path identifier (e.g. "0350-5748-")
    #[serde(default)]
    pub category: Option<String>,
    /// Human-readable category path
    #[serde(default)]
    pub category_path: Option<String>,
    /// Auction start price in NZD
    #[serde(default)]
    pub start_price: Option<f64>,
    /// Buy Now price in NZD, when offered
    #[serde(default)]
    pub buy_now_price: Option<f64>,
    /// Current highest bid amount in NZD
    #[serde(default)]
    pub max_bid_amount: Option<f64>,
    /// Number of bids placed
    #[serde(default)]
    pub bid_count: Option<u32>,
    /// Seller-provided body text
    #[serde(default)]
    pub body: Option<String>,
    /// Whether the reserve price has been met
    #[serde(default)]
    pub has_reserve_been_met: Option<bool>,
    /// Whether the listing has closed
    #[serde(default)]
    pub is_closed: Option<bool>,
    /// Region the item is located in
    #[serde(default)]
    pub region: Option<String>,
    /// Suburb the item is located in
    #[serde(default)]
    pub suburb: Option<String>,
    /// Listing start date (Trade Me's `/Date(ms)/` format, kept opaque)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Listing end date (kept opaque)
    #[serde(default)]
    pub end_date: Option<String>,
    /// The seller
    #[serde(default)]
    pub member: Option<ListingMember>,
    /// Listing photos
    #[serde(default)]
    pub photos: Option<Vec<ListingPhoto>>,
    /// Category-specific attributes
    #[serde(default)]
    pub attributes: Option<Vec<ListingAttribute>>,
    /// Fields this PoC does not model explicitly
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// The member who created a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListingMember {
    /// Member ID
    #[serde(default)]
    pub member_id: Option<u64>,
    /// Public nickname
    #[serde(default)]
    pub nickname: Option<String>,
    /// Positive feedback count
    #[serde(default)]
    pub feedback_count: Option<i64>,
    /// Whether the member's address has been verified
    #[serde(default)]
    pub is_address_verified: Option<bool>,
}

/// A photo attached to a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListingPhoto {
    /// Photo key
    #[serde(default)]
    pub key: Option<u64>,
    /// URLs at the available sizes
    #[serde(default)]
    pub value: Option<PhotoUrls>,
}

/// Photo URLs at the sizes the API provides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhotoUrls {
    /// Thumbnail size
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Gallery size
    #[serde(default)]
    pub gallery: Option<String>,
    /// Full size
    #[serde(default)]
    pub full_size: Option<String>,
}

/// A category-specific attribute on a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListingAttribute {
    /// Attribute name
    #[serde(default)]
    pub name: Option<String>,
    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Attribute value
    #[serde(default)]
    pub value: Option<String>,
}
