//! # trademe-rs
//!
//! A Rust client for the Trade Me marketplace API.
//!
//! This crate covers OAuth 1.0a three-legged login with credential
//! persistence, plus typed access to a small set of authenticated read
//! endpoints.
//!
//! ## Features
//!
//! - **OAuth 1.0a login**: request token → browser authorization →
//!   verifier capture (loopback callback listener or manual PIN) → access
//!   token, using the PLAINTEXT signature method over HTTPS
//! - **Credential persistence**: tokens saved to the platform config
//!   directory with owner-only file permissions
//! - **Credential resolution**: stored file, environment variables, or an
//!   interactive login, in that order
//! - **Typed endpoints**: listing detail and the member's watchlist
//!
//! Trade Me access tokens do not expire, so there is no refresh machinery.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trademe_rs::{TrademeClient, ListingId};
//! use trademe_rs::auth::ResolveOptions;
//!
//! #[tokio::main]
//! async fn main() -> trademe_rs::Result<()> {
//!     // Stored file → TM_* env vars → error with remediation
//!     let client = TrademeClient::resolve(ResolveOptions::new()).await?;
//!
//!     let listing = client.listings().get(ListingId::new(2149713186)).await?;
//!     println!("{}: {:?} bids", listing.title, listing.bid_count);
//!
//!     let watchlist = client
//!         .watchlist()
//!         .list(Default::default(), &Default::default())
//!         .await?;
//!     println!("watching {} items", watchlist.list.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Interactive login
//!
//! ```rust,no_run
//! use trademe_rs::auth::LoginFlow;
//! use trademe_rs::Environment;
//!
//! #[tokio::main]
//! async fn main() -> trademe_rs::Result<()> {
//!     let credentials = LoginFlow::new("consumer-key", "consumer-secret")
//!         .environment(Environment::sandbox())
//!         .run()
//!         .await?;
//!     println!("access token: {}", credentials.access_token);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{CredentialStore, Credentials, LoginFlow};
pub use client::{ClientConfig, TrademeClient};
pub use error::{Error, Result};
pub use models::{
    Environment, ListedItemDetail, ListingId, WatchlistFilter, WatchlistPage, WatchlistQuery,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use trademe_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{
        resolve_credentials, CredentialStore, Credentials, LoginFlow, ResolveOptions,
    };
    pub use crate::client::{ClientConfig, TrademeClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Environment, ListedItemDetail, ListingId, WatchlistFilter, WatchlistItem,
        WatchlistPage, WatchlistQuery,
    };
}
