//! HTTP client and service layer for the Trade Me API.
//!
//! This module provides the main entry point [`TrademeClient`] for making
//! authenticated calls.
//!
//! # Example
//!
//! ```no_run
//! use trademe_rs::{TrademeClient, Environment, Credentials};
//!
//! # async fn example() -> trademe_rs::Result<()> {
//! let client = TrademeClient::new(
//!     Credentials::new("ck", "cs", "at", "ats"),
//!     Environment::sandbox(),
//! )?;
//!
//! let watchlist = client.watchlist().list(Default::default(), &Default::default()).await?;
//! println!("{} watched items", watchlist.list.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::ClientConfig;
pub use http::TrademeClient;
pub(crate) use http::ClientInner;
