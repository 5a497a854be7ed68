//! Authentication for the Trade Me API.
//!
//! Trade Me uses OAuth 1.0a with non-expiring access tokens. This module
//! provides:
//!
//! - [`LoginFlow`] — the interactive three-legged authorization dance,
//!   with verifier capture via a loopback [`CallbackListener`] or manual
//!   PIN entry.
//! - [`CredentialStore`] — JSON persistence of the resulting
//!   [`Credentials`] in the platform config directory.
//! - [`resolve_credentials`] — the precedence chain (stored file →
//!   environment variables → interactive login).
//!
//! # Example
//!
//! ```no_run
//! use trademe_rs::auth::{resolve_credentials, ResolveOptions};
//!
//! # async fn example() -> trademe_rs::Result<()> {
//! let credentials = resolve_credentials(ResolveOptions::new()).await?;
//! # Ok(())
//! # }
//! ```

mod callback;
mod credentials;
mod flow;
pub(crate) mod oauth1;
mod resolver;

pub use callback::{CallbackListener, DEFAULT_CALLBACK_PORT, DEFAULT_CALLBACK_TIMEOUT};
pub use credentials::{CredentialStore, Credentials, CRED_FILE_ENV};
pub use flow::{
    BrowserLauncher, LoginFlow, SystemBrowser, TerminalInteraction, UserInteraction,
    DEFAULT_SCOPE,
};
pub use resolver::{
    resolve_credentials, ResolveOptions, ACCESS_SECRET_ENV, ACCESS_TOKEN_ENV,
    CONSUMER_KEY_ENV, CONSUMER_SECRET_ENV,
};
