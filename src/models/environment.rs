//! Environment configuration for the Trade Me API.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Name of the environment used when none is specified.
pub const DEFAULT_ENVIRONMENT: &str = "sandbox";

/// A Trade Me API deployment: base URLs for the REST API and the
/// user-facing OAuth site.
///
/// Two deployments are registered by name: `"sandbox"` and `"production"`.
/// The OAuth endpoint URLs are derived from the bases by fixed suffixes.
///
/// # Example
///
/// ```
/// use trademe_rs::Environment;
///
/// let env = Environment::resolve("sandbox").unwrap();
/// assert_eq!(
///     env.request_token_url(),
///     "https://api.tmsandbox.co.nz/Oauth/RequestToken"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Environment {
    api_base: String,
    oauth_base: String,
}

impl Environment {
    /// The sandbox environment (test listings, fake money).
    pub fn sandbox() -> Self {
        Self {
            api_base: "https://api.tmsandbox.co.nz".to_string(),
            oauth_base: "https://www.tmsandbox.co.nz".to_string(),
        }
    }

    /// The production environment.
    pub fn production() -> Self {
        Self {
            api_base: "https://api.trademe.co.nz".to_string(),
            oauth_base: "https://www.trademe.co.nz".to_string(),
        }
    }

    /// An environment with caller-supplied base URLs.
    ///
    /// Useful for pointing the client at a proxy or a mock server.
    pub fn custom(api_base: impl Into<String>, oauth_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            oauth_base: oauth_base.into(),
        }
    }

    /// Look up a registered environment by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `name` is not registered; the message
    /// lists the valid names.
    pub fn resolve(name: &str) -> Result<Self> {
        match name {
            "sandbox" => Ok(Self::sandbox()),
            "production" => Ok(Self::production()),
            other => Err(Error::Config(format!(
                "Unknown environment '{other}'. Available: sandbox, production"
            ))),
        }
    }

    /// Base URL for REST API requests.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Base URL of the user-facing OAuth site.
    pub fn oauth_base(&self) -> &str {
        &self.oauth_base
    }

    /// Endpoint for acquiring a temporary request token.
    pub fn request_token_url(&self) -> String {
        format!("{}/Oauth/RequestToken", self.api_base)
    }

    /// Endpoint for exchanging a verifier for an access token.
    pub fn access_token_url(&self) -> String {
        format!("{}/Oauth/AccessToken", self.api_base)
    }

    /// Browser-navigated page where the user authorizes the request token.
    pub fn authorize_url(&self) -> String {
        format!("{}/Oauth/Authorize", self.oauth_base)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::sandbox()
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_base)
    }
}
