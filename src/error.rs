//! Error types for the Trade Me API client.
//!
//! A single `thiserror` enum covers configuration problems, OAuth flow
//! failures, credential storage issues, and API response errors.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Trade Me operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Trade Me API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem I/O failed (credential store).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error.
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error, e.g. an unknown environment name.
    #[error("Configuration error: {0}")]
    Config(String),

    /// OAuth 1.0a request or response failure: a non-success status from a
    /// token endpoint, or a token response missing required fields.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The stored credentials file exists but is unparsable or incomplete.
    #[error("Corrupt credentials file: {0}")]
    CorruptCredentials(String),

    /// No usable credentials could be resolved non-interactively.
    #[error(
        "No credentials found. Run `trademe-login` or call LoginFlow::run() interactively."
    )]
    AuthenticationRequired,

    /// API returned an error response.
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// Resource not found (404).
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::Authentication(_) | Error::AuthenticationRequired
        )
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (bad configuration, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::Config(_) | Error::CorruptCredentials(_) | Error::NotFound(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a non-success response body.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = body
            .get("ErrorDescription")
            .or_else(|| body.get("Error"))
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        Error::Api {
            status,
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_auth() {
        assert!(Error::Authentication("failed".into()).is_auth_error());
        assert!(Error::AuthenticationRequired.is_auth_error());
        assert!(!Error::Config("bad".into()).is_auth_error());
    }

    #[test]
    fn test_error_client_server() {
        assert!(Error::Config("bad env".into()).is_client_error());
        assert!(Error::NotFound("listing".into()).is_client_error());

        let server = Error::from_api_response(503, serde_json::json!({}));
        assert!(server.is_server_error());
        assert!(!server.is_client_error());
    }

    #[test]
    fn test_from_api_response() {
        let body = serde_json::json!({
            "ErrorDescription": "Listing not available"
        });

        let err = Error::from_api_response(400, body);
        match err {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Listing not available");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_authentication_required_names_remediation() {
        let msg = Error::AuthenticationRequired.to_string();
        assert!(msg.contains("trademe-login"));
    }
}
