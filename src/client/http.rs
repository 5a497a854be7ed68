//! HTTP client implementation for the Trade Me API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::api::{ListingsService, WatchlistService};
use crate::auth::oauth1::{self, TokenPair};
use crate::auth::{resolve_credentials, Credentials, ResolveOptions};
use crate::models::Environment;
use crate::{Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the Trade Me API.
///
/// Every request is signed with a fresh OAuth 1.0a PLAINTEXT header built
/// from the consumer and access token credentials. API surface is exposed
/// through service structs.
///
/// # Example
///
/// ```no_run
/// use trademe_rs::{TrademeClient, Environment, ListingId};
///
/// # async fn example() -> trademe_rs::Result<()> {
/// let client = TrademeClient::resolve(Default::default()).await?;
///
/// let listing = client.listings().get(ListingId::new(2149713186)).await?;
/// println!("{}", listing.title);
/// # Ok(())
/// # }
/// ```
pub struct TrademeClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) credentials: Credentials,
    pub(crate) environment: Environment,
    #[allow(dead_code)]
    pub(crate) config: ClientConfig,
}

impl TrademeClient {
    /// Create a client from an existing credential set.
    pub fn new(credentials: Credentials, environment: Environment) -> Result<Self> {
        Self::with_config(credentials, environment, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        credentials: Credentials,
        environment: Environment,
        config: ClientConfig,
    ) -> Result<Self> {
        if !credentials.is_complete() {
            return Err(Error::Config(
                "credentials must have all four values set".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                credentials,
                environment,
                config,
            }),
        })
    }

    /// Create a client by running the credential resolution chain
    /// (stored file → env vars → optional interactive login).
    pub async fn resolve(options: ResolveOptions) -> Result<Self> {
        let environment = options.environment.clone();
        let credentials = resolve_credentials(options).await?;
        Self::new(credentials, environment)
    }

    /// Get the listings service.
    pub fn listings(&self) -> ListingsService {
        ListingsService::new(self.inner.clone())
    }

    /// Get the watchlist service.
    pub fn watchlist(&self) -> WatchlistService {
        WatchlistService::new(self.inner.clone())
    }

    /// The environment this client talks to.
    pub fn environment(&self) -> &Environment {
        &self.inner.environment
    }
}

impl ClientInner {
    /// Sign a request with a freshly built OAuth header.
    fn auth_header(&self) -> String {
        let token = TokenPair {
            token: self.credentials.access_token.clone(),
            secret: self.credentials.access_token_secret.clone(),
        };
        oauth1::token_header(
            &self.credentials.consumer_key,
            &self.credentials.consumer_secret,
            &token,
            &[],
        )
    }

    /// Make an authenticated GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.environment.api_base(), path);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Make an authenticated GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let url = format!("{}{}", self.environment.api_base(), path);
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.auth_header())
            .query(query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let status_code = status.as_u16();
        let body: serde_json::Value = response.json().await.unwrap_or_default();

        if status_code == 401 {
            return Err(Error::Authentication(format!(
                "request rejected (401): {body}"
            )));
        }

        if status_code == 404 {
            let message = body
                .get("ErrorDescription")
                .and_then(|m| m.as_str())
                .unwrap_or("Resource not found")
                .to_string();
            return Err(Error::NotFound(message));
        }

        Err(Error::from_api_response(status_code, body))
    }
}

impl Clone for TrademeClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TrademeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrademeClient")
            .field("environment", &self.inner.environment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_incomplete_credentials() {
        let err = TrademeClient::new(
            Credentials::new("ck", "cs", "", ""),
            Environment::sandbox(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_client_construction() {
        let client = TrademeClient::new(
            Credentials::new("ck", "cs", "at", "ats"),
            Environment::sandbox(),
        )
        .unwrap();
        assert_eq!(client.environment(), &Environment::sandbox());
    }
}
