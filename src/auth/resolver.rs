//! Credential resolution precedence chain.
//!
//! Stored file → environment variables → interactive login → error.

use std::io::IsTerminal;

use crate::auth::credentials::{CredentialStore, Credentials};
use crate::auth::flow::{LoginFlow, TerminalInteraction, UserInteraction};
use crate::models::Environment;
use crate::{Error, Result};

/// Env var holding the consumer key.
pub const CONSUMER_KEY_ENV: &str = "TM_CONSUMER_KEY";
/// Env var holding the consumer secret.
pub const CONSUMER_SECRET_ENV: &str = "TM_CONSUMER_SECRET";
/// Env var holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "TM_ACCESS_TOKEN";
/// Env var holding the access token secret.
pub const ACCESS_SECRET_ENV: &str = "TM_ACCESS_SECRET";

/// Options for [`resolve_credentials`].
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Consumer key, when the caller already has one.
    pub consumer_key: Option<String>,
    /// Consumer secret, when the caller already has one.
    pub consumer_secret: Option<String>,
    /// Whether an interactive login may be started as a last resort.
    pub auto_login: bool,
    /// Environment used for an interactive login.
    pub environment: Environment,
    /// Store consulted first (and written by an interactive login);
    /// `None` means the default location.
    pub store: Option<CredentialStore>,
}

impl ResolveOptions {
    /// Options with everything defaulted: no explicit consumer
    /// credentials, no auto-login, sandbox environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the consumer key.
    pub fn consumer_key(mut self, key: impl Into<String>) -> Self {
        self.consumer_key = Some(key.into());
        self
    }

    /// Supply the consumer secret.
    pub fn consumer_secret(mut self, secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(secret.into());
        self
    }

    /// Allow an interactive login when nothing else resolves.
    pub fn auto_login(mut self, allow: bool) -> Self {
        self.auto_login = allow;
        self
    }

    /// Environment for an interactive login.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Use a non-default credential store.
    pub fn store(mut self, store: CredentialStore) -> Self {
        self.store = Some(store);
        self
    }
}

/// Resolve a usable credential set, first match wins:
///
/// 1. A well-formed record in the credential store is returned unchanged
///    (no validation against the live API; a corrupt file is an error, not
///    a fallthrough).
/// 2. Consumer key/secret from the options or `TM_CONSUMER_KEY` /
///    `TM_CONSUMER_SECRET`, plus `TM_ACCESS_TOKEN` / `TM_ACCESS_SECRET`:
///    when all four are present they are returned directly, without
///    writing the store.
/// 3. With `auto_login` set and stdin attached to a terminal, any missing
///    consumer key/secret is prompted for and a PIN-entry [`LoginFlow`]
///    runs (which does persist its result).
/// 4. Otherwise [`Error::AuthenticationRequired`].
pub async fn resolve_credentials(options: ResolveOptions) -> Result<Credentials> {
    let store = options
        .store
        .unwrap_or_else(CredentialStore::at_default_location);

    if let Some(credentials) = store.load()? {
        tracing::debug!(path = %store.path().display(), "using stored credentials");
        return Ok(credentials);
    }

    let consumer_key = options
        .consumer_key
        .or_else(|| env_var(CONSUMER_KEY_ENV));
    let consumer_secret = options
        .consumer_secret
        .or_else(|| env_var(CONSUMER_SECRET_ENV));
    let access_token = env_var(ACCESS_TOKEN_ENV);
    let access_secret = env_var(ACCESS_SECRET_ENV);

    if let (Some(ck), Some(cs), Some(at), Some(ats)) = (
        consumer_key.as_deref(),
        consumer_secret.as_deref(),
        access_token.as_deref(),
        access_secret.as_deref(),
    ) {
        tracing::debug!("using credentials from environment variables");
        return Ok(Credentials::new(ck, cs, at, ats));
    }

    if options.auto_login && std::io::stdin().is_terminal() {
        let interaction = TerminalInteraction;
        let ck = match consumer_key {
            Some(ck) => ck,
            None => interaction.prompt("Consumer key")?,
        };
        let cs = match consumer_secret {
            Some(cs) => cs,
            None => interaction.prompt("Consumer secret")?,
        };
        return LoginFlow::new(ck, cs)
            .environment(options.environment)
            .prefer_local_callback(false)
            .credential_store(store)
            .run()
            .await;
    }

    Err(Error::AuthenticationRequired)
}

/// Non-empty environment variable lookup.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
