//! The three-legged OAuth 1.0a login flow.
//!
//! Request token → user authorization in the browser → verifier capture →
//! access token. Any failure aborts the flow; nothing is retried.

use std::io::Write;
use std::time::Duration;

use crate::auth::callback::{
    CallbackListener, DEFAULT_CALLBACK_PORT, DEFAULT_CALLBACK_TIMEOUT,
};
use crate::auth::credentials::{CredentialStore, Credentials};
use crate::auth::oauth1::{self, TokenPair, OOB_CALLBACK};
use crate::models::Environment;
use crate::{Error, Result};

/// Scope requested when none is specified.
pub const DEFAULT_SCOPE: &str = "MyTradeMeRead,MyTradeMeWrite";

/// How the login flow talks to the user.
///
/// Separated from the orchestration so the flow is testable without a real
/// terminal.
pub trait UserInteraction {
    /// Ask the user a question and return their (trimmed) answer.
    fn prompt(&self, message: &str) -> Result<String>;

    /// Print a progress message.
    fn notify(&self, message: &str);
}

/// Prompts on stdout, reads answers from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalInteraction;

impl UserInteraction for TerminalInteraction {
    fn prompt(&self, message: &str) -> Result<String> {
        print!("{message}: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// Opens the authorization URL for the user.
pub trait BrowserLauncher {
    /// Try to open `url`; returns whether it worked. Failures are never
    /// fatal because the URL is also printed for manual use.
    fn open(&self, url: &str) -> bool;
}

/// Launches the platform default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> bool {
        webbrowser::open(url).is_ok()
    }
}

/// Guides the user through OAuth 1.0a and returns (and saves) the
/// resulting access token pair.
///
/// # Example
///
/// ```no_run
/// use trademe_rs::auth::LoginFlow;
/// use trademe_rs::Environment;
///
/// # async fn example() -> trademe_rs::Result<()> {
/// let credentials = LoginFlow::new("consumer-key", "consumer-secret")
///     .environment(Environment::sandbox())
///     .prefer_local_callback(false) // PIN entry instead of the listener
///     .run()
///     .await?;
/// println!("access token: {}", credentials.access_token);
/// # Ok(())
/// # }
/// ```
pub struct LoginFlow {
    consumer_key: String,
    consumer_secret: String,
    environment: Environment,
    scope: String,
    prefer_local_callback: bool,
    callback_port: u16,
    callback_timeout: Duration,
    store: CredentialStore,
    interaction: Box<dyn UserInteraction + Send + Sync>,
    browser: Box<dyn BrowserLauncher + Send + Sync>,
}

impl LoginFlow {
    /// Create a flow for the given consumer credentials, with sandbox
    /// environment, local-callback capture, and the default store location.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            environment: Environment::default(),
            scope: DEFAULT_SCOPE.to_string(),
            prefer_local_callback: true,
            callback_port: DEFAULT_CALLBACK_PORT,
            callback_timeout: DEFAULT_CALLBACK_TIMEOUT,
            store: CredentialStore::at_default_location(),
            interaction: Box::new(TerminalInteraction),
            browser: Box::new(SystemBrowser),
        }
    }

    /// Set the target environment.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the requested permission scope.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Capture the verifier via the loopback listener (`true`, default) or
    /// via manual PIN entry (`false`).
    pub fn prefer_local_callback(mut self, prefer: bool) -> Self {
        self.prefer_local_callback = prefer;
        self
    }

    /// Override the loopback callback port.
    pub fn callback_port(mut self, port: u16) -> Self {
        self.callback_port = port;
        self
    }

    /// Override how long to wait for the browser redirect.
    pub fn callback_timeout(mut self, timeout: Duration) -> Self {
        self.callback_timeout = timeout;
        self
    }

    /// Persist the result somewhere other than the default location.
    pub fn credential_store(mut self, store: CredentialStore) -> Self {
        self.store = store;
        self
    }

    /// Replace the terminal prompts (used by tests and embedders).
    pub fn interaction(
        mut self,
        interaction: impl UserInteraction + Send + Sync + 'static,
    ) -> Self {
        self.interaction = Box::new(interaction);
        self
    }

    /// Replace the browser launcher (used by tests and embedders).
    pub fn browser(mut self, browser: impl BrowserLauncher + Send + Sync + 'static) -> Self {
        self.browser = Box::new(browser);
        self
    }

    /// Run the flow to completion.
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] when either token endpoint returns a
    /// non-success status or a response missing the token fields. Storage
    /// failures surface as [`Error::Io`].
    pub async fn run(self) -> Result<Credentials> {
        let http = reqwest::Client::new();

        // Bind before the request-token step so a port conflict surfaces
        // before the browser opens.
        let listener = if self.prefer_local_callback {
            Some(CallbackListener::bind(self.callback_port).await?)
        } else {
            None
        };
        let callback_uri = match &listener {
            Some(listener) => CallbackListener::redirect_uri(listener.port()),
            None => OOB_CALLBACK.to_string(),
        };

        let request_token = self.fetch_request_token(&http, &callback_uri).await?;
        tracing::debug!(token = %request_token.token, "request token acquired");

        let auth_url = format!(
            "{}?oauth_token={}",
            self.environment.authorize_url(),
            oauth1::percent_encode(&request_token.token)
        );
        self.interaction.notify("Opening browser for authorization...");
        if !self.browser.open(&auth_url) {
            self.interaction.notify("Could not open a browser automatically.");
        }
        self.interaction
            .notify(&format!("Authorize this application at: {auth_url}"));

        let verifier = self.obtain_verifier(listener).await?;

        let access_token = self
            .fetch_access_token(&http, &request_token, &verifier)
            .await?;

        let credentials = Credentials::new(
            self.consumer_key.clone(),
            self.consumer_secret.clone(),
            access_token.token,
            access_token.secret,
        );
        self.store.save(&credentials)?;
        self.interaction.notify(&format!(
            "Saved credentials to: {}",
            self.store.path().display()
        ));
        Ok(credentials)
    }

    async fn fetch_request_token(
        &self,
        http: &reqwest::Client,
        callback_uri: &str,
    ) -> Result<TokenPair> {
        let header = oauth1::consumer_header(
            &self.consumer_key,
            &self.consumer_secret,
            &[("oauth_callback", callback_uri)],
        );

        let response = http
            .post(self.environment.request_token_url())
            .header(reqwest::header::AUTHORIZATION, header)
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await?;

        Self::token_response(response, "request token").await
    }

    async fn fetch_access_token(
        &self,
        http: &reqwest::Client,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<TokenPair> {
        let header = oauth1::token_header(
            &self.consumer_key,
            &self.consumer_secret,
            request_token,
            &[("oauth_verifier", verifier)],
        );

        let response = http
            .post(self.environment.access_token_url())
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await?;

        Self::token_response(response, "access token").await
    }

    async fn token_response(response: reqwest::Response, step: &str) -> Result<TokenPair> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::Authentication(format!(
                "{step} request failed ({status}): {body}"
            )));
        }
        oauth1::parse_token_response(&body)
    }

    async fn obtain_verifier(&self, listener: Option<CallbackListener>) -> Result<String> {
        match listener {
            Some(listener) => {
                self.interaction.notify(&format!(
                    "Waiting for authorization (capturing callback on 127.0.0.1:{})...",
                    listener.port()
                ));
                match listener.capture(self.callback_timeout).await? {
                    Some(verifier) => Ok(verifier),
                    // Redirect never arrived; fall back to manual entry.
                    None => self.interaction.prompt("Paste the oauth_verifier"),
                }
            }
            None => self
                .interaction
                .prompt("Enter the PIN / oauth_verifier from the browser"),
        }
    }
}

impl std::fmt::Debug for LoginFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFlow")
            .field("environment", &self.environment)
            .field("scope", &self.scope)
            .field("prefer_local_callback", &self.prefer_local_callback)
            .field("callback_port", &self.callback_port)
            .finish()
    }
}
