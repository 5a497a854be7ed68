//! Credential types and on-disk persistence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Environment variable overriding the credential file location.
pub const CRED_FILE_ENV: &str = "TM_CRED_FILE";

const CRED_SUBDIR: &str = "trademe-sdk";
const CRED_FILE: &str = "credentials.json";

/// A complete OAuth 1.0a credential set for the Trade Me API.
///
/// All four values are required to sign API requests. The Trade Me access
/// token pair does not expire, so there is no refresh machinery.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application consumer key
    pub consumer_key: String,
    /// Application consumer secret
    pub consumer_secret: String,
    /// Member access token
    pub access_token: String,
    /// Member access token secret
    pub access_token_secret: String,
}

impl Credentials {
    /// Create a credential set from its four parts.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
        }
    }

    /// Returns `true` when all four values are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.consumer_key.is_empty()
            && !self.consumer_secret.is_empty()
            && !self.access_token.is_empty()
            && !self.access_token_secret.is_empty()
    }
}

// Secrets stay out of logs and panics.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

/// Persists a [`Credentials`] record as a single JSON file.
///
/// # Example
///
/// ```no_run
/// use trademe_rs::auth::CredentialStore;
///
/// let store = CredentialStore::at_default_location();
/// if let Some(creds) = store.load()? {
///     println!("logged in as consumer {}", creds.consumer_key);
/// }
/// # Ok::<(), trademe_rs::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// A store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at the platform-conventional location.
    pub fn at_default_location() -> Self {
        Self::new(Self::default_location())
    }

    /// Compute the default credential file path.
    ///
    /// `TM_CRED_FILE` wins when set; otherwise the platform config
    /// directory (`%APPDATA%`, `$XDG_CONFIG_HOME`, or `~/.config`) plus
    /// `trademe-sdk/credentials.json`. Computed fresh on every call so env
    /// changes (e.g. in tests) take effect without restart.
    pub fn default_location() -> PathBuf {
        if let Ok(path) = std::env::var(CRED_FILE_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CRED_SUBDIR)
            .join(CRED_FILE)
    }

    /// The file path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the credential set, creating parent directories as needed.
    ///
    /// On Unix the file mode is restricted to `0600`; failure to set
    /// permissions is swallowed (not every filesystem supports it).
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(
                &self.path,
                std::fs::Permissions::from_mode(0o600),
            );
        }

        tracing::debug!(path = %self.path.display(), "saved credentials");
        Ok(())
    }

    /// Read the credential set back, if the file exists.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptCredentials`] when the file exists but is not valid
    /// JSON or is missing a required field. A missing file is `Ok(None)`,
    /// not an error.
    pub fn load(&self) -> Result<Option<Credentials>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let credentials: Credentials =
            serde_json::from_str(&contents).map_err(|err| {
                Error::CorruptCredentials(format!(
                    "{}: {err}",
                    self.path.display()
                ))
            })?;

        if !credentials.is_complete() {
            return Err(Error::CorruptCredentials(format!(
                "{}: one or more fields are empty",
                self.path.display()
            )));
        }

        Ok(Some(credentials))
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::at_default_location()
    }
}
