//! Token refresher configuration.

use guard_core::ConfigError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Configuration for one identity provider relationship.
///
/// Built once and shared by every call of the refresher that owns it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefresherConfig {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default, skip_serializing)]
    pub client_secret: String,
    /// Requested scope, provider-defined syntax.
    #[serde(default)]
    pub scope: String,
    /// Absolute URL of the token endpoint.
    pub login_url: String,
    /// Diagnostic name overriding the refresher default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Transport timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl fmt::Debug for RefresherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefresherConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .field("login_url", &self.login_url)
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RefresherConfig {
    /// Create a new config.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: String::new(),
            login_url: login_url.into(),
            name: None,
            timeout: None,
        }
    }

    /// Set the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Set the diagnostic name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the transport timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Transport timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Load from environment variables with given prefix.
    ///
    /// Looks for:
    /// - `{PREFIX}_CLIENT_ID` (required)
    /// - `{PREFIX}_CLIENT_SECRET` (required)
    /// - `{PREFIX}_LOGIN_URL` (required)
    /// - `{PREFIX}_SCOPE`
    /// - `{PREFIX}_TIMEOUT_SECONDS` (positive integer)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let required = |suffix: &str| {
            let key = format!("{}_{}", prefix, suffix);
            std::env::var(&key).map_err(|_| ConfigError::MissingEnv(key))
        };

        let timeout_key = format!("{}_TIMEOUT_SECONDS", prefix);
        let timeout = match std::env::var(&timeout_key) {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid(format!(
                        "{}={:?}: must be greater than zero",
                        timeout_key, raw
                    )))
                }
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    return Err(ConfigError::Invalid(format!(
                        "{}={:?}: {}",
                        timeout_key, raw, e
                    )))
                }
            },
            Err(_) => None,
        };

        Ok(Self {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            login_url: required("LOGIN_URL")?,
            scope: std::env::var(format!("{}_SCOPE", prefix)).unwrap_or_default(),
            name: None,
            timeout,
        })
    }

    /// Build an HTTP client with this config.
    pub fn build_client(&self) -> Client {
        let mut builder = Client::builder();

        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }

        builder.build().unwrap_or_default()
    }
}
