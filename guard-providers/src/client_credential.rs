//! OAuth2 client credentials refresher.

use async_trait::async_trait;
use guard_core::{AuthResponse, RefreshError};
use reqwest::Client;
use std::sync::Arc;

use crate::config::RefresherConfig;
use crate::oauth::{Grant, RequestObserver, TokenEndpoint};
use crate::refresher::TokenRefresher;

/// Fetches service-to-service tokens with the `client_credentials` grant.
///
/// The input token of [`refresh`](TokenRefresher::refresh) is accepted for
/// trait uniformity and never sent.
#[derive(Debug, Clone)]
pub struct ClientCredentialTokenRefresher {
    name: String,
    endpoint: TokenEndpoint,
}

impl ClientCredentialTokenRefresher {
    /// Default diagnostic name.
    pub const DEFAULT_NAME: &'static str = "ClientCredentialTokenRefresher";

    /// Create a refresher for the token endpoint at `login_url`.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        login_url: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::from_config(RefresherConfig::new(client_id, client_secret, login_url).with_scope(scope))
    }

    /// Create from a full config.
    pub fn from_config(config: RefresherConfig) -> Self {
        Self {
            name: config
                .name
                .clone()
                .unwrap_or_else(|| Self::DEFAULT_NAME.to_string()),
            endpoint: TokenEndpoint::new(config),
        }
    }

    /// Use a custom HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.endpoint = self.endpoint.with_client(client);
        self
    }

    /// Replace the request observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.endpoint = self.endpoint.with_observer(observer);
        self
    }

    /// Refresher configuration.
    pub fn config(&self) -> &RefresherConfig {
        self.endpoint.config()
    }
}

#[async_trait]
impl TokenRefresher for ClientCredentialTokenRefresher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn refresh(&self, _token: &str) -> Result<AuthResponse, RefreshError> {
        self.endpoint.exchange(Grant::ClientCredentials).await
    }
}
