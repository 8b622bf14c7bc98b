//! Token endpoint request/response plumbing shared by all grants.

use guard_core::{AuthResponse, RefreshError, TransportError};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use super::grant::Grant;
use super::trace::{CurlTrace, RequestObserver};
use crate::config::RefresherConfig;

/// Content type of every token request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An identity provider token endpoint.
///
/// Holds no per-call state; the pooled [`Client`] is the only shared
/// resource, so one endpoint may serve concurrent exchanges.
#[derive(Debug, Clone)]
pub struct TokenEndpoint {
    client: Client,
    config: RefresherConfig,
    observer: Arc<dyn RequestObserver>,
}

impl TokenEndpoint {
    /// Create an endpoint with a client built from `config`.
    pub fn new(config: RefresherConfig) -> Self {
        Self {
            client: config.build_client(),
            config,
            observer: Arc::new(CurlTrace),
        }
    }

    /// Use a custom HTTP client.
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Replace the request observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Endpoint configuration.
    pub fn config(&self) -> &RefresherConfig {
        &self.config
    }

    /// POST one token request under `grant` and decode the answer.
    ///
    /// Exactly one round trip; nothing is retried.
    pub async fn exchange(&self, grant: Grant<'_>) -> Result<AuthResponse, RefreshError> {
        let url = Url::parse(&self.config.login_url).map_err(|e| {
            RefreshError::request_construction(format!(
                "invalid login url {:?}: {}",
                self.config.login_url, e
            ))
        })?;
        // Reported in every error below.
        let path = url.path().to_string();

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .form(&grant.form(&self.config))
            .build()
            .map_err(|e| RefreshError::request_construction(e.to_string()))?;

        debug!(
            target: "guard::oauth",
            path = %path,
            grant_type = grant.grant_type(),
            "Requesting token"
        );
        self.observer.on_request(&request);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| transport_error(&path, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(&path, e))?;

        if status != StatusCode::OK {
            warn!(target: "guard::oauth", path = %path, status = status.as_u16(), "Token request rejected");
            return Err(RefreshError::provider(path, status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(target: "guard::oauth", path = %path, error = %e, "Malformed token response");
            RefreshError::decode(path, e)
        })
    }
}

fn transport_error(path: &str, err: reqwest::Error) -> RefreshError {
    let mut transport = TransportError::new(path, err.to_string());
    if err.is_timeout() {
        transport = transport.timeout();
    } else if err.is_connect() {
        transport = transport.connection();
    }
    transport.into()
}
