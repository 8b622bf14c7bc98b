//! OAuth2 On-Behalf-Of refresher.

use async_trait::async_trait;
use guard_core::{AuthResponse, RefreshError};
use reqwest::Client;
use std::sync::Arc;

use crate::config::RefresherConfig;
use crate::oauth::{Grant, RequestObserver, TokenEndpoint};
use crate::refresher::TokenRefresher;

/// Exchanges a caller's token for one scoped to a downstream API, acting on
/// the caller's behalf.
///
/// Uses the JWT bearer grant with `requested_token_use=on_behalf_of`, the
/// flavour Azure Active Directory documents as the On-Behalf-Of flow.
#[derive(Debug, Clone)]
pub struct OboTokenRefresher {
    name: String,
    endpoint: TokenEndpoint,
}

impl OboTokenRefresher {
    /// Default diagnostic name.
    pub const DEFAULT_NAME: &'static str = "OBOTokenRefresher";

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
impl TokenRefresher for OboTokenRefresher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn refresh(&self, token: &str) -> Result<AuthResponse, RefreshError> {
        self.endpoint
            .exchange(Grant::OnBehalfOf { assertion: token })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresher::BoxedRefresher;
    use crate::test_support::*;
    use pretty_assertions::assert_eq;
    use wiremock::MockServer;

    fn refresher(server: &MockServer) -> OboTokenRefresher {
        OboTokenRefresher::new(CLIENT_ID, CLIENT_SECRET, login_url(server), SCOPE)
    }

    #[tokio::test]
    async fn test_refresh_upon_success_response() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 200, success_body(OBO_ACCESS_TOKEN)).await;

        let resp = refresher(&server).refresh(INPUT_ACCESS_TOKEN).await.unwrap();

        assert_eq!(resp.token, OBO_ACCESS_TOKEN);
        assert_eq!(resp.token_type, "Bearer");
        assert_eq!(resp.expires_in, 3599);

        let request = only_request(&server).await;
        assert_eq!(request.method.as_str(), "POST");
        assert_eq!(content_type(&request), "application/x-www-form-urlencoded");

        let form = form_of(&request);
        assert_eq!(form["client_id"], CLIENT_ID);
        assert_eq!(form["client_secret"], CLIENT_SECRET);
        assert_eq!(form["scope"], SCOPE);
        assert_eq!(form["assertion"], INPUT_ACCESS_TOKEN);
        assert_eq!(form["requested_token_use"], "on_behalf_of");
        assert_eq!(form["grant_type"], "urn:ietf:params:oauth:grant-type:jwt-bearer");
        assert_eq!(form.len(), 6);
    }

    #[tokio::test]
    async fn test_refresh_upon_error_response() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 400, DENIED_BODY).await;

        let result = refresher(&server).refresh(INPUT_ACCESS_TOKEN).await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Authorization_RequestDenied"));
        assert_eq!(err.body(), Some(DENIED_BODY));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_assertion_only_carries_input_token() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 200, success_body(OBO_ACCESS_TOKEN)).await;

        refresher(&server).refresh(INPUT_ACCESS_TOKEN).await.unwrap();

        let form = form_of(&only_request(&server).await);
        assert_eq!(form["assertion"], INPUT_ACCESS_TOKEN);
        assert_ne!(form["client_secret"], INPUT_ACCESS_TOKEN);
        assert_ne!(form["scope"], INPUT_ACCESS_TOKEN);
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_share_one_instance() {
        let server = MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string(success_body(OBO_ACCESS_TOKEN)),
            )
            .expect(2)
            .mount(&server)
            .await;

        let shared: BoxedRefresher = Arc::new(refresher(&server));
        let (a, b) = tokio::join!(shared.refresh("caller-a"), shared.refresh("caller-b"));

        assert_eq!(a.unwrap().token, OBO_ACCESS_TOKEN);
        assert_eq!(b.unwrap().token, OBO_ACCESS_TOKEN);

        let mut assertions: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| form_of(r)["assertion"].clone())
            .collect();
        assertions.sort();
        assert_eq!(assertions, vec!["caller-a".to_string(), "caller-b".to_string()]);
    }

    #[test]
    fn test_name() {
        let r = OboTokenRefresher::new("id", "secret", "https://x/token", "s");
        assert_eq!(r.name(), "OBOTokenRefresher");
        assert_eq!(r.config().scope, "s");
    }
}
