use std::collections::HashMap;
use std::sync::Mutex;

use reqwest::Request;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::{method, path};

use crate::oauth::RequestObserver;

pub const INPUT_ACCESS_TOKEN: &str = "inputAccessToken";
pub const OBO_ACCESS_TOKEN: &str = "oboAccessToken";
pub const CLIENT_ID: &str = "fakeID";
pub const CLIENT_SECRET: &str = "fakeSecret";
pub const SCOPE: &str = "https://graph.microsoft.com/.default";
pub const TOKEN_PATH: &str = "/fake-tenant/oauth2/v2.0/token";
pub const DENIED_BODY: &str = r#"{"error":{"code":"Authorization_RequestDenied","message":"Insufficient privileges to complete the operation.","innerError":{"request-id":"6e73da70-96f3-4415-8c6a-a940cb1ba0e2","date":"2019-12-17T21:57:17"}}}"#;

pub fn success_body(token: &str) -> String {
    format!(r#"{{"token_type":"Bearer","expires_in":3599,"access_token":"{}"}}"#, token)
}

pub fn login_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), TOKEN_PATH)
}

/// Mount a token endpoint answering every POST with `status` and `body`.
pub async fn mount_token_endpoint(server: &MockServer, status: u16, body: impl Into<String>) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.into()))
        .expect(1)
        .mount(server)
        .await;
}

/// The single request the server received.
pub async fn only_request(server: &MockServer) -> wiremock::Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one round trip");
    requests.remove(0)
}

pub fn form_of(request: &wiremock::Request) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body).into_owned().collect()
}

pub fn content_type(request: &wiremock::Request) -> String {
    request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Whether `needle` appears in the URL, any header or the body.
pub fn request_mentions(request: &wiremock::Request, needle: &str) -> bool {
    request.url.as_str().contains(needle)
        || request
            .headers
            .iter()
            .any(|(_, v)| String::from_utf8_lossy(v.as_bytes()).contains(needle))
        || String::from_utf8_lossy(&request.body).contains(needle)
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub urls: Mutex<Vec<String>>,
}

impl RequestObserver for RecordingObserver {
    fn on_request(&self, request: &Request) {
        self.urls.lock().unwrap().push(request.url().to_string());
    }
}
