//! Normalized token exchange result.

use serde::{Deserialize, Serialize};

/// Credential issued by an identity provider's token endpoint.
///
/// Field names follow the OAuth2 token response on the wire
/// (`access_token`, `token_type`, `expires_in`). A failed exchange never
/// yields a value of this type, so a populated `AuthResponse` always
/// reflects a complete, successful response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The issued credential.
    #[serde(rename = "access_token")]
    pub token: String,
    /// Token type, usually `Bearer`.
    #[serde(default)]
    pub token_type: String,
    /// Seconds until the token expires. Informational only.
    #[serde(default)]
    pub expires_in: i64,
}

impl AuthResponse {
    /// Create a new response.
    pub fn new(token: impl Into<String>, token_type: impl Into<String>, expires_in: i64) -> Self {
        Self {
            token: token.into(),
            token_type: token_type.into(),
            expires_in,
        }
    }

    /// Whether this is the zero value.
    pub fn is_empty(&self) -> bool {
        self.token.is_empty() && self.token_type.is_empty()
    }

    /// Value for an `Authorization` header, e.g. `Bearer eyJ...`.
    pub fn authorization_header(&self) -> String {
        if self.token_type.is_empty() {
            format!("Bearer {}", self.token)
        } else {
            format!("{} {}", self.token_type, self.token)
        }
    }
}
