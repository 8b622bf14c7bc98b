//! One-shot token exchange.
//!
//! Use these when a process needs a single token and has no reason to keep a
//! refresher around, e.g. from a CLI or a script.
//!
//! # Examples
//!
//! ```rust,ignore
//! use guard::direct::{token, GrantKind};
//! use guard::RefresherConfig;
//!
//! let config = RefresherConfig::azure("contoso.onmicrosoft.com", "client-id", "secret");
//! let resp = token(GrantKind::OnBehalfOf, config, &caller_token).await?;
//! println!("{}", resp.authorization_header());
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use guard_core::{AuthResponse, RefreshError};
use guard_providers::{
    BoxedRefresher, ClientCredentialTokenRefresher, OboTokenRefresher, RefresherConfig,
    TokenRefresher,
};
use thiserror::Error;

/// Which OAuth2 grant a refresher uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantKind {
    /// `client_credentials`.
    ClientCredential,
    /// JWT bearer On-Behalf-Of.
    OnBehalfOf,
}

impl GrantKind {
    /// Canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientCredential => "client-credential",
            Self::OnBehalfOf => "obo",
        }
    }
}

impl fmt::Display for GrantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown grant name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown grant {0:?}, expected \"client-credential\" or \"obo\"")]
pub struct UnknownGrant(pub String);

impl FromStr for GrantKind {
    type Err = UnknownGrant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client-credential" | "client_credentials" | "client-credentials" => {
                Ok(Self::ClientCredential)
            }
            "obo" | "on-behalf-of" | "on_behalf_of" => Ok(Self::OnBehalfOf),
            _ => Err(UnknownGrant(s.to_string())),
        }
    }
}

/// Build a shareable refresher for `kind`.
pub fn refresher(kind: GrantKind, config: RefresherConfig) -> BoxedRefresher {
    match kind {
        GrantKind::ClientCredential => Arc::new(ClientCredentialTokenRefresher::from_config(config)),
        GrantKind::OnBehalfOf => Arc::new(OboTokenRefresher::from_config(config)),
    }
}

/// Exchange `input` once under `kind`.
pub async fn token(
    kind: GrantKind,
    config: RefresherConfig,
    input: &str,
) -> Result<AuthResponse, RefreshError> {
    refresher(kind, config).refresh(input).await
}
