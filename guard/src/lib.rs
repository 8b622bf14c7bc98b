//! # guard
//!
//! Converts one bearer credential into another through an OAuth2 identity
//! provider, and bootstraps the self-signed CA used to sign service
//! certificates.
//!
//! ## Quick Start
//!
//! ```ignore
//! use guard::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RefresherConfig::azure("contoso.onmicrosoft.com", "client-id", "secret");
//!     let refresher = OboTokenRefresher::from_config(config);
//!
//!     let resp = refresher.refresh("caller-token").await?;
//!     println!("{}", resp.authorization_header());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description | Default |
//! |---------|-------------|--------|
//! | `azure` | Azure Active Directory presets | ✅ |
//! | `full` | All features | ❌ |
//!
//! ## Architecture
//!
//! - [`guard_core`] - `AuthResponse` and error types
//! - [`guard_providers`] - token refreshers and the shared token endpoint
//! - [`guard_pki`] - CA bootstrap, certificate store, confirmation prompt
//!
//! ## CA Bootstrap
//!
//! ```ignore
//! use guard::pki::{init_ca, FsCertStore, TerminalPrompt, X509Issuer};
//!
//! let store = FsCertStore::new("/etc/guard/pki");
//! init_ca(&store, &TerminalPrompt::stdio(), &X509Issuer)?;
//! println!("Wrote ca certificates in {}", store.dir().display());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod direct;

// ============================================================================
// Crate Re-exports
// ============================================================================

/// Core types and errors.
pub use guard_core as core;

/// Token refreshers.
pub use guard_providers as providers;

/// CA bootstrap.
pub use guard_pki as pki;

// ============================================================================
// Type Re-exports
// ============================================================================

pub use guard_core::{
    AuthResponse, ConfigError, GuardError, PkiError, RefreshError, Result, TransportError,
};

pub use guard_providers::{
    BoxedRefresher, ClientCredentialTokenRefresher, OboTokenRefresher, RefresherConfig,
    TokenRefresher,
};

pub use direct::GrantKind;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::direct::{token, GrantKind};
    pub use guard_core::prelude::*;
    pub use guard_pki::{init_ca, CertStore, Confirm, FsCertStore, TerminalPrompt, X509Issuer};
    pub use guard_providers::prelude::*;
}
