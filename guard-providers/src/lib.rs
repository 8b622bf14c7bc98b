//! OAuth2 token refreshers for guard.
//!
//! This crate exchanges one bearer credential for another against an
//! OAuth2-compatible identity provider:
//!
//! - **[`ClientCredentialTokenRefresher`]** - `client_credentials` grant for
//!   service-to-service calls
//! - **[`OboTokenRefresher`]** - JWT bearer grant with
//!   `requested_token_use=on_behalf_of`, forwarding the caller's token
//!
//! Both speak the same wire protocol: a form-encoded `POST` to the login URL,
//! answered by `{"token_type", "expires_in", "access_token"}` on HTTP 200.
//! Any other status is an error that carries the provider's body verbatim.
//!
//! ## Example
//!
//! ```rust,ignore
//! use guard_providers::{OboTokenRefresher, RefresherConfig, TokenRefresher};
//!
//! let config = RefresherConfig::azure("contoso.onmicrosoft.com", "client-id", "secret");
//! let refresher = OboTokenRefresher::from_config(config);
//!
//! let resp = refresher.refresh(&caller_token).await?;
//! println!("{} token valid for {}s", resp.token_type, resp.expires_in);
//! ```
//!
//! ## Tracing
//!
//! Requests are logged under the `guard::oauth` target. At `TRACE` level the
//! default [`CurlTrace`] observer also prints an equivalent `curl` command.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod client_credential;
mod config;
mod obo;
mod refresher;

pub mod oauth;

#[cfg(feature = "azure")]
#[cfg_attr(docsrs, doc(cfg(feature = "azure")))]
pub mod azure;

#[cfg(test)]
mod test_support;

// Re-exports
pub use client_credential::ClientCredentialTokenRefresher;
pub use config::RefresherConfig;
pub use obo::OboTokenRefresher;
pub use oauth::{CurlTrace, Grant, NoopObserver, RequestObserver, TokenEndpoint};
pub use refresher::{BoxedRefresher, TokenRefresher};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        BoxedRefresher, ClientCredentialTokenRefresher, OboTokenRefresher, RefresherConfig,
        TokenRefresher,
    };
}
