//! # guard-core
//!
//! Core types and error handling for the guard workspace.
//!
//! - **Auth**: [`AuthResponse`], the normalized result of a token exchange
//! - **Errors**: [`RefreshError`] for token exchange, [`PkiError`] for CA
//!   bootstrap, [`GuardError`] wrapping both
//!
//! ## Example
//!
//! ```rust
//! use guard_core::AuthResponse;
//!
//! let body = r#"{"token_type":"Bearer","expires_in":3599,"access_token":"X"}"#;
//! let resp: AuthResponse = serde_json::from_str(body).unwrap();
//! assert_eq!(resp.token, "X");
//! assert_eq!(resp.authorization_header(), "Bearer X");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod errors;

pub use auth::AuthResponse;
pub use errors::{ConfigError, GuardError, PkiError, RefreshError, Result, TransportError};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::auth::AuthResponse;
    pub use crate::errors::{ConfigError, GuardError, PkiError, RefreshError, Result};
}
