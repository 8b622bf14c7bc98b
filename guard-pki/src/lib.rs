//! # guard-pki
//!
//! Bootstraps the self-signed certificate authority guard uses to sign
//! service certificates.
//!
//! - **[`init_ca`]**: existence check, overwrite confirmation, key
//!   generation, self-signing and persistence
//! - **[`CertStore`]** / **[`FsCertStore`]**: where key pairs live
//! - **[`Confirm`]** / **[`TerminalPrompt`]**: operator confirmation
//! - **[`CaIssuer`]** / **[`X509Issuer`]**: RSA keys and X.509 self-signing
//!
//! ## Example
//!
//! ```rust,no_run
//! use guard_pki::{init_ca, FsCertStore, TerminalPrompt, X509Issuer};
//!
//! let store = FsCertStore::new("/etc/guard/pki");
//! init_ca(&store, &TerminalPrompt::stdio(), &X509Issuer)?;
//! # Ok::<(), guard_core::PkiError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cert;
pub mod init;
pub mod prompt;
pub mod store;

// Re-exports
pub use cert::{
    new_private_key, new_self_signed_ca_cert, CaIssuer, CertConfig, Certificate, PrivateKey,
    X509Issuer,
};
pub use init::{ca_config, init_ca, CA_NAME};
pub use prompt::{Confirm, TerminalPrompt};
pub use store::{CertStore, FsCertStore};
