//! CA bootstrap.

use guard_core::PkiError;
use tracing::info;

use crate::cert::{CaIssuer, CertConfig};
use crate::prompt::Confirm;
use crate::store::CertStore;

/// Store name of the CA pair.
pub const CA_NAME: &str = "ca";

/// Subject of the CA certificate.
pub fn ca_config() -> CertConfig {
    CertConfig::new(CA_NAME)
}

/// Issue a self-signed CA and persist it in `store`.
///
/// If the store already holds a CA the operator is asked whether to replace
/// it (default no). Declining returns [`PkiError::UserDeclined`] before any
/// key is generated or file written. Otherwise exactly one key is generated,
/// one certificate self-signed and one pair written, in that order.
///
/// The existence check and the write are not atomic; two concurrent runs
/// against the same store can both pass the check.
pub fn init_ca<S, P, I>(store: &S, prompt: &P, issuer: &I) -> Result<(), PkiError>
where
    S: CertStore + ?Sized,
    P: Confirm + ?Sized,
    I: CaIssuer + ?Sized,
{
    let cfg = ca_config();

    if store.is_exists(CA_NAME) {
        let question = format!(
            "CA certificate found at {}. Do you want to overwrite?",
            store.location()
        );
        if !prompt.ask(&question, false) {
            info!(target: "guard::pki", location = %store.location(), "Keeping existing CA");
            return Err(PkiError::UserDeclined);
        }
    }

    let key = issuer.new_private_key()?;
    let cert = issuer.new_self_signed_ca_cert(&cfg, &key)?;
    store.write(&store.filename(&cfg), &cert, &key)?;

    info!(target: "guard::pki", location = %store.location(), "Wrote CA certificate");
    Ok(())
}
