use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use guard::pki::{init_ca, FsCertStore, TerminalPrompt, X509Issuer};
use guard::PkiError;

use crate::output::print_success;

/// Outcome of `guard init ca`.
#[derive(Debug, PartialEq, Eq)]
pub enum CaOutcome {
    Written,
    Declined,
}

pub fn ca(dir: &Path) -> Result<CaOutcome> {
    let store = FsCertStore::new(dir);
    match init_ca(&store, &TerminalPrompt::stdio(), &X509Issuer) {
        Ok(()) => {
            print_success(&format!(
                "Wrote ca certificates in {}",
                store.dir().display().to_string().cyan()
            ));
            Ok(CaOutcome::Written)
        }
        Err(PkiError::UserDeclined) => Ok(CaOutcome::Declined),
        Err(e) => Err(e.into()),
    }
}
