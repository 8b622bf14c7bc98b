//! Private keys and self-signed CA certificates.

use guard_core::PkiError;
use rand::rngs::OsRng;
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair, KeyUsagePurpose,
};
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;
use std::fmt;
use time::{Duration, OffsetDateTime};
use x509_parser::pem::parse_x509_pem;

/// Size of generated RSA keys.
pub const RSA_KEY_BITS: usize = 2048;

/// Validity period of a freshly issued CA.
pub const CA_VALIDITY: Duration = Duration::days(3650);

/// Subject of a certificate to issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertConfig {
    /// Subject common name.
    pub common_name: String,
    /// Subject organizations.
    pub organization: Vec<String>,
}

impl CertConfig {
    /// Create a config for `common_name`.
    pub fn new(common_name: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
            organization: Vec::new(),
        }
    }

    /// Add a subject organization.
    #[must_use]
    pub fn with_organization(mut self, org: impl Into<String>) -> Self {
        self.organization.push(org.into());
        self
    }
}

/// PKCS#8 PEM encoded private key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pem: String,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl PrivateKey {
    /// Parse a PEM encoded key, rejecting anything unusable for signing.
    pub fn from_pem(pem: impl Into<String>) -> Result<Self, String> {
        let pem = pem.into();
        KeyPair::from_pem(&pem).map_err(|e| e.to_string())?;
        Ok(Self { pem })
    }

    /// PEM text.
    pub fn pem(&self) -> &str {
        &self.pem
    }
}

/// X.509 certificate in both DER and PEM form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
    pem: String,
}

impl Certificate {
    /// Parse a PEM encoded certificate.
    pub fn from_pem(pem: impl Into<String>) -> Result<Self, String> {
        let pem = pem.into();
        let (_, block) = parse_x509_pem(pem.as_bytes()).map_err(|e| e.to_string())?;
        if block.label != "CERTIFICATE" {
            return Err(format!("unexpected PEM block {:?}", block.label));
        }
        block.parse_x509().map_err(|e| e.to_string())?;
        Ok(Self {
            der: block.contents,
            pem,
        })
    }

    /// DER bytes.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// PEM text.
    pub fn pem(&self) -> &str {
        &self.pem
    }
}

#[cfg(test)]
impl PrivateKey {
    pub(crate) fn unchecked(pem: &str) -> Self {
        Self { pem: pem.to_string() }
    }
}

#[cfg(test)]
impl Certificate {
    pub(crate) fn unchecked(der: &[u8], pem: &str) -> Self {
        Self {
            der: der.to_vec(),
            pem: pem.to_string(),
        }
    }
}

/// Key and certificate generation used by CA bootstrap.
#[cfg_attr(test, mockall::automock)]
pub trait CaIssuer {
    /// Generate a fresh private key.
    fn new_private_key(&self) -> Result<PrivateKey, PkiError>;

    /// Self-sign a CA certificate for `cfg` with `key`.
    fn new_self_signed_ca_cert(
        &self,
        cfg: &CertConfig,
        key: &PrivateKey,
    ) -> Result<Certificate, PkiError>;
}

/// Issues RSA keys and standard X.509 v3 self-signed CA certificates.
#[derive(Debug, Clone, Copy, Default)]
pub struct X509Issuer;

impl CaIssuer for X509Issuer {
    fn new_private_key(&self) -> Result<PrivateKey, PkiError> {
        new_private_key()
    }

    fn new_self_signed_ca_cert(
        &self,
        cfg: &CertConfig,
        key: &PrivateKey,
    ) -> Result<Certificate, PkiError> {
        new_self_signed_ca_cert(cfg, key)
    }
}

/// Generate an RSA private key of [`RSA_KEY_BITS`].
pub fn new_private_key() -> Result<PrivateKey, PkiError> {
    let key = RsaPrivateKey::new(&mut OsRng, RSA_KEY_BITS)
        .map_err(|e| PkiError::KeyGeneration(e.to_string()))?;
    let pem = key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| PkiError::KeyGeneration(e.to_string()))?;
    Ok(PrivateKey {
        pem: pem.to_string(),
    })
}

/// Self-sign a CA certificate valid for [`CA_VALIDITY`] from now.
pub fn new_self_signed_ca_cert(cfg: &CertConfig, key: &PrivateKey) -> Result<Certificate, PkiError> {
    let key_pair = KeyPair::from_pem(key.pem())
        .map_err(|e| PkiError::CertGeneration(format!("unusable private key: {}", e)))?;

    let mut subject = DistinguishedName::new();
    subject.push(DnType::CommonName, cfg.common_name.as_str());
    for org in &cfg.organization {
        subject.push(DnType::OrganizationName, org.as_str());
    }

    let now = OffsetDateTime::now_utc();
    let mut params = CertificateParams::default();
    params.distinguished_name = subject;
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyEncipherment,
        KeyUsagePurpose::KeyCertSign,
    ];
    params.not_before = now;
    params.not_after = now + CA_VALIDITY;

    let cert = params
        .self_signed(&key_pair)
        .map_err(|e| PkiError::CertGeneration(e.to_string()))?;

    Ok(Certificate {
        der: cert.der().to_vec(),
        pem: cert.pem(),
    })
}
