//! Certificate storage.

use guard_core::PkiError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::cert::{CertConfig, Certificate, PrivateKey};

/// Where CA bootstrap looks for and persists key/certificate pairs.
#[cfg_attr(test, mockall::automock)]
pub trait CertStore {
    /// Whether a pair named `name` is already stored.
    fn is_exists(&self, name: &str) -> bool;

    /// Human readable location of the store.
    fn location(&self) -> String;

    /// Storage name for a certificate issued from `cfg`.
    fn filename(&self, cfg: &CertConfig) -> String;

    /// Persist a pair under `name`.
    fn write(&self, name: &str, cert: &Certificate, key: &PrivateKey) -> Result<(), PkiError>;
}

/// Directory of `<name>.crt` / `<name>.key` PEM files.
#[derive(Debug, Clone)]
pub struct FsCertStore {
    dir: PathBuf,
}

impl FsCertStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the certificate named `name`.
    pub fn cert_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.crt", name))
    }

    /// Path of the private key named `name`.
    pub fn key_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.key", name))
    }

    /// Load the pair named `name`.
    pub fn read(&self, name: &str) -> Result<(Certificate, PrivateKey), PkiError> {
        let cert_path = self.cert_path(name);
        let key_path = self.key_path(name);

        let cert_pem = fs::read_to_string(&cert_path)
            .map_err(|e| PkiError::load(&cert_path, e.to_string()))?;
        let key_pem =
            fs::read_to_string(&key_path).map_err(|e| PkiError::load(&key_path, e.to_string()))?;

        let cert = Certificate::from_pem(cert_pem).map_err(|e| PkiError::load(&cert_path, e))?;
        let key = PrivateKey::from_pem(key_pem).map_err(|e| PkiError::load(&key_path, e))?;
        Ok((cert, key))
    }
}

impl CertStore for FsCertStore {
    fn is_exists(&self, name: &str) -> bool {
        self.cert_path(name).is_file() && self.key_path(name).is_file()
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn filename(&self, cfg: &CertConfig) -> String {
        match cfg.organization.first() {
            Some(org) => format!("{}@{}", cfg.common_name, org),
            None => cfg.common_name.clone(),
        }
    }

    fn write(&self, name: &str, cert: &Certificate, key: &PrivateKey) -> Result<(), PkiError> {
        fs::create_dir_all(&self.dir).map_err(|e| PkiError::persistence(&self.dir, e))?;

        let cert_path = self.cert_path(name);
        let key_path = self.key_path(name);

        let staged_key = stage(&self.dir, key.pem().as_bytes(), KEY_MODE)
            .map_err(|e| PkiError::persistence(&key_path, e))?;
        let staged_cert = stage(&self.dir, cert.pem().as_bytes(), CERT_MODE)
            .map_err(|e| PkiError::persistence(&cert_path, e))?;

        staged_key
            .persist(&key_path)
            .map_err(|e| PkiError::persistence(&key_path, e.error))?;
        staged_cert
            .persist(&cert_path)
            .map_err(|e| PkiError::persistence(&cert_path, e.error))?;

        debug!(target: "guard::pki", cert = %cert_path.display(), key = %key_path.display(), "Wrote key pair");
        Ok(())
    }
}

/// Mode of private key files.
const KEY_MODE: u32 = 0o600;

/// Mode of certificate files.
const CERT_MODE: u32 = 0o644;

/// Write `contents` to a synced temporary file in `dir` with `mode`.
///
/// The file only becomes visible under its final name once persisted, so a
/// failure while staging leaves an existing pair untouched. The mode is set
/// explicitly and does not depend on any file being replaced.
#[cfg_attr(not(unix), allow(unused_variables))]
fn stage(dir: &Path, contents: &[u8], mode: u32) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file().set_permissions(fs::Permissions::from_mode(mode))?;
    }
    file.as_file().sync_all()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cert::{new_private_key, new_self_signed_ca_cert};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filename() {
        let store = FsCertStore::new("/tmp/pki");
        assert_eq!(store.filename(&CertConfig::new("ca")), "ca");
        assert_eq!(
            store.filename(&CertConfig::new("client").with_organization("system:masters")),
            "client@system:masters"
        );
    }

    #[test]
    fn test_location_and_paths() {
        let store = FsCertStore::new("/tmp/pki");
        assert_eq!(store.location(), "/tmp/pki");
        assert_eq!(store.cert_path("ca"), PathBuf::from("/tmp/pki/ca.crt"));
        assert_eq!(store.key_path("ca"), PathBuf::from("/tmp/pki/ca.key"));
    }

    #[test]
    fn test_write_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsCertStore::new(tmp.path().join("pki"));
        assert!(!store.is_exists("ca"));

        let key = new_private_key().unwrap();
        let cert = new_self_signed_ca_cert(&CertConfig::new("ca"), &key).unwrap();
        store.write("ca", &cert, &key).unwrap();

        assert!(store.is_exists("ca"));
        let (read_cert, read_key) = store.read("ca").unwrap();
        assert_eq!(read_cert, cert);
        assert_eq!(read_key, key);
    }

    #[cfg(unix)]
    #[test]
    fn test_key_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let store = FsCertStore::new(tmp.path());
        let cert = Certificate::unchecked(b"der", "cert-pem");
        store.write("ca", &cert, &PrivateKey::unchecked("key-pem")).unwrap();

        let mode = fs::metadata(store.key_path("ca")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let mode = fs::metadata(store.cert_path("ca")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(fs::read_to_string(store.cert_path("ca")).unwrap(), "cert-pem");
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_tightens_world_readable_key() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let store = FsCertStore::new(tmp.path());
        fs::write(store.cert_path("ca"), "old-cert").unwrap();
        fs::write(store.key_path("ca"), "old-key").unwrap();
        fs::set_permissions(store.key_path("ca"), fs::Permissions::from_mode(0o644)).unwrap();

        let cert = Certificate::unchecked(b"der", "new-cert");
        store.write("ca", &cert, &PrivateKey::unchecked("new-key")).unwrap();

        let mode = fs::metadata(store.key_path("ca")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(store.key_path("ca")).unwrap(), "new-key");
        assert_eq!(fs::read_to_string(store.cert_path("ca")).unwrap(), "new-cert");
    }

    #[test]
    fn test_write_leaves_no_staging_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsCertStore::new(tmp.path());
        let cert = Certificate::unchecked(b"der", "cert-pem");
        store.write("ca", &cert, &PrivateKey::unchecked("key-pem")).unwrap();
        store.write("ca", &cert, &PrivateKey::unchecked("key-pem")).unwrap();

        let mut names: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["ca.crt", "ca.key"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_key_write_keeps_existing_pair() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsCertStore::new(tmp.path());
        fs::write(store.cert_path("ca"), "old-cert").unwrap();
        // A directory where the key belongs makes the key rename fail.
        fs::create_dir(store.key_path("ca")).unwrap();
        fs::write(store.key_path("ca").join("keep"), "x").unwrap();

        let err = store
            .write("ca", &Certificate::unchecked(b"d", "new-cert"), &PrivateKey::unchecked("k"))
            .unwrap_err();

        assert!(matches!(err, PkiError::Persistence { ref path, .. } if path == &store.key_path("ca")));
        assert_eq!(fs::read_to_string(store.cert_path("ca")).unwrap(), "old-cert");
    }

    #[test]
    fn test_exists_requires_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsCertStore::new(tmp.path());
        fs::write(store.cert_path("ca"), "x").unwrap();
        assert!(!store.is_exists("ca"));
        fs::write(store.key_path("ca"), "x").unwrap();
        assert!(store.is_exists("ca"));
    }

    #[test]
    fn test_read_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsCertStore::new(tmp.path());
        let err = store.read("missing").unwrap_err();
        assert!(err.to_string().contains("missing.crt"));
    }

    #[test]
    fn test_write_into_unwritable_location() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FsCertStore::new(blocker.join("pki"));
        let err = store
            .write("ca", &Certificate::unchecked(b"d", "p"), &PrivateKey::unchecked("k"))
            .unwrap_err();
        assert!(matches!(err, PkiError::Persistence { .. }));
    }
}
