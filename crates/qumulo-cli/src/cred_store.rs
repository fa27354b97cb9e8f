//! Credentials persisted between CLI invocations.
//!
//! `login` writes the session to `~/.qfsd_cred`; every other command reads
//! it back. The file records which appliance the key belongs to so it is
//! never sent to a different host.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use qumulo_sdk::Credentials;
use serde::{Deserialize, Serialize};
use tracing::debug;

const CREDENTIALS_FILE: &str = ".qfsd_cred";

/// A logged-in session as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    pub host: String,
    pub port: u16,
    pub credentials: Credentials,
}

impl SavedSession {
    /// Whether this session was opened against `host:port`.
    pub fn belongs_to(&self, host: &str, port: u16) -> bool {
        self.host == host && self.port == port
    }
}

/// `~/.qfsd_cred`, if the home directory can be determined.
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CREDENTIALS_FILE))
}

/// Read the saved session. A missing file is not an error.
pub fn load(path: &Path) -> Result<Option<SavedSession>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };

    let session = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(path = %path.display(), "loaded saved session");
    Ok(Some(session))
}

/// Write the session, readable by the current user only.
pub fn save(path: &Path, session: &SavedSession) -> Result<()> {
    let json = serde_json::to_string_pretty(session)?;
    write_private(path, json.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!(path = %path.display(), "saved session");
    Ok(())
}

/// Delete the saved session. Returns `false` if there was none.
pub fn remove(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}

#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SavedSession {
        SavedSession {
            host: "qumulo.example.com".into(),
            port: 8000,
            credentials: Credentials::new("kid", "key", "hmac-sha256", 1_700_000_000),
        }
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cred");

        save(&path, &session()).unwrap();
        assert_eq!(load(&path).unwrap(), Some(session()));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cred");
        fs::write(&path, "not json").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn remove_reports_whether_a_file_existed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cred");
        save(&path, &session()).unwrap();

        assert!(remove(&path).unwrap());
        assert!(!remove(&path).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cred");
        save(&path, &session()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn belongs_to_checks_host_and_port() {
        let s = session();
        assert!(s.belongs_to("qumulo.example.com", 8000));
        assert!(!s.belongs_to("qumulo.example.com", 8001));
        assert!(!s.belongs_to("other", 8000));
    }
}
