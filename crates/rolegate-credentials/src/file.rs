//! The persisted credential file.
//!
//! The file holds a single JSON object mapping username to password. It is
//! read once at startup and rewritten in full after reconciliation. Writes
//! go to a temporary file in the same directory which is then renamed over
//! the target, so a failed write leaves the previous file untouched.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::store::CredentialStore;

/// Environment variable that overrides the credential directory.
pub const CREDENTIAL_DIRECTORY_ENV: &str = "ROLEGATE_CREDENTIAL_DIRECTORY";

/// File name of the persisted store inside the credential directory.
pub const CREDENTIAL_FILE_NAME: &str = "rolegate_passwords.json.generated";

/// Directory used when neither the environment nor configuration names one.
const DEFAULT_DIRECTORY: &str = ".rolegate";

/// Location of the persisted credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    /// A credential file at an explicit path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The credential file inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(CREDENTIAL_FILE_NAME))
    }

    /// Resolves the credential file from the process environment.
    ///
    /// Checks in order:
    /// 1. `ROLEGATE_CREDENTIAL_DIRECTORY`
    /// 2. `configured_dir` (supports `~` expansion)
    /// 3. `~/.rolegate`
    pub fn resolve(configured_dir: Option<&str>) -> Result<Self> {
        Self::resolve_with(
            std::env::var(CREDENTIAL_DIRECTORY_ENV).ok(),
            configured_dir,
        )
    }

    /// Like [`CredentialFile::resolve`], with the environment value passed in.
    pub fn resolve_with(env_dir: Option<String>, configured_dir: Option<&str>) -> Result<Self> {
        let non_empty = |d: &&str| !d.is_empty();
        if let Some(dir) = env_dir
            .as_deref()
            .filter(non_empty)
            .or(configured_dir.filter(non_empty))
        {
            return Ok(Self::in_dir(shellexpand::tilde(dir).as_ref()));
        }

        dirs::home_dir()
            .map(|home| Self::in_dir(home.join(DEFAULT_DIRECTORY)))
            .ok_or(Error::NoCredentialDirectory(CREDENTIAL_DIRECTORY_ENV))
    }

    /// Path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted store.
    ///
    /// A missing file is an empty store, including when a parent component
    /// is not a directory. A file that exists but cannot be read or parsed is
    /// an error.
    pub fn load(&self) -> Result<CredentialStore> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                log::debug!("No credential file at {}", self.path.display());
                return Ok(CredentialStore::new());
            }
            Err(e) => return Err(Error::read(&self.path, e)),
        };

        serde_json::from_str(content.trim()).map_err(|e| Error::corrupt(&self.path, e))
    }

    /// Replaces the persisted store with `store`.
    pub fn save(&self, store: &CredentialStore) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| Error::write(&self.path, e))?;

        let json = serde_json::to_string(store).map_err(|e| Error::write(&self.path, e.into()))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::write(&self.path, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|e| Error::write(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| Error::write(&self.path, e.error))?;

        log::debug!(
            "Wrote {} credential(s) to {}",
            store.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::in_dir(dir.path());
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::in_dir(dir.path());
        let store: CredentialStore = [("alice", "X"), ("bob", "Y")].into_iter().collect();

        file.save(&store).unwrap();
        assert_eq!(file.load().unwrap(), store);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::in_dir(dir.path());
        file.save(&[("alice", "X")].into_iter().collect()).unwrap();
        file.save(&[("carol", "Z")].into_iter().collect()).unwrap();

        let loaded = file.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get("carol"), Some("Z"));
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::in_dir(dir.path().join("nested").join("creds"));
        file.save(&CredentialStore::new()).unwrap();
        assert!(file.path().exists());
    }

    #[test]
    fn test_corrupt_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::in_dir(dir.path());
        std::fs::write(file.path(), "not json").unwrap();
        assert!(matches!(
            file.load(),
            Err(Error::PersistedStateCorrupt { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::in_dir(dir.path());
        std::fs::write(file.path(), "").unwrap();
        assert!(matches!(
            file.load(),
            Err(Error::PersistedStateCorrupt { .. })
        ));
    }

    #[test]
    fn test_load_tolerates_surrounding_whitespace() {
        let dir = TempDir::new().unwrap();
        let file = CredentialFile::in_dir(dir.path());
        std::fs::write(file.path(), "\n  {\"alice\": \"X\"}\n").unwrap();
        assert_eq!(file.load().unwrap().get("alice"), Some("X"));
    }

    #[test]
    fn test_unwritable_target_is_fatal() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the rename fail.
        let file = CredentialFile::in_dir(dir.path());
        std::fs::create_dir(file.path()).unwrap();
        std::fs::write(file.path().join("keep"), "x").unwrap();
        assert!(matches!(
            file.save(&CredentialStore::new()),
            Err(Error::PersistedStateWriteFailure { .. })
        ));
    }

    #[test]
    fn test_parent_is_a_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let file = CredentialFile::new(blocker.join(CREDENTIAL_FILE_NAME));
        assert!(file.load().unwrap().is_empty());
    }

    #[test]
    fn test_resolve_prefers_environment() {
        let file =
            CredentialFile::resolve_with(Some("/env/dir".to_string()), Some("/config/dir")).unwrap();
        assert_eq!(file.path(), Path::new("/env/dir").join(CREDENTIAL_FILE_NAME));
    }

    #[test]
    fn test_resolve_uses_configured_dir() {
        let file = CredentialFile::resolve_with(None, Some("/config/dir")).unwrap();
        assert_eq!(
            file.path(),
            Path::new("/config/dir").join(CREDENTIAL_FILE_NAME)
        );
    }

    #[test]
    fn test_resolve_ignores_empty_env() {
        let file = CredentialFile::resolve_with(Some(String::new()), Some("/config/dir")).unwrap();
        assert_eq!(
            file.path(),
            Path::new("/config/dir").join(CREDENTIAL_FILE_NAME)
        );
    }
}
