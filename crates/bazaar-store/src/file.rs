//! File-backed storage tier.
//!
//! Each key becomes one file inside a directory. Writes go to a sibling
//! temp file first and are then renamed over the target, so a reader sees
//! either the old bytes or the new bytes, never a torn write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{StorageTier, StoreError};

/// A durable [`StorageTier`] that survives process restarts.
#[derive(Debug, Clone)]
pub struct FileTier {
    name: &'static str,
    dir: PathBuf,
}

impl FileTier {
    /// Creates a tier rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(name: &'static str, dir: impl Into<PathBuf>) -> Self {
        Self {
            name,
            dir: dir.into(),
        }
    }

    /// The directory holding this tier's files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file that stores `key`.
    ///
    /// Anything outside `[A-Za-z0-9_-]` is replaced with `_` so a key can
    /// never escape the directory.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl StorageTier for FileTier {
    fn name(&self) -> &str {
        self.name
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(self.name, e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(self.name, e))?;

        let target = self.path_for(key);
        let tmp = target.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StoreError::io(self.name, e))?;
        if let Err(e) = fs::rename(&tmp, &target) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::warn!(tier = self.name, error = %cleanup, "failed to remove temp file");
            }
            return Err(StoreError::io(self.name, e));
        }

        tracing::trace!(tier = self.name, path = %target.display(), "entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(self.name, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_sanitizes_key() {
        let tier = FileTier::new("durable", "/tmp/bazaar");
        assert_eq!(
            tier.path_for("../userData"),
            PathBuf::from("/tmp/bazaar/___userData.json")
        );
    }

    #[test]
    fn test_get_missing_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let tier = FileTier::new("durable", dir.path());
        assert_eq!(tier.get("userData").unwrap(), None);
    }

    #[test]
    fn test_set_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("profile").join("storage");
        let tier = FileTier::new("durable", &nested);

        tier.set("userData", b"{\"a\":1}").unwrap();

        assert!(nested.join("userData.json").exists());
        assert_eq!(tier.get("userData").unwrap(), Some(b"{\"a\":1}".to_vec()));
        // No temp file left behind.
        assert!(!nested.join("userData.json.tmp").exists());
    }

    #[test]
    fn test_remove_missing_file_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let tier = FileTier::new("durable", dir.path());
        tier.remove("userData").unwrap();
    }

    #[test]
    fn test_set_into_file_path_returns_io_error() {
        // Using an existing *file* as the tier directory makes every write fail.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();
        let tier = FileTier::new("durable", &blocker);

        let result = tier.set("userData", b"{}");

        assert!(
            matches!(result, Err(StoreError::Io { ref tier, .. }) if tier == "durable")
        );
    }

    #[test]
    fn test_set_failed_rename_removes_temp_file() {
        // A non-empty directory where the entry file should go blocks the rename.
        let dir = tempfile::tempdir().unwrap();
        let tier = FileTier::new("durable", dir.path());
        let target = tier.path_for("userData");
        fs::create_dir_all(target.join("occupied")).unwrap();

        let result = tier.set("userData", b"{}");

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(!dir.path().join("userData.json.tmp").exists());
        assert!(target.is_dir());
    }
}
