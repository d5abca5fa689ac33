//! Atomic TOML document storage.
//!
//! A thin layer for safe access to single-document TOML files: writes go
//! through a temporary file with an fsync and an atomic rename, guarded by
//! an advisory file lock.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use nearbot_core::{NearbotError, Result};

/// A handle to one TOML document on disk.
pub struct TomlDocument<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> TomlDocument<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document.
    ///
    /// A missing or empty file is `Ok(None)`; a present but unparsable
    /// file is an error the caller decides how to treat.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves the document atomically, replacing any previous content.
    pub fn save(&self, data: &T) -> Result<()> {
        let _lock = DocumentLock::acquire(&self.path)?;

        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(data)?;

        // Temporary file in the same directory so the rename stays on one
        // filesystem.
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Removes the document. Removing a missing document is not an error.
    pub fn remove(&self) -> Result<()> {
        let _lock = DocumentLock::acquire(&self.path)?;

        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| NearbotError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| NearbotError::io("Path has no file name"))?;
        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// An advisory lock guard, released on drop.
struct DocumentLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl DocumentLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| NearbotError::data_access(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(DocumentLock { file, lock_path })
    }
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped.
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestDoc {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let document = TomlDocument::<TestDoc>::new(temp_dir.path().join("doc.toml"));

        let doc = TestDoc {
            name: "test".to_string(),
            count: 42,
        };
        document.save(&doc).unwrap();

        let loaded = document.load().unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let document = TomlDocument::<TestDoc>::new(temp_dir.path().join("missing.toml"));
        assert!(document.load().unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let document = TomlDocument::<TestDoc>::new(temp_dir.path().join("doc.toml"));

        document
            .save(&TestDoc {
                name: "first".to_string(),
                count: 1,
            })
            .unwrap();
        document
            .save(&TestDoc {
                name: "second".to_string(),
                count: 2,
            })
            .unwrap();

        assert_eq!(document.load().unwrap().unwrap().name, "second");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let document = TomlDocument::<TestDoc>::new(temp_dir.path().join("doc.toml"));

        document
            .save(&TestDoc {
                name: "gone".to_string(),
                count: 0,
            })
            .unwrap();
        document.remove().unwrap();
        document.remove().unwrap();

        assert!(document.load().unwrap().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let document = TomlDocument::<TestDoc>::new(temp_dir.path().join("doc.toml"));

        document
            .save(&TestDoc {
                name: "test".to_string(),
                count: 42,
            })
            .unwrap();

        assert!(!temp_dir.path().join(".doc.toml.tmp").exists());
        assert!(temp_dir.path().join("doc.toml").exists());
    }
}
