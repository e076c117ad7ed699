//! Directory-backed storage adapter.
//!
//! Implements [`StoragePort`] with one file per key:
//!
//! ```text
//! <root>/
//! ├── state/
//! │   ├── arming
//! │   └── alarm
//! └── sensors/
//!     └── <hex-encoded name>
//! ```
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::app::ports::{StorageError, StoragePort};

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            warn!("FileStorage: cannot create {}: {}", root.display(), e);
            StorageError::IoError
        })?;
        info!("FileStorage: opened {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, namespace: &str, key: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_name(namespace) || !is_valid_name(key) {
            warn!("FileStorage: rejected key {}::{}", namespace, key);
            return Err(StorageError::IoError);
        }
        Ok(self.root.join(namespace).join(key))
    }
}

/// Names become path components: non-empty, ASCII alphanumerics plus
/// `-`, `_` and `.`, and never `.` or `..` or a `.tmp` suffix.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.ends_with(".tmp")
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

fn map_io(e: &std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        ErrorKind::StorageFull => StorageError::Full,
        _ => StorageError::IoError,
    }
}

impl StoragePort for FileStorage {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(namespace, key)?;
        fs::read(&path).map_err(|e| map_io(&e))
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(namespace, key)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| map_io(&e))?;
        }
        let tmp_path = path.with_file_name(format!("{key}.tmp"));
        fs::write(&tmp_path, data).map_err(|e| {
            warn!("FileStorage: write {} failed: {}", tmp_path.display(), e);
            map_io(&e)
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            warn!("FileStorage: rename to {} failed: {}", path.display(), e);
            map_io(&e)
        })?;
        debug!("FileStorage: wrote {}::{} ({} bytes)", namespace, key, data.len());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(namespace, key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&e)),
        }
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.path_for(namespace, key)
            .map(|p| p.is_file())
            .unwrap_or(false)
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>, StorageError> {
        if !is_valid_name(namespace) {
            return Err(StorageError::IoError);
        }
        let dir = self.root.join(namespace);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io(&e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io(&e))?;
            if let Some(name) = entry.file_name().to_str() {
                if is_valid_name(name) && entry.path().is_file() {
                    keys.push(name.to_owned());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
