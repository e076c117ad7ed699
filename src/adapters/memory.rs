//! In-memory storage adapter.
//!
//! Implements [`StoragePort`] over a `HashMap` keyed by `namespace::key`.
//! Used by tests and by anything that does not need state to outlive the
//! process.  Writes can be made to fail on demand to exercise the
//! controller's storage-error paths.

use std::collections::HashMap;

use log::{info, warn};

use crate::app::ports::{StorageError, StoragePort};

pub struct MemoryStorage {
    store: HashMap<String, Vec<u8>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        info!("MemoryStorage: simulation backend");
        Self {
            store: HashMap::new(),
            fail_writes: false,
        }
    }

    /// Make every subsequent `write`/`delete` fail with [`StorageError::IoError`].
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes {
            warn!("MemoryStorage: injected write failure");
            return Err(StorageError::IoError);
        }
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        self.store
            .get(&Self::composite_key(namespace, key))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.check_writable()?;
        self.store
            .insert(Self::composite_key(namespace, key), data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.store.remove(&Self::composite_key(namespace, key));
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store
            .contains_key(&Self::composite_key(namespace, key))
    }

    fn keys(&self, namespace: &str) -> Result<Vec<String>, StorageError> {
        let prefix = format!("{}::", namespace);
        let mut keys: Vec<String> = self
            .store
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_owned))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
