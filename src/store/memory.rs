use crate::store::{Storage, StorageError};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage backend. Used by tests and anywhere persistence is not
/// wanted; contents die with the process.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let map = self
            .inner
            .read()
            .map_err(|e| StorageError::Read(e.to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self
            .inner
            .write()
            .map_err(|e| StorageError::Write(e.to_string()))?;
        map.remove(key);
        Ok(())
    }
}
