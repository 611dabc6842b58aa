use crate::store::{Storage, StorageError};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

/// Disk-backed storage on a fjall keyspace with a single partition. Writes
/// are synced before `set`/`remove` return, so a reported success is durable.
pub struct FjallStorage {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl FjallStorage {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path).map_err(|e| StorageError::Open(e.to_string()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .map_err(|e| StorageError::Open(e.to_string()))?;
        let partition = keyspace
            .open_partition("history", PartitionCreateOptions::default())
            .map_err(|e| StorageError::Open(e.to_string()))?;
        debug!("Opened storage at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
        })
    }
}

impl Storage for FjallStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self
            .partition
            .get(key)
            .map_err(|e| StorageError::Read(e.to_string()))?;
        Ok(value.map(|slice| slice.to_vec()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.partition
            .insert(key, value)
            .map_err(|e| StorageError::Write(e.to_string()))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(|e| StorageError::Write(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.partition
            .remove(key)
            .map_err(|e| StorageError::Write(e.to_string()))?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(|e| StorageError::Write(e.to_string()))
    }
}
