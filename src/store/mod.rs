//! Key-value storage behind a small port, so the history store can run
//! against a real backend or an in-memory one in tests.

pub mod disk;
pub mod memory;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not open storage: {0}")]
    Open(String),
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Minimal storage surface: whole values under string keys.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
