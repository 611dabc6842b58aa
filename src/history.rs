//! Persisted history of past conversions: bounded, recency-ordered, stored
//! wholesale under a single key.

use crate::core::Conversion;
use crate::store::{Storage, StorageError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

pub const STORAGE_KEY: &str = "cambio_divisas_history";
pub const MAX_ENTRIES: usize = 20;

/// One saved conversion. Created only by [`HistoryStore::add`], immutable
/// afterwards. Field names stay camelCase on disk to match the storage
/// layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub result: f64,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("could not save the conversion to history")]
    Persist(#[source] StorageError),
    #[error("could not clear the history")]
    Clear(#[source] StorageError),
}

pub struct HistoryStore {
    storage: Arc<dyn Storage>,
}

impl HistoryStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Returns all saved conversions, most recent first.
    ///
    /// Order is a read-time guarantee: storage may hold the records in any
    /// order and gets re-sorted here. Missing or unreadable state is treated
    /// as an empty history, never an error.
    pub fn read(&self) -> Vec<ConversionRecord> {
        let bytes = match self.storage.get(STORAGE_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Could not read history, treating as empty");
                return Vec::new();
            }
        };

        let mut records: Vec<ConversionRecord> = match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Discarding corrupt history");
                return Vec::new();
            }
        };

        // Stable sort: equal timestamps keep their stored (newest-first) order.
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Saves a conversion, stamping it with a fresh id and timestamp.
    ///
    /// The new record is prepended and the list truncated to [`MAX_ENTRIES`]
    /// before the wholesale write, so the least recent entry is the one that
    /// falls off. Nothing is written when persistence fails.
    pub fn add(&self, conversion: &Conversion) -> Result<ConversionRecord, HistoryError> {
        let mut records = self.read();

        let record = ConversionRecord {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            amount: conversion.amount,
            from: conversion.from.clone(),
            to: conversion.to.clone(),
            rate: conversion.rate,
            result: conversion.result,
        };

        records.insert(0, record.clone());
        records.truncate(MAX_ENTRIES);

        let bytes = serde_json::to_vec(&records)
            .map_err(|e| HistoryError::Persist(StorageError::Write(e.to_string())))?;
        self.storage
            .set(STORAGE_KEY, &bytes)
            .map_err(HistoryError::Persist)?;

        debug!(id = %record.id, "Saved conversion to history");
        Ok(record)
    }

    /// Deletes the whole history. Clearing an already-empty store is fine.
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.storage
            .remove(STORAGE_KEY)
            .map_err(HistoryError::Clear)
    }
}
