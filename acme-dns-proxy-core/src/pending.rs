//! Present/cleanup correlation store

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};

/// Vendor-side record created by a successful present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    pub record_id: String,
    /// Zone the record was created in (canonical form).
    pub zone: String,
}

/// Pending records keyed by encoded key authorization.
///
/// Each gateway owns one store. The lock is held only for the map operation.
#[derive(Debug, Default)]
pub struct PendingRecordStore {
    records: Mutex<HashMap<String, PendingRecord>>,
}

impl PendingRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `key`, returning the replaced entry.
    pub async fn insert(&self, key: &str, record: PendingRecord) -> Option<PendingRecord> {
        self.records.lock().await.insert(key.to_string(), record)
    }

    /// Remove and return the entry for `key`.
    pub async fn take_and_remove(&self, key: &str) -> CoreResult<PendingRecord> {
        self.records
            .lock()
            .await
            .remove(key)
            .ok_or_else(|| CoreError::NoPendingRecord(key.to_string()))
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.records.lock().await.contains_key(key)
    }
}
