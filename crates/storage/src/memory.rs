//! In-memory record store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use wave_common::{GridRecord, StoredRecord};

use crate::error::StoreResult;
use crate::record_store::{RecordQuery, RecordStore, WriteMode};

/// Records kept in insertion order behind a lock. Contents are lost on drop.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<StoredRecord>>,
    write_mode: WriteMode,
}

impl MemoryRecordStore {
    pub fn new(write_mode: WriteMode) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            write_mode,
        }
    }

    /// Number of stored records across all variables.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, record: &GridRecord) -> StoreResult<Uuid> {
        record.validate()?;
        let ts = record.timestamp_utc()?;

        let mut records = self.records.write().await;

        if self.write_mode == WriteMode::Upsert {
            let existing = records.iter_mut().find(|s| {
                s.record.variable == record.variable
                    && s.record.timestamp_utc().map_or(false, |t| t == ts)
            });
            if let Some(stored) = existing {
                stored.record = record.clone();
                debug!(id = %stored.id, variable = %record.variable, "Replaced record");
                return Ok(stored.id);
            }
        }

        let id = Uuid::new_v4();
        records.push(StoredRecord {
            id,
            record: record.clone(),
        });
        debug!(id = %id, variable = %record.variable, points = record.data.len(), "Stored record");

        Ok(id)
    }

    async fn query(&self, query: &RecordQuery) -> StoreResult<Vec<StoredRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|s| s.record.variable == query.variable)
            .filter(|s| {
                s.record
                    .timestamp_utc()
                    .map_or(false, |ts| query.contains(&ts))
            })
            .cloned()
            .collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
