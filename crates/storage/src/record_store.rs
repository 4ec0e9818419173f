//! The record store interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wave_common::{GridRecord, StoredRecord};

use crate::error::StoreResult;

/// How repeated inserts for the same `(variable, timestamp)` behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Every insert adds a new record, duplicates included.
    #[default]
    Append,
    /// An insert replaces the record with the same variable and timestamp,
    /// keeping its identifier.
    Upsert,
}

impl std::str::FromStr for WriteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "append" => Ok(WriteMode::Append),
            "upsert" => Ok(WriteMode::Upsert),
            other => Err(format!("unknown write mode '{}', expected append or upsert", other)),
        }
    }
}

/// Records of one variable, optionally restricted to an inclusive time range.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordQuery {
    pub variable: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl RecordQuery {
    /// All records for `variable`.
    pub fn variable(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            start: None,
            end: None,
        }
    }

    /// Restrict to `start..=end`.
    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Whether a record at `ts` falls inside the range.
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| *ts >= s) && self.end.map_or(true, |e| *ts <= e)
    }
}

/// Persists grid records and answers range queries by timestamp.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Validate and persist a record, returning its identifier.
    async fn insert(&self, record: &GridRecord) -> StoreResult<Uuid>;

    /// Records matching `query`, in the backend's natural order.
    async fn query(&self, query: &RecordQuery) -> StoreResult<Vec<StoredRecord>>;

    /// Release connections. The store must not be used afterwards.
    async fn close(&self) {}

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_write_mode_from_str() {
        assert_eq!("append".parse::<WriteMode>().unwrap(), WriteMode::Append);
        assert_eq!("UPSERT".parse::<WriteMode>().unwrap(), WriteMode::Upsert);
        assert!("replace".parse::<WriteMode>().is_err());
    }

    #[test]
    fn test_query_range_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 6, 17, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 6, 17, 23, 59, 59).unwrap();
        let q = RecordQuery::variable("windDirection").between(start, end);

        assert!(q.contains(&start));
        assert!(q.contains(&end));
        assert!(!q.contains(&Utc.with_ymd_and_hms(2025, 6, 18, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_open_query_matches_everything() {
        let q = RecordQuery::variable("windDirection");
        assert!(q.contains(&Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
    }
}
