//! Record store backed by PostgreSQL.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use wave_common::{BoundingBox, GridPoint, GridRecord, Resolution, StoredRecord};

use crate::error::{StoreError, StoreResult};
use crate::record_store::{RecordQuery, RecordStore, WriteMode};

/// Connection pool and record operations.
pub struct PgRecordStore {
    pool: PgPool,
    write_mode: WriteMode,
}

impl PgRecordStore {
    /// Create a new store connection from database URL.
    pub async fn connect(database_url: &str, write_mode: WriteMode) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!(write_mode = ?write_mode, "Connected to PostgreSQL record store");

        Ok(Self { pool, write_mode })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> StoreResult<()> {
        // Split SQL statements and execute them individually
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| StoreError::Migration(e.to_string()))?;
            }
        }

        Ok(())
    }

    async fn insert_new(&self, record: &GridRecord, valid_time: DateTime<Utc>) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO grid_records (
                id, variable, timestamp, valid_time,
                bbox, resolution, data, point_count, inserted_at
            ) VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8, $9
            )
            "#,
        )
        .bind(id)
        .bind(&record.variable)
        .bind(&record.timestamp)
        .bind(valid_time)
        .bind(record.bbox.to_array().to_vec())
        .bind(record.resolution.to_array().to_vec())
        .bind(Json(&record.data))
        .bind(record.data.len() as i32)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(id)
    }

    /// Insert or replace the upserted record for the same variable and valid
    /// time. The partial unique index makes this atomic under concurrent
    /// triggers; the existing id is kept on conflict.
    async fn upsert(&self, record: &GridRecord, valid_time: DateTime<Utc>) -> StoreResult<Uuid> {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO grid_records (
                id, variable, timestamp, valid_time,
                bbox, resolution, data, point_count, inserted_at, upserted
            ) VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8, $9, TRUE
            )
            ON CONFLICT (variable, valid_time) WHERE upserted
            DO UPDATE SET
                timestamp = EXCLUDED.timestamp,
                bbox = EXCLUDED.bbox,
                resolution = EXCLUDED.resolution,
                data = EXCLUDED.data,
                point_count = EXCLUDED.point_count,
                inserted_at = EXCLUDED.inserted_at
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&record.variable)
        .bind(&record.timestamp)
        .bind(valid_time)
        .bind(record.bbox.to_array().to_vec())
        .bind(record.resolution.to_array().to_vec())
        .bind(Json(&record.data))
        .bind(record.data.len() as i32)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, record: &GridRecord) -> StoreResult<Uuid> {
        record.validate()?;
        let valid_time = record.timestamp_utc()?;

        let id = match self.write_mode {
            WriteMode::Append => self.insert_new(record, valid_time).await?,
            WriteMode::Upsert => self.upsert(record, valid_time).await?,
        };
        debug!(id = %id, variable = %record.variable, points = record.data.len(), "Stored record");
        Ok(id)
    }

    async fn query(&self, query: &RecordQuery) -> StoreResult<Vec<StoredRecord>> {
        let rows = sqlx::query_as::<_, RecordRow>(
            "SELECT id, variable, timestamp, bbox, resolution, data FROM grid_records \
             WHERE variable = $1 \
             AND ($2::timestamptz IS NULL OR valid_time >= $2) \
             AND ($3::timestamptz IS NULL OR valid_time <= $3) \
             ORDER BY valid_time ASC, inserted_at ASC",
        )
        .bind(&query.variable)
        .bind(query.start)
        .bind(query.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.into_iter().map(StoredRecord::try_from).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Internal row type for database queries.
#[derive(FromRow)]
struct RecordRow {
    id: Uuid,
    variable: String,
    timestamp: String,
    bbox: Vec<f64>,
    resolution: Vec<f64>,
    data: Json<Vec<GridPoint>>,
}

impl TryFrom<RecordRow> for StoredRecord {
    type Error = StoreError;

    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let bbox: [f64; 4] = row.bbox.as_slice().try_into().map_err(|_| {
            StoreError::Query(format!("record {} has {} bbox values", row.id, row.bbox.len()))
        })?;
        let resolution: [f64; 2] = row.resolution.as_slice().try_into().map_err(|_| {
            StoreError::Query(format!(
                "record {} has {} resolution values",
                row.id,
                row.resolution.len()
            ))
        })?;

        Ok(StoredRecord {
            id: row.id,
            record: GridRecord {
                timestamp: row.timestamp,
                variable: row.variable,
                bbox: BoundingBox::from(bbox),
                resolution: Resolution::from(resolution),
                data: row.data.0,
            },
        })
    }
}

/// Database schema SQL.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS grid_records (
    id UUID PRIMARY KEY,
    variable VARCHAR(100) NOT NULL,
    timestamp VARCHAR(40) NOT NULL,
    valid_time TIMESTAMPTZ NOT NULL,
    bbox DOUBLE PRECISION[] NOT NULL,
    resolution DOUBLE PRECISION[] NOT NULL,
    data JSONB NOT NULL,
    point_count INTEGER NOT NULL,
    inserted_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    upserted BOOLEAN NOT NULL DEFAULT FALSE
);

ALTER TABLE grid_records ADD COLUMN IF NOT EXISTS upserted BOOLEAN NOT NULL DEFAULT FALSE;

CREATE INDEX IF NOT EXISTS idx_grid_records_variable_time ON grid_records(variable, valid_time);

-- At most one upserted record per cycle, appended rows are unconstrained
CREATE UNIQUE INDEX IF NOT EXISTS idx_grid_records_upsert
    ON grid_records(variable, valid_time) WHERE upserted;
"#;
