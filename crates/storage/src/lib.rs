//! Storage abstractions for cropped grid records.
//!
//! Provides one interface, [`RecordStore`], with two backends:
//! - PostgreSQL (`PgRecordStore`) for deployments
//! - In-memory (`MemoryRecordStore`) for development and tests
//!
//! Stores are opened once at startup and handed to every pipeline run.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record_store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryRecordStore;
pub use postgres::PgRecordStore;
pub use record_store::{RecordQuery, RecordStore, WriteMode};
