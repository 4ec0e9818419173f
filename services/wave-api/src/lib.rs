//! GFS Wave API service library.
//!
//! HTTP surface over the ingestion pipeline:
//! - `POST /api/gfs/wind-auto` runs one fetch, crop and store cycle
//! - `GET /api/gfs/wind-direction` reads stored records back by day
//! - `GET /health`, `GET /metrics` for operations

pub mod config;
pub mod handlers;
pub mod server;
pub mod state;
