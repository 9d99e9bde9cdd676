//! # surfsup
//!
//! A small, read-only JSON API over a SQLite climate-observation dataset.
//!
//! The dataset holds two tables: `station` (one row per weather-recording site)
//! and `measurement` (daily precipitation and temperature observations). The
//! server answers four kinds of question about it:
//!
//! - **Precipitation**: every reading from the trailing year of the dataset
//! - **Stations**: every station identifier with its display name
//! - **Temperature observations**: the most active station's last year of readings
//! - **Temperature aggregates**: min/avg/max temperature from a start date,
//!   optionally bounded by an end date
//!
//! ## Architecture
//!
//! - **Storage Layer**: [`database::ClimateDb`] opens the file read-only, checks
//!   the schema at startup and hands out one pooled [`database::Session`] per request
//! - **API Layer**: [`handlers`] run one query each and shape the rows into JSON
//! - **Server**: [`router::build_router`] wires the handlers to their paths

pub mod config;
pub mod database;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;

pub use config::Config;
pub use database::{ClimateDb, DatasetSummary, Session};
pub use error::{Result, SurfsUpError};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_operation_end, log_operation_start, log_request_error,
};
pub use router::build_router;
pub use state::AppState;
