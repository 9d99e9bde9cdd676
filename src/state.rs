//! Application state management for surfsup.
//!
//! This module defines the shared state that is passed to all handlers:
//! the resolved configuration and the handle to the dataset.

use crate::config::Config;
use crate::database::ClimateDb;
use crate::error::Result;

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Dataset handle
    pub db: ClimateDb,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config, db: ClimateDb) -> Self {
        Self { config, db }
    }

    /// Open the configured dataset, check its schema and build the state
    pub async fn open(config: Config) -> Result<Self> {
        let db = ClimateDb::open(&config.database).await?;
        db.validate_schema().await?;
        Ok(Self::new(config, db))
    }

    /// Station served by the temperature-observation route
    pub fn tobs_station(&self) -> &str {
        &self.config.observations.station
    }

    /// First date served by the temperature-observation route
    pub fn tobs_since(&self) -> &str {
        &self.config.observations.since
    }
}
