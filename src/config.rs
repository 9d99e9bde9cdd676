//! Configuration management for surfsup.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dates::{format_date, parse_date};
use crate::error::{Result, SurfsUpError};

/// Command-line arguments for surfsup
#[derive(Parser, Debug, Default)]
#[command(name = "surfsup")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the SQLite dataset to serve
    #[arg(env = "SURFSUP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Host address to bind to
    #[arg(short = 'H', long, env = "SURFSUP_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SURFSUP_PORT")]
    pub port: Option<u16>,

    /// Number of worker threads
    #[arg(short, long, env = "SURFSUP_WORKERS")]
    pub workers: Option<usize>,

    /// Maximum number of pooled database connections
    #[arg(long, env = "SURFSUP_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,

    /// Station whose observations are served by /api/v1.0/tobs
    #[arg(long, env = "SURFSUP_TOBS_STATION")]
    pub tobs_station: Option<String>,

    /// First date (YYYY-MM-DD) served by /api/v1.0/tobs
    #[arg(long, env = "SURFSUP_TOBS_SINCE")]
    pub tobs_since: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "SURFSUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SURFSUP_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads (None = number of CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Dataset location and pool sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite file
    #[serde(default = "default_database_path")]
    pub path: PathBuf,

    /// Upper bound on concurrently open connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// The fixed station and cutoff behind the temperature-observation route.
///
/// These describe the most active station's last year of data. They are not
/// derived from the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationConfig {
    #[serde(default = "default_tobs_station")]
    pub station: String,

    #[serde(default = "default_tobs_since")]
    pub since: String,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Temperature observation route settings
    #[serde(default)]
    pub observations: ObservationConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build a configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults, then layer the JSON file on top
        let mut config = match &args.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Config::default(),
        };

        config.apply_args(args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Override settings with whatever was given on the command line or in the environment
    fn apply_args(&mut self, args: Args) {
        if let Some(path) = args.database {
            self.database.path = path;
        }
        if let Some(host) = args.host {
            self.server.host = host;
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if args.workers.is_some() {
            self.server.workers = args.workers;
        }
        if let Some(max_connections) = args.max_connections {
            self.database.max_connections = max_connections;
        }
        if let Some(station) = args.tobs_station {
            self.observations.station = station;
        }
        if let Some(since) = args.tobs_since {
            self.observations.since = since;
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(SurfsUpError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // 0 would ask the OS for an ephemeral port
        if self.server.port == 0 {
            return Err(SurfsUpError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.workers == Some(0) {
            return Err(SurfsUpError::Config {
                message: "Worker thread count cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(SurfsUpError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.database.max_connections == 0 {
            return Err(SurfsUpError::Config {
                message: "Database max_connections must be at least 1".to_string(),
            });
        }

        if self.observations.station.trim().is_empty() {
            return Err(SurfsUpError::Config {
                message: "Observation station cannot be empty".to_string(),
            });
        }

        // The cutoff is compared against stored text, so it must already be canonical
        let canonical = parse_date(&self.observations.since).map(format_date);
        if canonical.ok().as_deref() != Some(self.observations.since.as_str()) {
            return Err(SurfsUpError::Config {
                message: format!(
                    "Invalid observation cutoff date: {}. Expected YYYY-MM-DD",
                    self.observations.since
                ),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            observations: ObservationConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            station: default_tobs_station(),
            since: default_tobs_since(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("Resources/hawaii.sqlite")
}

fn default_max_connections() -> u32 {
    5
}

fn default_tobs_station() -> String {
    "USC00519281".to_string()
}

fn default_tobs_since() -> String {
    "2016-08-23".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
