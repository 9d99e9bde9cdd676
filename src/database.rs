//! Read-only access to the climate dataset.
//!
//! The dataset is a single SQLite file holding two tables, `measurement` and
//! `station`. [`ClimateDb`] owns the connection pool and is shared by every
//! handler; each request borrows one pooled connection through a [`Session`],
//! which hands it back to the pool when dropped.

use serde::Serialize;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, Sqlite};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::{Result, SurfsUpError};
use crate::logging::{log_operation_end, log_operation_start};

/// Columns each table must expose for the routes to work
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("measurement", &["station", "date", "prcp", "tobs"]),
    ("station", &["station", "name"]),
];

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// One weather-recording site
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
}

/// Precipitation recorded on one date; `None` when the station reported nothing
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

/// Temperature observed on one date; `None` when the row holds no reading
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: Option<f64>,
}

/// Aggregate temperatures over a date range. All fields are `None` when no rows match.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TemperatureStats {
    pub min_temperature: Option<f64>,
    pub avg_temperature: Option<f64>,
    pub max_temperature: Option<f64>,
}

/// Size and time span of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct DatasetSummary {
    pub station_count: i64,
    pub measurement_count: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

/// Shared handle to the dataset file
#[derive(Debug, Clone)]
pub struct ClimateDb {
    pool: SqlitePool,
    path: PathBuf,
}

impl ClimateDb {
    /// Open the dataset read-only. The file must already exist.
    pub async fn open(config: &DatabaseConfig) -> Result<Self> {
        let start_time = Instant::now();
        let path_display = config.path.display().to_string();
        log_operation_start("database_open", Some(path_display.as_str()));

        if !config.path.exists() {
            log_operation_end("database_open", start_time, false);
            return Err(SurfsUpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dataset not found: {}", path_display),
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .read_only(true)
            .create_if_missing(false);

        let pool = match SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                log_operation_end("database_open", start_time, false);
                return Err(e.into());
            }
        };

        log_operation_end("database_open", start_time, true);

        Ok(Self {
            pool,
            path: config.path.clone(),
        })
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that both tables exist and carry every column the routes read
    pub async fn validate_schema(&self) -> Result<()> {
        let mut session = self.session().await?;

        for (table, columns) in REQUIRED_COLUMNS {
            let present = session.table_columns(table).await?;
            if present.is_empty() {
                return Err(SurfsUpError::Schema {
                    message: format!("table {} not found in {}", table, self.path.display()),
                });
            }

            for column in columns.iter() {
                if !present.iter().any(|name| name.eq_ignore_ascii_case(column)) {
                    return Err(SurfsUpError::Schema {
                        message: format!("table {} is missing column {}", table, column),
                    });
                }
            }

            debug!(table = table, columns = ?present, "Table schema validated");
        }

        Ok(())
    }

    /// Borrow a connection for the duration of one request
    pub async fn session(&self) -> Result<Session> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A single pooled connection scoped to one request
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    async fn table_columns(&mut self, table: &str) -> Result<Vec<String>> {
        let columns = sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1)")
            .bind(table)
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(columns)
    }

    /// Latest measurement date, or `None` for an empty table
    pub async fn max_measurement_date(&mut self) -> Result<Option<String>> {
        let date = sqlx::query_scalar::<_, Option<String>>("SELECT MAX(date) FROM measurement")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(date)
    }

    /// Every precipitation reading on or after `start`, oldest first
    pub async fn precipitation_since(&mut self, start: &str) -> Result<Vec<PrecipitationReading>> {
        let rows = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, CAST(prcp AS REAL) AS prcp FROM measurement \
             WHERE date >= ?1 ORDER BY date, station",
        )
        .bind(start)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// All stations
    pub async fn stations(&mut self) -> Result<Vec<Station>> {
        let rows = sqlx::query_as::<_, Station>("SELECT station, name FROM station ORDER BY station")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(rows)
    }

    /// Temperature readings of one station on or after `since`, oldest first
    pub async fn temperature_observations(
        &mut self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TemperatureReading>> {
        let rows = sqlx::query_as::<_, TemperatureReading>(
            "SELECT date, CAST(tobs AS REAL) AS tobs FROM measurement \
             WHERE station = ?1 AND date >= ?2 ORDER BY date",
        )
        .bind(station)
        .bind(since)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Min/avg/max temperature for `start <= date` and, when given, `date <= end`
    pub async fn temperature_stats(
        &mut self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats> {
        const SELECT: &str = "SELECT CAST(MIN(tobs) AS REAL) AS min_temperature, \
             AVG(tobs) AS avg_temperature, \
             CAST(MAX(tobs) AS REAL) AS max_temperature \
             FROM measurement WHERE date >= ?1";

        let stats = match end {
            Some(end) => {
                let sql = format!("{} AND date <= ?2", SELECT);
                sqlx::query_as::<_, TemperatureStats>(&sql)
                    .bind(start)
                    .bind(end)
                    .fetch_one(&mut *self.conn)
                    .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureStats>(SELECT)
                    .bind(start)
                    .fetch_one(&mut *self.conn)
                    .await?
            }
        };

        Ok(stats)
    }

    /// Row counts and date span of the dataset
    pub async fn dataset_summary(&mut self) -> Result<DatasetSummary> {
        let summary = sqlx::query_as::<_, DatasetSummary>(
            "SELECT (SELECT COUNT(*) FROM station) AS station_count, \
             COUNT(*) AS measurement_count, \
             MIN(date) AS first_date, \
             MAX(date) AS last_date \
             FROM measurement",
        )
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(summary)
    }
}
