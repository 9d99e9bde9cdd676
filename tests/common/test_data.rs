//! Test data generation utilities.
//!
//! This module builds small SQLite datasets shaped like the real climate file
//! (`measurement` and `station` tables) with known contents.

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;

type Result<T> = std::result::Result<T, sqlx::Error>;

/// Station used by the temperature observation route
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// Latest measurement date in the sample dataset
pub const LAST_DATE: &str = "2017-08-23";

/// (station, name); a NULL name must come back as JSON null
pub const STATIONS: &[(&str, Option<&str>)] = &[
    ("USC00513117", Some("KANEOHE 838.1, HI US")),
    ("USC00517948", None),
    ("USC00519281", Some("WAIHEE 837.5, HI US")),
    ("USC00519397", Some("WAIKIKI 717.2, HI US")),
];

/// (station, date, prcp, tobs)
pub const MEASUREMENTS: &[(&str, &str, Option<f64>, f64)] = &[
    ("USC00519397", "2010-01-01", Some(0.08), 65.0),
    ("USC00519281", "2016-08-22", Some(0.4), 78.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519397", "2016-08-23", Some(0.0), 81.0),
    ("USC00513117", "2017-01-15", None, 70.0),
    ("USC00519281", "2017-08-18", Some(0.06), 79.0),
    ("USC00519281", "2017-08-23", Some(0.45), 76.0),
    ("USC00519397", "2017-08-23", Some(0.0), 81.0),
];

async fn create_tables(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        "CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT,
            date TEXT,
            prcp FLOAT,
            tobs FLOAT
        )",
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        "CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )",
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn connect(path: &Path) -> Result<SqliteConnection> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    SqliteConnection::connect_with(&options).await
}

/// Creates the sample dataset described by [`STATIONS`] and [`MEASUREMENTS`].
pub async fn create_sample_dataset(path: &Path) -> Result<()> {
    let mut conn = connect(path).await?;
    create_tables(&mut conn).await?;

    for (station, name) in STATIONS {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) \
             VALUES (?1, ?2, 21.3, -157.8, 3.0)",
        )
        .bind(*station)
        .bind(*name)
        .execute(&mut conn)
        .await?;
    }

    for (station, date, prcp, tobs) in MEASUREMENTS {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&mut conn)
            .await?;
    }

    conn.close().await
}

/// Creates a dataset with both tables but no rows.
pub async fn create_empty_dataset(path: &Path) -> Result<()> {
    let mut conn = connect(path).await?;
    create_tables(&mut conn).await?;
    conn.close().await
}

/// Creates a dataset whose `station` table lacks the `name` column.
pub async fn create_dataset_missing_column(path: &Path) -> Result<()> {
    let mut conn = connect(path).await?;
    sqlx::query("CREATE TABLE measurement (station TEXT, date TEXT, prcp FLOAT, tobs FLOAT)")
        .execute(&mut conn)
        .await?;
    sqlx::query("CREATE TABLE station (station TEXT)")
        .execute(&mut conn)
        .await?;
    conn.close().await
}
