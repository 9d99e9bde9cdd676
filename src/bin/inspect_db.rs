use anyhow::{Context, Result};
use std::path::PathBuf;

use surfsup::config::DatabaseConfig;
use surfsup::ClimateDb;

#[tokio::main]
async fn main() -> Result<()> {
    // Path to the dataset, defaulting to the location the server uses
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| DatabaseConfig::default().path);

    println!("Inspecting dataset: {}", path.display());

    let config = DatabaseConfig {
        path,
        max_connections: 1,
    };
    let db = ClimateDb::open(&config)
        .await
        .context("failed to open dataset")?;

    db.validate_schema()
        .await
        .context("dataset does not match the expected schema")?;
    println!("\nSchema: ok (measurement, station)");

    let mut session = db.session().await?;

    let summary = session.dataset_summary().await?;
    println!("\n=== DATASET ===");
    println!("  stations:     {}", summary.station_count);
    println!("  measurements: {}", summary.measurement_count);
    println!(
        "  date range:   {} .. {}",
        summary.first_date.as_deref().unwrap_or("-"),
        summary.last_date.as_deref().unwrap_or("-")
    );

    println!("\nStations:");
    for station in session.stations().await? {
        println!(
            "  {}  {}",
            station.station,
            station.name.as_deref().unwrap_or("-")
        );
    }

    drop(session);
    db.close().await;
    Ok(())
}
