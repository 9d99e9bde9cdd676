//! Temperature observation endpoint handler.
//!
//! Returns the observations of the configured station from the configured
//! cutoff onward, as a list of single-entry `{date: tobs}` objects.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::database::TemperatureReading;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        station = state.tobs_station(),
        since = state.tobs_since(),
        "Processing temperature observation request"
    );

    match station_observations(&state).await {
        Ok(observations) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                observation_count = observations.len(),
                "Temperature observation request successful"
            );
            Json(observations).into_response()
        }
        Err(error) => {
            let params = format!("station={}, since={}", state.tobs_station(), state.tobs_since());
            error_response(error, ENDPOINT, &request_id, Some(&params))
        }
    }
}

async fn station_observations(state: &AppState) -> Result<Vec<Value>> {
    let rows = state
        .db
        .session()
        .await?
        .temperature_observations(state.tobs_station(), state.tobs_since())
        .await?;
    Ok(to_single_entry_objects(rows))
}

/// One `{date: tobs}` object per row; duplicate dates stay separate entries
fn to_single_entry_objects(rows: Vec<TemperatureReading>) -> Vec<Value> {
    rows.into_iter()
        .map(|reading| {
            let mut entry = Map::with_capacity(1);
            entry.insert(reading.date, Value::from(reading.tobs));
            Value::Object(entry)
        })
        .collect()
}
