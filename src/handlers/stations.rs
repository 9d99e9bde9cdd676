//! Station listing endpoint handler.

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
use crate::database::Station;
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/stations";

/// Handle GET /api/v1.0/stations requests
pub async fn stations_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing stations request"
    );

    match station_names(&state).await {
        Ok(stations) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                station_count = stations.len(),
                "Stations request successful"
            );
            Json(stations).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

async fn station_names(state: &AppState) -> Result<Map<String, Value>> {
    let rows = state.db.session().await?.stations().await?;
    Ok(fold_by_id(rows))
}

fn fold_by_id(rows: Vec<Station>) -> Map<String, Value> {
    rows.into_iter()
        .map(|station| (station.station, Value::from(station.name)))
        .collect()
}
