//! Precipitation endpoint handler.
//!
//! Returns every precipitation reading from the trailing year of the dataset,
//! keyed by date. The year is measured back from the latest measurement date,
//! not from today.

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
use crate::database::PrecipitationReading;
use crate::dates::{format_date, parse_date, trailing_year_start};
use crate::error::{Result, SurfsUpError};
use crate::logging::generate_request_id;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing precipitation request"
    );

    match trailing_year_precipitation(&state).await {
        Ok(readings) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                date_count = readings.len(),
                "Precipitation request successful"
            );
            Json(readings).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}

async fn trailing_year_precipitation(state: &AppState) -> Result<Map<String, Value>> {
    let mut session = state.db.session().await?;

    let Some(last) = session.max_measurement_date().await? else {
        return Ok(Map::new());
    };
    let last = parse_date(&last).map_err(|_| SurfsUpError::InvalidData {
        message: format!("latest measurement date is not YYYY-MM-DD: {}", last),
    })?;

    let window_start = format_date(trailing_year_start(last));
    let rows = session.precipitation_since(&window_start).await?;

    Ok(fold_by_date(rows))
}

/// Key readings by date. A later reading for the same date replaces an earlier one.
fn fold_by_date(rows: Vec<PrecipitationReading>) -> Map<String, Value> {
    rows.into_iter()
        .map(|reading| (reading.date, Value::from(reading.prcp)))
        .collect()
}
