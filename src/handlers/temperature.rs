//! Temperature aggregate endpoint handlers.
//!
//! `/api/v1.0/:start` aggregates every measurement on or after `start`;
//! `/api/v1.0/:start/:end` also bounds the range at `end` (inclusive). Both
//! respond with `min_temperature`, `avg_temperature` and `max_temperature`,
//! which are all null when no measurement falls in the range. A reversed range
//! is not an error, it simply matches nothing.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::error_response;
use crate::database::TemperatureStats;
use crate::dates::{format_date, parse_date};
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::state::AppState;

const SINCE_ENDPOINT: &str = "/api/v1.0/:start";
const RANGE_ENDPOINT: &str = "/api/v1.0/:start/:end";

/// Handle GET /api/v1.0/:start requests
pub async fn temperature_since_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    let params = format!("start={}", start);
    aggregate(&state, SINCE_ENDPOINT, &params, &start, None).await
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn temperature_range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    let params = format!("start={}, end={}", start, end);
    aggregate(&state, RANGE_ENDPOINT, &params, &start, Some(&end)).await
}

async fn aggregate(
    state: &AppState,
    endpoint: &str,
    params: &str,
    start: &str,
    end: Option<&str>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = endpoint,
        request_id = %request_id,
        params = params,
        "Processing temperature aggregate request"
    );

    match temperature_stats(state, start, end).await {
        Ok(stats) => {
            info!(
                endpoint = endpoint,
                request_id = %request_id,
                duration_us = start_time.elapsed().as_micros() as u64,
                matched = stats.min_temperature.is_some(),
                "Temperature aggregate request successful"
            );
            Json(stats).into_response()
        }
        Err(error) => error_response(error, endpoint, &request_id, Some(params)),
    }
}

/// Validate both bounds before touching the dataset
async fn temperature_stats(
    state: &AppState,
    start: &str,
    end: Option<&str>,
) -> Result<TemperatureStats> {
    let start = format_date(parse_date(start)?);
    let end = end.map(parse_date).transpose()?.map(format_date);

    let mut session = state.db.session().await?;
    session.temperature_stats(&start, end.as_deref()).await
}
