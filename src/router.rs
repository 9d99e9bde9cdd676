//! Route table for the surfsup server.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers::{
    heartbeat, heartbeat_handler, index_handler, precipitation_handler, stations_handler,
    temperature_range_handler, temperature_since_handler, tobs_handler,
};
use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the router serving every endpoint over the given state.
///
/// Static paths take precedence over the `:start` capture, so
/// `/api/v1.0/stations` never reaches the aggregate handler.
pub fn build_router(state: Arc<AppState>) -> Router {
    heartbeat::mark_server_start();

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(temperature_since_handler))
        .route("/api/v1.0/:start/:end", get(temperature_range_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
