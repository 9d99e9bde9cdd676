//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server.

pub mod heartbeat;
pub mod index;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use index::index_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temperature_range_handler, temperature_since_handler};
pub use tobs::tobs_handler;

use axum::response::{IntoResponse, Response};

use crate::error::SurfsUpError;
use crate::logging::log_request_error;

/// Log a failed request and turn the error into its HTTP response
pub(crate) fn error_response(
    error: SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);
    error.into_response()
}
