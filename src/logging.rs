//! Logging utilities for the surfsup server.
//!
//! This module provides structured logging functionality to make logs more
//! searchable, analyzable, and useful for production deployments.

use std::time::Instant;
use tracing::{error, info, warn, Level};

use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use uuid::Uuid;

use crate::database::DatasetSummary;
use crate::error::SurfsUpError;

/// Creates the tracing layer for HTTP request/response logging
pub fn create_http_trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
> {
    let response_formatter = DefaultOnResponse::new()
        .level(Level::DEBUG)
        .latency_unit(LatencyUnit::Micros);

    TraceLayer::new_for_http()
        .make_span_with(
            DefaultMakeSpan::new()
                .level(Level::INFO)
                .include_headers(false),
        )
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(response_formatter)
}

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed with warnings"
        );
    }
}

/// Log what the opened dataset contains
pub fn log_dataset_stats(file_path: &str, summary: &DatasetSummary) {
    info!(
        operation = "dataset_load",
        file_path = file_path,
        station_count = summary.station_count,
        measurement_count = summary.measurement_count,
        first_date = summary.first_date.as_deref().unwrap_or("none"),
        last_date = summary.last_date.as_deref().unwrap_or("none"),
        "Dataset opened successfully"
    );
}

/// Log an error with context
pub fn log_error(error: &SurfsUpError, context: &str) {
    error!(
        error = %error,
        context = context,
        "Error occurred"
    );
}

/// Log an error that occurred during request processing.
///
/// Client errors are logged at `warn`; everything else at `error`.
pub fn log_request_error(
    error: &SurfsUpError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) {
    if error.status_code().is_client_error() {
        warn!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            "Rejected request"
        );
    } else {
        error!(
            error = %error,
            endpoint = endpoint,
            request_id = request_id,
            params = params.unwrap_or("none"),
            "Request processing error"
        );
    }
}

/// Generate a unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
