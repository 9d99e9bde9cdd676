//! Route listing served at `/`.

use axum::response::Html;

/// Paths advertised on the landing page, with placeholders for date segments
pub const API_ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/&lt;start&gt;",
    "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
];

/// Handle GET / requests
pub async fn index_handler() -> Html<String> {
    Html(render_routes())
}

fn render_routes() -> String {
    format!("Available Routes:<br/>{}", API_ROUTES.join("<br/>"))
}
