//! Route configuration for alignment matrix endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    add_action, add_metric, add_objective, get_strength, list_links, toggle_link, MatrixAppState,
};

/// Creates the matrix router with all endpoints.
///
/// Routes:
/// - `POST /api/alignment/objectives` - Add an objective row
/// - `POST /api/alignment/metrics` - Add a metric column
/// - `POST /api/alignment/actions` - Add an improvement action column
/// - `POST /api/alignment/toggle` - Cycle one cell's strength
/// - `GET /api/alignment/links` - List all stored cells
/// - `GET /api/alignment/strength` - Look up one cell's strength
pub fn matrix_router() -> Router<MatrixAppState> {
    Router::new()
        .route("/api/alignment/objectives", post(add_objective))
        .route("/api/alignment/metrics", post(add_metric))
        .route("/api/alignment/actions", post(add_action))
        .route("/api/alignment/toggle", post(toggle_link))
        .route("/api/alignment/links", get(list_links))
        .route("/api/alignment/strength", get(get_strength))
}
