//! Route configuration for dependency graph endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    add_dependency, detect_cycles, list_blocking, list_dependencies, resolve_dependency,
    DependencyAppState,
};

/// Creates the dependency router with all endpoints.
///
/// Routes:
/// - `POST /api/dependencies` - Add a dependency edge
/// - `POST /api/dependencies/:id/resolve` - Resolve an edge (idempotent)
/// - `GET /api/dependencies` - List edges abiding kind/status filters
/// - `GET /api/dependencies/blocking` - List unresolved blocking edges
/// - `GET /api/dependencies/diagnostics/cycles` - Cycle diagnostic
pub fn dependency_router() -> Router<DependencyAppState> {
    Router::new()
        .route("/api/dependencies", post(add_dependency).get(list_dependencies))
        .route("/api/dependencies/:id/resolve", post(resolve_dependency))
        .route("/api/dependencies/blocking", get(list_blocking))
        .route("/api/dependencies/diagnostics/cycles", get(detect_cycles))
}
