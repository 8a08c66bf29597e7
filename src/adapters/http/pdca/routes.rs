//! Route configuration for PDCA cycle endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{complete_phase, create_cycle, get_cycle, list_cycles, PdcaAppState};

/// Creates the PDCA router with all endpoints.
///
/// Routes:
/// - `POST /api/pdca-cycles` - Create an improvement cycle
/// - `GET /api/pdca-cycles` - List all cycles
/// - `GET /api/pdca-cycles/:id` - Fetch one cycle
/// - `POST /api/pdca-cycles/:id/phases/:phase/complete` - Complete the
///   current phase
pub fn pdca_router() -> Router<PdcaAppState> {
    Router::new()
        .route("/api/pdca-cycles", post(create_cycle).get(list_cycles))
        .route("/api/pdca-cycles/:id", get(get_cycle))
        .route(
            "/api/pdca-cycles/:id/phases/:phase/complete",
            post(complete_phase),
        )
}
