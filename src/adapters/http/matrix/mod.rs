//! HTTP adapter for the alignment matrix module.
//!
//! Exposes the objective/metric/action catalogs and the toggle operation via
//! REST endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::MatrixAppState;
pub use routes::matrix_router;
