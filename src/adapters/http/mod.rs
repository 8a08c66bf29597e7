//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod auth;
pub mod dependency;
pub mod error;
pub mod matrix;
pub mod pdca;

pub use auth::AuthenticatedUser;
pub use dependency::{dependency_router, DependencyAppState};
pub use error::ErrorResponse;
pub use matrix::{matrix_router, MatrixAppState};
pub use pdca::{pdca_router, PdcaAppState};
