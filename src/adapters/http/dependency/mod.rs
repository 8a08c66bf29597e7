//! HTTP adapter for the dependency graph module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::DependencyAppState;
pub use routes::dependency_router;
