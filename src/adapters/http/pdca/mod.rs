//! HTTP adapter for the PDCA cycle module.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PdcaAppState;
pub use routes::pdca_router;
