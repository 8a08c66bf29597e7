//! Application layer: orchestrates domain logic behind command and query
//! handlers, publishing domain events through the configured ports.

pub mod handlers;
