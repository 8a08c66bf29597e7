//! Command and query handlers, grouped by bounded context.

pub mod dependency;
pub mod matrix;
pub mod pdca;
