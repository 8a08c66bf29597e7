//! Domain layer - pure model with no IO.

pub mod dependency;
pub mod foundation;
pub mod matrix;
pub mod pdca;
