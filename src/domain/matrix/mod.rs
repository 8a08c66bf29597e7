//! Relationship matrix - objectives linked to metrics and actions with a
//! cyclable tri-level strength (the Hoshin Kanri X-Matrix core).

mod action;
mod link;
mod matrix;
mod metric;
mod objective;

pub use action::ActionItem;
pub use link::{AlignmentLink, Column, Strength};
pub use matrix::AlignmentMatrix;
pub use metric::Metric;
pub use objective::{Objective, ObjectiveKind};
