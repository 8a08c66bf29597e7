//! Dependency graph - typed, directed edges between initiatives.

#[allow(clippy::module_inception)]
mod dependency;
mod graph;

pub use dependency::{Dependency, DependencyKind, DependencyStatus, InitiativeRef};
pub use graph::{detect_cycles, list_active, list_blocking};
