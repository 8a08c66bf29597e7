//! Dependency graph command and query handlers.

mod add_dependency;
mod queries;
mod resolve_dependency;

pub use add_dependency::{
    AddDependencyCommand, AddDependencyError, AddDependencyHandler, AddDependencyResult,
    DependencyAddedEvent,
};
pub use queries::{
    DetectCyclesHandler, ListActiveHandler, ListActiveQuery, ListBlockingHandler,
    ListDependenciesHandler, ListDependenciesQuery,
};
pub use resolve_dependency::{
    DependencyResolvedEvent, ResolveDependencyCommand, ResolveDependencyError,
    ResolveDependencyHandler, ResolveDependencyResult,
};
