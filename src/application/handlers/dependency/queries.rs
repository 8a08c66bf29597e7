//! Read-side handlers for the dependency graph.

use std::sync::Arc;

use crate::domain::dependency::{self, Dependency, DependencyKind, DependencyStatus};
use crate::domain::foundation::{DomainError, InitiativeId};
use crate::ports::CollectionStore;

/// Query over the whole dependency collection with optional kind and status
/// filters. No filter returns everything, resolved edges included.
#[derive(Debug, Clone, Default)]
pub struct ListDependenciesQuery {
    pub kind: Option<DependencyKind>,
    pub status: Option<DependencyStatus>,
}

/// Handler listing dependencies by filter.
pub struct ListDependenciesHandler {
    dependencies: Arc<dyn CollectionStore<Dependency>>,
}

impl ListDependenciesHandler {
    pub fn new(dependencies: Arc<dyn CollectionStore<Dependency>>) -> Self {
        Self { dependencies }
    }

    pub async fn handle(
        &self,
        query: ListDependenciesQuery,
    ) -> Result<Vec<Dependency>, DomainError> {
        let snapshot = self.dependencies.snapshot().await?;
        Ok(snapshot
            .items
            .into_iter()
            .filter(|d| query.kind.map_or(true, |k| d.kind() == k))
            .filter(|d| query.status.map_or(true, |s| d.status() == s))
            .collect())
    }
}

/// Query for active dependencies, optionally restricted to one kind.
#[derive(Debug, Clone, Default)]
pub struct ListActiveQuery {
    pub kind: Option<DependencyKind>,
}

/// Handler listing active dependencies.
pub struct ListActiveHandler {
    dependencies: Arc<dyn CollectionStore<Dependency>>,
}

impl ListActiveHandler {
    pub fn new(dependencies: Arc<dyn CollectionStore<Dependency>>) -> Self {
        Self { dependencies }
    }

    pub async fn handle(&self, query: ListActiveQuery) -> Result<Vec<Dependency>, DomainError> {
        let snapshot = self.dependencies.snapshot().await?;
        Ok(dependency::list_active(&snapshot.items, query.kind)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// Handler listing unresolved precedence constraints (kind Blocks, status
/// Active).
pub struct ListBlockingHandler {
    dependencies: Arc<dyn CollectionStore<Dependency>>,
}

impl ListBlockingHandler {
    pub fn new(dependencies: Arc<dyn CollectionStore<Dependency>>) -> Self {
        Self { dependencies }
    }

    pub async fn handle(&self) -> Result<Vec<Dependency>, DomainError> {
        let snapshot = self.dependencies.snapshot().await?;
        Ok(dependency::list_blocking(&snapshot.items)
            .into_iter()
            .cloned()
            .collect())
    }
}

/// Handler for the cycle diagnostic over active Blocks edges.
///
/// Read-only: the graph may legally contain cycles, this just reports them.
pub struct DetectCyclesHandler {
    dependencies: Arc<dyn CollectionStore<Dependency>>,
}

impl DetectCyclesHandler {
    pub fn new(dependencies: Arc<dyn CollectionStore<Dependency>>) -> Self {
        Self { dependencies }
    }

    pub async fn handle(&self) -> Result<Vec<Vec<InitiativeId>>, DomainError> {
        let snapshot = self.dependencies.snapshot().await?;
        Ok(dependency::detect_cycles(&snapshot.items))
    }
}
