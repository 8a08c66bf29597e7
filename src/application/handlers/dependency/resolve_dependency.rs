//! ResolveDependencyHandler - command handler for the Active→Resolved
//! transition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::dependency::Dependency;
use crate::domain::foundation::{
    CommandMetadata, DependencyId, DomainError, ErrorCode, EventId, SerializableDomainEvent,
    Timestamp,
};
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to resolve a dependency.
#[derive(Debug, Clone)]
pub struct ResolveDependencyCommand {
    pub dependency_id: DependencyId,
}

/// Result of resolving a dependency.
#[derive(Debug, Clone)]
pub struct ResolveDependencyResult {
    pub dependency: Dependency,
    /// False when the dependency was already resolved and the call was a
    /// no-op.
    pub newly_resolved: bool,
}

/// Event published when a dependency transitions to resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyResolvedEvent {
    pub event_id: EventId,
    pub dependency_id: DependencyId,
    pub resolved_at: Timestamp,
}

domain_event!(
    DependencyResolvedEvent,
    event_type = "dependency.resolved.v1",
    schema_version = 1,
    aggregate_id = dependency_id,
    aggregate_type = "Dependency",
    occurred_at = resolved_at,
    event_id = event_id
);

/// Error type for resolving a dependency.
#[derive(Debug, Clone)]
pub enum ResolveDependencyError {
    /// No dependency with the given id exists.
    NotFound(DependencyId),
    /// Storage or publishing failure.
    Domain(DomainError),
}

impl std::fmt::Display for ResolveDependencyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveDependencyError::NotFound(id) => write!(f, "Dependency not found: {}", id),
            ResolveDependencyError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ResolveDependencyError {}

impl From<DomainError> for ResolveDependencyError {
    fn from(err: DomainError) -> Self {
        ResolveDependencyError::Domain(err)
    }
}

/// Handler for resolving dependencies.
pub struct ResolveDependencyHandler {
    dependencies: Arc<dyn CollectionStore<Dependency>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ResolveDependencyHandler {
    pub fn new(
        dependencies: Arc<dyn CollectionStore<Dependency>>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            dependencies,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ResolveDependencyCommand,
        metadata: CommandMetadata,
    ) -> Result<ResolveDependencyResult, ResolveDependencyError> {
        let mut snapshot = self.dependencies.snapshot().await?;

        let dependency = snapshot
            .items
            .iter_mut()
            .find(|d| d.id() == cmd.dependency_id)
            .ok_or(ResolveDependencyError::NotFound(cmd.dependency_id))?;

        let newly_resolved = dependency.is_active();
        dependency.resolve();
        let dependency = dependency.clone();

        // An already-resolved dependency is committed unchanged; the call
        // stays a no-op rather than an error.
        self.dependencies
            .commit(snapshot.revision, snapshot.items)
            .await?;

        if newly_resolved {
            let event = DependencyResolvedEvent {
                event_id: EventId::new(),
                dependency_id: dependency.id(),
                resolved_at: Timestamp::now(),
            };
            let envelope = event
                .to_envelope()
                .with_correlation_id(metadata.correlation_id())
                .with_user_id(metadata.user_id.to_string());
            self.event_publisher.publish(envelope).await?;
        }

        Ok(ResolveDependencyResult {
            dependency,
            newly_resolved,
        })
    }
}

impl ResolveDependencyError {
    /// The matching domain error code, useful at the HTTP boundary.
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveDependencyError::NotFound(_) => ErrorCode::DependencyNotFound,
            ResolveDependencyError::Domain(err) => err.code,
        }
    }
}
