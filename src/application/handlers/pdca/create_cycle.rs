//! CreateCycleHandler - command handler for starting a PDCA cycle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommandMetadata, DomainError, EventId, InitiativeId, PdcaCycleId, SerializableDomainEvent,
    Timestamp, ValidationError,
};
use crate::domain::pdca::PdcaCycle;
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to create a PDCA improvement cycle.
///
/// The linked initiative id, if any, is stored as-is; its existence is not
/// verified.
#[derive(Debug, Clone)]
pub struct CreateCycleCommand {
    pub title: String,
    pub description: String,
    pub category: String,
    pub owner: String,
    pub start_date: Timestamp,
    pub linked_initiative: Option<InitiativeId>,
}

/// Result of successfully creating a cycle.
#[derive(Debug, Clone)]
pub struct CreateCycleResult {
    pub cycle: PdcaCycle,
}

/// Event published when a cycle is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleCreatedEvent {
    pub event_id: EventId,
    pub cycle_id: PdcaCycleId,
    pub created_at: Timestamp,
}

domain_event!(
    CycleCreatedEvent,
    event_type = "pdca.cycle_created.v1",
    schema_version = 1,
    aggregate_id = cycle_id,
    aggregate_type = "PdcaCycle",
    occurred_at = created_at,
    event_id = event_id
);

/// Error type for creating a cycle.
#[derive(Debug, Clone)]
pub enum CreateCycleError {
    Validation(ValidationError),
    Domain(DomainError),
}

impl std::fmt::Display for CreateCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateCycleError::Validation(err) => write!(f, "{}", err),
            CreateCycleError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CreateCycleError {}

impl From<ValidationError> for CreateCycleError {
    fn from(err: ValidationError) -> Self {
        CreateCycleError::Validation(err)
    }
}

impl From<DomainError> for CreateCycleError {
    fn from(err: DomainError) -> Self {
        CreateCycleError::Domain(err)
    }
}

/// Handler for creating PDCA cycles.
pub struct CreateCycleHandler {
    cycles: Arc<dyn CollectionStore<PdcaCycle>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateCycleHandler {
    pub fn new(
        cycles: Arc<dyn CollectionStore<PdcaCycle>>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            cycles,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCycleCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateCycleResult, CreateCycleError> {
        let cycle = PdcaCycle::new(
            cmd.title,
            cmd.description,
            cmd.category,
            cmd.owner,
            cmd.start_date,
            cmd.linked_initiative,
        )?;

        let mut snapshot = self.cycles.snapshot().await?;
        snapshot.items.push(cycle.clone());
        self.cycles.commit(snapshot.revision, snapshot.items).await?;

        let event = CycleCreatedEvent {
            event_id: EventId::new(),
            cycle_id: cycle.id(),
            created_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(CreateCycleResult { cycle })
    }
}
