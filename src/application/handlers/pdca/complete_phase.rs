//! CompletePhaseHandler - command handler for gated phase completion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventId, PdcaCycleId, SerializableDomainEvent,
    Timestamp,
};
use crate::domain::pdca::{CycleStatus, PdcaCycle, PdcaPhase};
use crate::domain_event;
use crate::ports::{CollectionStore, EventPublisher};

/// Command to complete one phase of a cycle.
#[derive(Debug, Clone)]
pub struct CompletePhaseCommand {
    pub cycle_id: PdcaCycleId,
    pub phase: PdcaPhase,
    pub notes: String,
    pub findings: String,
}

/// Result of successfully completing a phase.
#[derive(Debug, Clone)]
pub struct CompletePhaseResult {
    pub cycle: PdcaCycle,
}

/// Event published when a phase is completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseCompletedEvent {
    pub event_id: EventId,
    pub cycle_id: PdcaCycleId,
    pub phase: PdcaPhase,
    /// Cycle status after the completion; Completed when Act was the phase.
    pub status: CycleStatus,
    pub completed_at: Timestamp,
}

domain_event!(
    PhaseCompletedEvent,
    event_type = "pdca.phase_completed.v1",
    schema_version = 1,
    aggregate_id = cycle_id,
    aggregate_type = "PdcaCycle",
    occurred_at = completed_at,
    event_id = event_id
);

/// Error type for completing a phase.
#[derive(Debug, Clone)]
pub enum CompletePhaseError {
    /// No cycle with the given id exists.
    NotFound(PdcaCycleId),
    /// The phase is not the current one (skipped ahead or already done).
    InvalidTransition(DomainError),
    /// Storage or publishing failure.
    Domain(DomainError),
}

impl std::fmt::Display for CompletePhaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletePhaseError::NotFound(id) => write!(f, "Cycle not found: {}", id),
            CompletePhaseError::InvalidTransition(err) => write!(f, "{}", err),
            CompletePhaseError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CompletePhaseError {}

impl From<DomainError> for CompletePhaseError {
    fn from(err: DomainError) -> Self {
        if err.code == ErrorCode::InvalidPhaseTransition {
            CompletePhaseError::InvalidTransition(err)
        } else {
            CompletePhaseError::Domain(err)
        }
    }
}

/// Handler for completing phases.
pub struct CompletePhaseHandler {
    cycles: Arc<dyn CollectionStore<PdcaCycle>>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CompletePhaseHandler {
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
        cmd: CompletePhaseCommand,
        metadata: CommandMetadata,
    ) -> Result<CompletePhaseResult, CompletePhaseError> {
        let mut snapshot = self.cycles.snapshot().await?;

        let cycle = snapshot
            .items
            .iter_mut()
            .find(|c| c.id() == cmd.cycle_id)
            .ok_or(CompletePhaseError::NotFound(cmd.cycle_id))?;

        // Gating happens in the aggregate; a rejected transition means
        // nothing is committed and the stored cycle is untouched.
        cycle.complete_phase(cmd.phase, cmd.notes, cmd.findings)?;
        let cycle = cycle.clone();

        self.cycles.commit(snapshot.revision, snapshot.items).await?;

        let event = PhaseCompletedEvent {
            event_id: EventId::new(),
            cycle_id: cycle.id(),
            phase: cmd.phase,
            status: cycle.status(),
            completed_at: Timestamp::now(),
        };
        let envelope = event
            .to_envelope()
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string());
        self.event_publisher.publish(envelope).await?;

        Ok(CompletePhaseResult { cycle })
    }
}
