//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types, and event
//! infrastructure that form the vocabulary of the True North domain.

mod command;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{
    ActionId, DependencyId, InitiativeId, MetricId, ObjectiveId, PdcaCycleId, UserId,
};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
