//! PDCA cycle command and query handlers.

mod complete_phase;
mod create_cycle;
mod queries;

pub use complete_phase::{
    CompletePhaseCommand, CompletePhaseError, CompletePhaseHandler, CompletePhaseResult,
    PhaseCompletedEvent,
};
pub use create_cycle::{
    CreateCycleCommand, CreateCycleError, CreateCycleHandler, CreateCycleResult, CycleCreatedEvent,
};
pub use queries::{GetCycleHandler, ListCyclesHandler};
