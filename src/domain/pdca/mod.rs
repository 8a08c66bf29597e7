//! PDCA improvement cycles - the four-phase gated state machine.

mod cycle;
mod phase;

pub use cycle::{CycleStatus, PdcaCycle};
pub use phase::{PdcaPhase, PhaseRecord};
