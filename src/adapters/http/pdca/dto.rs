//! HTTP DTOs for PDCA cycle endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::pdca::{CycleStatus, PdcaCycle, PdcaPhase, PhaseRecord};

// ────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ────────────────────────────────────────────────────────────────────────────

/// Request to create a PDCA improvement cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCycleRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub owner: String,
    /// RFC 3339 timestamp.
    pub start_date: Timestamp,
    /// Initiative this cycle tracks, if any. Stored as-is, not verified.
    pub linked_initiative: Option<String>,
}

/// Request to complete the current phase. The phase itself comes from the
/// URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletePhaseRequest {
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub findings: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ────────────────────────────────────────────────────────────────────────────

/// Completion state and evidence for one phase.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseRecordResponse {
    pub completed: bool,
    pub completed_at: Option<String>,
    pub notes: String,
    pub findings: String,
}

impl From<&PhaseRecord> for PhaseRecordResponse {
    fn from(record: &PhaseRecord) -> Self {
        Self {
            completed: record.completed,
            completed_at: record.completed_at.map(|t| t.to_rfc3339()),
            notes: record.notes.clone(),
            findings: record.findings.clone(),
        }
    }
}

/// Response for a PDCA cycle, derived fields included.
#[derive(Debug, Clone, Serialize)]
pub struct CycleResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub owner: String,
    pub start_date: String,
    pub linked_initiative: Option<String>,
    pub plan: PhaseRecordResponse,
    #[serde(rename = "do")]
    pub do_: PhaseRecordResponse,
    pub check: PhaseRecordResponse,
    pub act: PhaseRecordResponse,
    /// First incomplete phase, or `act` once all four are done.
    pub current_phase: PdcaPhase,
    pub status: CycleStatus,
    /// Completed phases over four, in [0.0, 1.0].
    pub progress: f64,
}

impl From<&PdcaCycle> for CycleResponse {
    fn from(cycle: &PdcaCycle) -> Self {
        Self {
            id: cycle.id().to_string(),
            title: cycle.title().to_string(),
            description: cycle.description().to_string(),
            category: cycle.category().to_string(),
            owner: cycle.owner().to_string(),
            start_date: cycle.start_date().to_rfc3339(),
            linked_initiative: cycle.linked_initiative().map(|id| id.to_string()),
            plan: cycle.phase(PdcaPhase::Plan).into(),
            do_: cycle.phase(PdcaPhase::Do).into(),
            check: cycle.phase(PdcaPhase::Check).into(),
            act: cycle.phase(PdcaPhase::Act).into(),
            current_phase: cycle.current_phase(),
            status: cycle.status(),
            progress: cycle.progress(),
        }
    }
}
