//! The PDCA improvement-cycle aggregate.

use serde::{Deserialize, Serialize};

use super::{PdcaPhase, PhaseRecord};
use crate::domain::foundation::{
    DomainError, ErrorCode, InitiativeId, PdcaCycleId, StateMachine, Timestamp, ValidationError,
};

/// Overall cycle status, derived from phase completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleStatus {
    OnTrack,
    Completed,
}

impl StateMachine for CycleStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (CycleStatus::OnTrack, CycleStatus::Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            CycleStatus::OnTrack => vec![CycleStatus::Completed],
            CycleStatus::Completed => vec![],
        }
    }
}

/// A four-phase improvement cycle with gated progression.
///
/// `current_phase` and `status` are computed from the four phase records
/// rather than stored, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdcaCycle {
    id: PdcaCycleId,
    title: String,
    description: String,
    category: String,
    owner: String,
    start_date: Timestamp,
    plan: PhaseRecord,
    #[serde(rename = "do")]
    do_: PhaseRecord,
    check: PhaseRecord,
    act: PhaseRecord,
    linked_initiative: Option<InitiativeId>,
}

impl PdcaCycle {
    /// Creates a cycle with all four phases incomplete.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        owner: impl Into<String>,
        start_date: Timestamp,
        linked_initiative: Option<InitiativeId>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        let owner = owner.into();
        if owner.trim().is_empty() {
            return Err(ValidationError::empty_field("owner"));
        }
        Ok(Self {
            id: PdcaCycleId::new(),
            title,
            description,
            category: category.into(),
            owner,
            start_date,
            plan: PhaseRecord::empty(),
            do_: PhaseRecord::empty(),
            check: PhaseRecord::empty(),
            act: PhaseRecord::empty(),
            linked_initiative,
        })
    }

    pub fn id(&self) -> PdcaCycleId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn start_date(&self) -> Timestamp {
        self.start_date
    }

    pub fn linked_initiative(&self) -> Option<InitiativeId> {
        self.linked_initiative
    }

    /// The evidence record for a phase.
    pub fn phase(&self, phase: PdcaPhase) -> &PhaseRecord {
        match phase {
            PdcaPhase::Plan => &self.plan,
            PdcaPhase::Do => &self.do_,
            PdcaPhase::Check => &self.check,
            PdcaPhase::Act => &self.act,
        }
    }

    fn phase_mut(&mut self, phase: PdcaPhase) -> &mut PhaseRecord {
        match phase {
            PdcaPhase::Plan => &mut self.plan,
            PdcaPhase::Do => &mut self.do_,
            PdcaPhase::Check => &mut self.check,
            PdcaPhase::Act => &mut self.act,
        }
    }

    /// First incomplete phase, or Act once everything is complete.
    pub fn current_phase(&self) -> PdcaPhase {
        PdcaPhase::all()
            .iter()
            .copied()
            .find(|p| !self.phase(*p).completed)
            .unwrap_or(PdcaPhase::Act)
    }

    /// Completed exactly when the Act phase is complete.
    pub fn status(&self) -> CycleStatus {
        if self.act.completed {
            CycleStatus::Completed
        } else {
            CycleStatus::OnTrack
        }
    }

    /// Fraction of completed phases, 0.0 to 1.0.
    pub fn progress(&self) -> f64 {
        let completed = PdcaPhase::all()
            .iter()
            .filter(|p| self.phase(**p).completed)
            .count();
        completed as f64 / PdcaPhase::all().len() as f64
    }

    /// Completes the current phase, recording its evidence.
    ///
    /// Only the current phase may be completed: no skipping ahead and no
    /// redoing a completed phase. On failure the cycle is unchanged.
    pub fn complete_phase(
        &mut self,
        phase: PdcaPhase,
        notes: impl Into<String>,
        findings: impl Into<String>,
    ) -> Result<(), DomainError> {
        let current = self.current_phase();
        if phase != current || self.phase(phase).completed {
            return Err(DomainError::new(
                ErrorCode::InvalidPhaseTransition,
                format!(
                    "Cannot complete phase {}: current phase is {}",
                    phase, current
                ),
            )
            .with_detail("attempted", phase.to_string())
            .with_detail("current", current.to_string()));
        }

        let record = self.phase_mut(phase);
        record.completed = true;
        record.completed_at = Some(Timestamp::now());
        record.notes = notes.into();
        record.findings = findings.into();
        Ok(())
    }
}
