//! The four ordered PDCA phases and their per-phase evidence record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::Timestamp;

/// The four phases of a Plan-Do-Check-Act cycle, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdcaPhase {
    Plan,
    Do,
    Check,
    Act,
}

impl PdcaPhase {
    /// Returns all phases in canonical order.
    pub fn all() -> &'static [PdcaPhase] {
        &[PdcaPhase::Plan, PdcaPhase::Do, PdcaPhase::Check, PdcaPhase::Act]
    }

    /// Returns the 0-based index of this phase in the canonical order.
    pub fn order_index(&self) -> usize {
        Self::all()
            .iter()
            .position(|p| p == self)
            .expect("PdcaPhase must be in all() array")
    }

    /// Returns the next phase in order, if any.
    pub fn next(&self) -> Option<PdcaPhase> {
        Self::all().get(self.order_index() + 1).copied()
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PdcaPhase::Plan => "Plan",
            PdcaPhase::Do => "Do",
            PdcaPhase::Check => "Check",
            PdcaPhase::Act => "Act",
        }
    }
}

impl fmt::Display for PdcaPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for PdcaPhase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plan" => Ok(PdcaPhase::Plan),
            "do" => Ok(PdcaPhase::Do),
            "check" => Ok(PdcaPhase::Check),
            "act" => Ok(PdcaPhase::Act),
            other => Err(format!("Unknown PDCA phase: {}", other)),
        }
    }
}

/// Completion state and evidence for one phase of a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub notes: String,
    pub findings: String,
}

impl PhaseRecord {
    /// A fresh, incomplete phase with empty evidence.
    pub fn empty() -> Self {
        Self {
            completed: false,
            completed_at: None,
            notes: String::new(),
            findings: String::new(),
        }
    }
}

impl Default for PhaseRecord {
    fn default() -> Self {
        Self::empty()
    }
}
