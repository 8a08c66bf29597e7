//! Strategic objectives - the row entities of the X-Matrix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ObjectiveId, ValidationError};

/// The planning horizon of an objective in the Hoshin Kanri model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    /// Multi-year strategic target.
    Breakthrough,
    /// One-year target derived from a breakthrough objective.
    Annual,
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectiveKind::Breakthrough => "breakthrough",
            ObjectiveKind::Annual => "annual",
        };
        write!(f, "{}", s)
    }
}

/// A strategic objective row on the alignment matrix.
///
/// Immutable once created. Deleting an objective does not cascade to
/// alignment links; orphaned links are tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    id: ObjectiveId,
    kind: ObjectiveKind,
    description: String,
}

impl Objective {
    /// Creates a new objective with a validated description.
    pub fn new(
        kind: ObjectiveKind,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        Ok(Self {
            id: ObjectiveId::new(),
            kind,
            description,
        })
    }

    pub fn id(&self) -> ObjectiveId {
        self.id
    }

    pub fn kind(&self) -> ObjectiveKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
