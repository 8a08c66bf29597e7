//! Alignment links - the cells of the X-Matrix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ActionId, MetricId, ObjectiveId};

/// The tri-level weight of a claimed causal link between an objective and a
/// column entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Strong,
    Medium,
    Weak,
}

impl Strength {
    /// Returns the next lower strength, or `None` when a weak link should
    /// be removed. Together with creation at `Strong`, repeated demotion
    /// realizes the 4-state toggle cycle absent→strong→medium→weak→absent.
    pub fn demoted(self) -> Option<Strength> {
        match self {
            Strength::Strong => Some(Strength::Medium),
            Strength::Medium => Some(Strength::Weak),
            Strength::Weak => None,
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strength::Strong => "strong",
            Strength::Medium => "medium",
            Strength::Weak => "weak",
        };
        write!(f, "{}", s)
    }
}

/// A column reference on the matrix: either a metric or an improvement
/// action. The tagged variant replaces an exclusive-or pair of optional id
/// fields, so handling is exhaustive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "column_type", content = "id", rename_all = "snake_case")]
pub enum Column {
    Metric(MetricId),
    Action(ActionId),
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Metric(id) => write!(f, "metric:{}", id),
            Column::Action(id) => write!(f, "action:{}", id),
        }
    }
}

/// One cell of the alignment matrix.
///
/// Referenced ids are never validated against their home collections; a
/// link may dangle after the objective or column entity is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentLink {
    pub objective_id: ObjectiveId,
    pub column: Column,
    pub strength: Strength,
}

impl AlignmentLink {
    /// Creates a fresh link. First toggles always land on `Strong`.
    pub fn new(objective_id: ObjectiveId, column: Column) -> Self {
        Self {
            objective_id,
            column,
            strength: Strength::Strong,
        }
    }

    /// True when this link occupies the given matrix cell.
    pub fn is_cell(&self, objective_id: ObjectiveId, column: Column) -> bool {
        self.objective_id == objective_id && self.column == column
    }
}
