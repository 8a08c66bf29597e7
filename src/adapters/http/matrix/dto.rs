//! HTTP DTOs for the alignment matrix endpoints.
//!
//! These types define the JSON request/response structure for the matrix API
//! and are the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ObjectiveId;
use crate::domain::matrix::{
    ActionItem, AlignmentLink, Column, Metric, Objective, ObjectiveKind, Strength,
};

// ────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ────────────────────────────────────────────────────────────────────────────

/// Request to add an objective row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateObjectiveRequest {
    pub kind: ObjectiveKind,
    pub description: String,
}

/// Request to add a metric column.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMetricRequest {
    pub name: String,
    pub target: f64,
    pub unit: String,
}

/// Request to add an improvement action column.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActionRequest {
    pub description: String,
    pub owner: String,
}

/// Request to toggle one matrix cell.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleLinkRequest {
    pub objective_id: ObjectiveId,
    pub column: Column,
}

/// Query parameters for a strength lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct StrengthParams {
    pub objective_id: String,
    pub column_type: String,
    pub column_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ────────────────────────────────────────────────────────────────────────────

/// Response for an objective row.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveResponse {
    pub id: String,
    pub kind: ObjectiveKind,
    pub description: String,
}

impl From<&Objective> for ObjectiveResponse {
    fn from(objective: &Objective) -> Self {
        Self {
            id: objective.id().to_string(),
            kind: objective.kind(),
            description: objective.description().to_string(),
        }
    }
}

/// Response for a metric column.
#[derive(Debug, Clone, Serialize)]
pub struct MetricResponse {
    pub id: String,
    pub name: String,
    pub target: f64,
    pub unit: String,
}

impl From<&Metric> for MetricResponse {
    fn from(metric: &Metric) -> Self {
        Self {
            id: metric.id().to_string(),
            name: metric.name().to_string(),
            target: metric.target(),
            unit: metric.unit().to_string(),
        }
    }
}

/// Response for an improvement action column.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub id: String,
    pub description: String,
    pub owner: String,
}

impl From<&ActionItem> for ActionResponse {
    fn from(action: &ActionItem) -> Self {
        Self {
            id: action.id().to_string(),
            description: action.description().to_string(),
            owner: action.owner().to_string(),
        }
    }
}

/// Response for one matrix cell.
#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub objective_id: String,
    pub column: Column,
    pub strength: Strength,
}

impl From<AlignmentLink> for LinkResponse {
    fn from(link: AlignmentLink) -> Self {
        Self {
            objective_id: link.objective_id.to_string(),
            column: link.column,
            strength: link.strength,
        }
    }
}

/// Response for a toggle: the cell afterwards, or `null` when the toggle
/// removed it.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleLinkResponse {
    pub link: Option<LinkResponse>,
}

/// Response for a strength lookup.
#[derive(Debug, Clone, Serialize)]
pub struct StrengthResponse {
    pub strength: Option<Strength>,
}
