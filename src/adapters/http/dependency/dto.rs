//! HTTP DTOs for dependency graph endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::dependency::{Dependency, DependencyKind, DependencyStatus, InitiativeRef};

// ────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ────────────────────────────────────────────────────────────────────────────

/// An initiative endpoint of an edge, as sent by the client. The title is a
/// display snapshot taken at creation time.
#[derive(Debug, Clone, Deserialize)]
pub struct InitiativeRefRequest {
    pub id: String,
    pub title: String,
}

/// Request to add a dependency edge.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDependencyRequest {
    pub from: InitiativeRefRequest,
    pub to: InitiativeRefRequest,
    pub kind: DependencyKind,
    pub description: String,
}

/// Query parameters for listing dependencies.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDependenciesParams {
    pub kind: Option<DependencyKind>,
    pub status: Option<DependencyStatus>,
}

// ────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ────────────────────────────────────────────────────────────────────────────

/// An initiative endpoint of an edge.
#[derive(Debug, Clone, Serialize)]
pub struct InitiativeRefResponse {
    pub id: String,
    pub title: String,
}

impl From<&InitiativeRef> for InitiativeRefResponse {
    fn from(initiative: &InitiativeRef) -> Self {
        Self {
            id: initiative.id.to_string(),
            title: initiative.title.clone(),
        }
    }
}

/// Response for a dependency edge.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyResponse {
    pub id: String,
    pub from: InitiativeRefResponse,
    pub to: InitiativeRefResponse,
    pub kind: DependencyKind,
    pub description: String,
    pub status: DependencyStatus,
    pub created_at: String,
}

impl From<&Dependency> for DependencyResponse {
    fn from(dependency: &Dependency) -> Self {
        Self {
            id: dependency.id().to_string(),
            from: dependency.from().into(),
            to: dependency.to().into(),
            kind: dependency.kind(),
            description: dependency.description().to_string(),
            status: dependency.status(),
            created_at: dependency.created_at().to_rfc3339(),
        }
    }
}

/// Response for resolving a dependency.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveDependencyResponse {
    pub dependency: DependencyResponse,
    /// False when the edge was already resolved and the call was a no-op.
    pub newly_resolved: bool,
}

/// Response for the cycle diagnostic: each inner vector is one cycle through
/// active blocking edges, as initiative ids.
#[derive(Debug, Clone, Serialize)]
pub struct CycleDiagnosticsResponse {
    pub cycles: Vec<Vec<String>>,
}
