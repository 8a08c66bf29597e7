//! Dependency edges between initiatives.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{
    DependencyId, InitiativeId, StateMachine, Timestamp, ValidationError,
};

/// The semantics of a directed edge between two initiatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// The source initiative must finish before the target can proceed.
    Blocks,
    /// The source initiative makes the target possible or easier.
    Enables,
    /// The source initiative produces information the target consumes.
    Informs,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DependencyKind::Blocks => "blocks",
            DependencyKind::Enables => "enables",
            DependencyKind::Informs => "informs",
        };
        write!(f, "{}", s)
    }
}

/// Resolution lifecycle of a dependency. Monotone: once resolved, never
/// reopened by this engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    Active,
    Resolved,
}

impl StateMachine for DependencyStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (DependencyStatus::Active, DependencyStatus::Resolved)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            DependencyStatus::Active => vec![DependencyStatus::Resolved],
            DependencyStatus::Resolved => vec![],
        }
    }
}

/// An initiative reference with its title captured at creation time.
///
/// The title is a denormalized snapshot; later title edits on the
/// initiative itself are deliberately not reflected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiativeRef {
    pub id: InitiativeId,
    pub title: String,
}

impl InitiativeRef {
    pub fn new(id: InitiativeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A typed, directed dependency edge between two initiatives.
///
/// The referenced initiative ids are never checked for existence; the
/// graph may reference initiatives that were deleted elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    id: DependencyId,
    from: InitiativeRef,
    to: InitiativeRef,
    kind: DependencyKind,
    description: String,
    status: DependencyStatus,
    created_at: Timestamp,
}

impl Dependency {
    /// Creates an active dependency. Rejects self-loops and empty
    /// descriptions.
    pub fn new(
        from: InitiativeRef,
        to: InitiativeRef,
        kind: DependencyKind,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if from.id == to.id {
            return Err(ValidationError::self_reference("dependency"));
        }
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        Ok(Self {
            id: DependencyId::new(),
            from,
            to,
            kind,
            description,
            status: DependencyStatus::Active,
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> DependencyId {
        self.id
    }

    pub fn from(&self) -> &InitiativeRef {
        &self.from
    }

    pub fn to(&self) -> &InitiativeRef {
        &self.to
    }

    pub fn kind(&self) -> DependencyKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> DependencyStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_active(&self) -> bool {
        self.status == DependencyStatus::Active
    }

    /// True for an unresolved precedence constraint.
    pub fn is_blocking(&self) -> bool {
        self.kind == DependencyKind::Blocks && self.is_active()
    }

    /// Marks the dependency resolved. Resolving an already-resolved
    /// dependency is a no-op, not an error.
    pub fn resolve(&mut self) {
        if self.status.can_transition_to(&DependencyStatus::Resolved) {
            self.status = DependencyStatus::Resolved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initiative(title: &str) -> InitiativeRef {
        InitiativeRef::new(InitiativeId::new(), title)
    }

    fn dependency(kind: DependencyKind) -> Dependency {
        Dependency::new(
            initiative("Build line A"),
            initiative("Launch product"),
            kind,
            "handoff",
        )
        .unwrap()
    }

    #[test]
    fn new_dependency_starts_active() {
        let dep = dependency(DependencyKind::Blocks);
        assert_eq!(dep.status(), DependencyStatus::Active);
        assert!(dep.is_blocking());
    }

    #[test]
    fn new_rejects_self_loop() {
        let a = initiative("Initiative A");
        let result = Dependency::new(a.clone(), a, DependencyKind::Enables, "circular");
        assert_eq!(result, Err(ValidationError::self_reference("dependency")));
    }

    #[test]
    fn new_rejects_empty_description() {
        let result = Dependency::new(
            initiative("A"),
            initiative("B"),
            DependencyKind::Informs,
            "  ",
        );
        assert_eq!(result, Err(ValidationError::empty_field("description")));
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut dep = dependency(DependencyKind::Blocks);
        dep.resolve();
        let after_first = dep.clone();
        dep.resolve();
        assert_eq!(dep, after_first);
        assert_eq!(dep.status(), DependencyStatus::Resolved);
    }

    #[test]
    fn resolved_blocks_edge_is_not_blocking() {
        let mut dep = dependency(DependencyKind::Blocks);
        dep.resolve();
        assert!(!dep.is_blocking());
    }

    #[test]
    fn enables_edge_is_never_blocking() {
        assert!(!dependency(DependencyKind::Enables).is_blocking());
    }

    #[test]
    fn title_snapshot_is_kept_verbatim() {
        let from = initiative("Original title");
        let dep =
            Dependency::new(from.clone(), initiative("B"), DependencyKind::Informs, "x").unwrap();
        assert_eq!(dep.from().title, "Original title");
        assert_eq!(dep.from().id, from.id);
    }

    #[test]
    fn status_state_machine_is_monotone() {
        assert!(DependencyStatus::Active.can_transition_to(&DependencyStatus::Resolved));
        assert!(DependencyStatus::Resolved.is_terminal());
    }
}
