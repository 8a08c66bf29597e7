//! Generic versioned collection store port - the Entity Store boundary.
//!
//! Every engine operation is a whole-collection read-modify-write: take a
//! snapshot, compute the next collection state with pure domain logic, and
//! commit against the revision the snapshot carried. The commit is a
//! compare-and-swap, so a concurrent writer makes the second commit fail
//! fast with `ConcurrentModification` instead of silently losing its
//! overlap.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::DomainError;

/// A named, schema-versioned collection.
///
/// Stored collection shapes carry no version tag of their own, so the
/// schema version lives with the name and must be bumped on any shape
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionName {
    pub name: &'static str,
    pub schema_version: u16,
}

impl CollectionName {
    pub const fn new(name: &'static str, schema_version: u16) -> Self {
        Self {
            name,
            schema_version,
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.v{}", self.name, self.schema_version)
    }
}

/// The well-known collections of the engine, all at schema version 1.
pub mod collections {
    use super::CollectionName;

    pub const OBJECTIVES: CollectionName = CollectionName::new("objectives", 1);
    pub const METRICS: CollectionName = CollectionName::new("metrics", 1);
    pub const ACTIONS: CollectionName = CollectionName::new("actions", 1);
    pub const ALIGNMENT_LINKS: CollectionName = CollectionName::new("alignment_links", 1);
    pub const DEPENDENCIES: CollectionName = CollectionName::new("dependencies", 1);
    pub const PDCA_CYCLES: CollectionName = CollectionName::new("pdca_cycles", 1);
}

/// Opaque revision token for compare-and-swap commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// The revision of a collection that has never been written.
    pub const INITIAL: Revision = Revision(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The revision a successful commit against this one produces.
    pub fn next(&self) -> Revision {
        Revision(self.0 + 1)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A point-in-time copy of a collection with its revision token.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub revision: Revision,
    pub items: Vec<T>,
}

impl<T> Snapshot<T> {
    pub fn new(revision: Revision, items: Vec<T>) -> Self {
        Self { revision, items }
    }

    /// An empty, never-written collection.
    pub fn empty() -> Self {
        Self {
            revision: Revision::INITIAL,
            items: Vec::new(),
        }
    }
}

/// Port for one named collection of records.
///
/// Implementations serve whole-collection snapshots and accept
/// whole-collection commits guarded by the snapshot's revision. There is no
/// partial-record addressing or locking; the granularity is always the full
/// array, matching the entity-store contract the engines were written
/// against.
#[async_trait]
pub trait CollectionStore<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Returns the current collection contents and revision. A collection
    /// that was never written yields an empty snapshot at the initial
    /// revision.
    async fn snapshot(&self) -> Result<Snapshot<T>, DomainError>;

    /// Replaces the collection contents if `expected` still matches the
    /// stored revision.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` when the stored revision moved past
    ///   `expected`; the stored collection is left untouched.
    /// - `StorageError` for infrastructure failures.
    async fn commit(&self, expected: Revision, items: Vec<T>) -> Result<Revision, DomainError>;
}
