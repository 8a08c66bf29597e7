//! In-memory collection store with compare-and-swap commits.
//!
//! Backs the engine in single-process deployments and in tests. Each store
//! holds one named collection behind a mutex; the revision counter advances
//! on every successful commit and stale commits are rejected.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CollectionName, CollectionStore, Revision, Snapshot};

/// Mutex-backed store for one collection.
pub struct InMemoryCollectionStore<T> {
    name: CollectionName,
    state: Mutex<(Revision, Vec<T>)>,
}

impl<T: Clone> InMemoryCollectionStore<T> {
    /// Creates an empty collection at the initial revision.
    pub fn new(name: CollectionName) -> Self {
        Self {
            name,
            state: Mutex::new((Revision::INITIAL, Vec::new())),
        }
    }

    /// Creates a store pre-populated with items, already at revision 1.
    pub fn with_items(name: CollectionName, items: Vec<T>) -> Self {
        Self {
            name,
            state: Mutex::new((Revision::INITIAL.next(), items)),
        }
    }

    pub fn name(&self) -> CollectionName {
        self.name
    }
}

#[async_trait]
impl<T> CollectionStore<T> for InMemoryCollectionStore<T>
where
    T: Clone + Send + Sync,
{
    async fn snapshot(&self) -> Result<Snapshot<T>, DomainError> {
        let state = self
            .state
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "collection lock poisoned"))?;
        Ok(Snapshot::new(state.0, state.1.clone()))
    }

    async fn commit(&self, expected: Revision, items: Vec<T>) -> Result<Revision, DomainError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| DomainError::new(ErrorCode::StorageError, "collection lock poisoned"))?;
        if state.0 != expected {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "Collection '{}' moved from {} to {} since snapshot",
                    self.name, expected, state.0
                ),
            )
            .with_detail("collection", self.name.to_string())
            .with_detail("expected", expected.to_string())
            .with_detail("actual", state.0.to_string()));
        }
        let next = expected.next();
        *state = (next, items);
        tracing::debug!(collection = %self.name, revision = %next, "collection committed");
        Ok(next)
    }
}
