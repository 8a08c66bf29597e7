//! Read-side handlers for PDCA cycles.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, PdcaCycleId};
use crate::domain::pdca::PdcaCycle;
use crate::ports::CollectionStore;

/// Handler fetching one cycle by id.
pub struct GetCycleHandler {
    cycles: Arc<dyn CollectionStore<PdcaCycle>>,
}

impl GetCycleHandler {
    pub fn new(cycles: Arc<dyn CollectionStore<PdcaCycle>>) -> Self {
        Self { cycles }
    }

    pub async fn handle(&self, cycle_id: PdcaCycleId) -> Result<Option<PdcaCycle>, DomainError> {
        let snapshot = self.cycles.snapshot().await?;
        Ok(snapshot.items.into_iter().find(|c| c.id() == cycle_id))
    }
}

/// Handler listing all cycles.
pub struct ListCyclesHandler {
    cycles: Arc<dyn CollectionStore<PdcaCycle>>,
}

impl ListCyclesHandler {
    pub fn new(cycles: Arc<dyn CollectionStore<PdcaCycle>>) -> Self {
        Self { cycles }
    }

    pub async fn handle(&self) -> Result<Vec<PdcaCycle>, DomainError> {
        Ok(self.cycles.snapshot().await?.items)
    }
}
