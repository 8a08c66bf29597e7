//! Read-side handlers for the alignment matrix.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ObjectiveId};
use crate::domain::matrix::{AlignmentLink, AlignmentMatrix, Column, Strength};
use crate::ports::CollectionStore;

/// Query for the strength at one matrix cell.
#[derive(Debug, Clone)]
pub struct GetStrengthQuery {
    pub objective_id: ObjectiveId,
    pub column: Column,
}

/// Handler for pure strength lookups. Never mutates.
pub struct GetStrengthHandler {
    links: Arc<dyn CollectionStore<AlignmentLink>>,
}

impl GetStrengthHandler {
    pub fn new(links: Arc<dyn CollectionStore<AlignmentLink>>) -> Self {
        Self { links }
    }

    pub async fn handle(&self, query: GetStrengthQuery) -> Result<Option<Strength>, DomainError> {
        let snapshot = self.links.snapshot().await?;
        let matrix = AlignmentMatrix::from_links(snapshot.items);
        Ok(matrix.strength_of(query.objective_id, query.column))
    }
}

/// Handler listing every alignment link.
pub struct ListLinksHandler {
    links: Arc<dyn CollectionStore<AlignmentLink>>,
}

impl ListLinksHandler {
    pub fn new(links: Arc<dyn CollectionStore<AlignmentLink>>) -> Self {
        Self { links }
    }

    pub async fn handle(&self) -> Result<Vec<AlignmentLink>, DomainError> {
        Ok(self.links.snapshot().await?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryCollectionStore;
    use crate::domain::foundation::MetricId;
    use crate::ports::collections;

    #[tokio::test]
    async fn strength_lookup_reads_without_mutating() {
        let objective = ObjectiveId::new();
        let column = Column::Metric(MetricId::new());
        let store = Arc::new(InMemoryCollectionStore::with_items(
            collections::ALIGNMENT_LINKS,
            vec![AlignmentLink::new(objective, column)],
        ));

        let handler = GetStrengthHandler::new(store.clone());
        let query = GetStrengthQuery {
            objective_id: objective,
            column,
        };

        assert_eq!(handler.handle(query.clone()).await.unwrap(), Some(Strength::Strong));
        // Run it twice: still Strong, the lookup has no side effect.
        assert_eq!(handler.handle(query).await.unwrap(), Some(Strength::Strong));
        assert_eq!(store.snapshot().await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn strength_of_unknown_cell_is_none() {
        let store = Arc::new(InMemoryCollectionStore::<AlignmentLink>::new(
            collections::ALIGNMENT_LINKS,
        ));
        let handler = GetStrengthHandler::new(store);

        let result = handler
            .handle(GetStrengthQuery {
                objective_id: ObjectiveId::new(),
                column: Column::Metric(MetricId::new()),
            })
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn list_links_returns_collection_contents() {
        let link = AlignmentLink::new(ObjectiveId::new(), Column::Metric(MetricId::new()));
        let store = Arc::new(InMemoryCollectionStore::with_items(
            collections::ALIGNMENT_LINKS,
            vec![link],
        ));

        let handler = ListLinksHandler::new(store);
        let links = handler.handle().await.unwrap();
        assert_eq!(links, vec![link]);
    }
}
