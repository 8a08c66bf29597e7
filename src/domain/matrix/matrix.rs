//! The alignment matrix - pure collection semantics for link toggling.

use serde::{Deserialize, Serialize};

use super::{AlignmentLink, Column, Strength};
use crate::domain::foundation::ObjectiveId;

/// The full set of alignment links, with the uniqueness invariant that at
/// most one link exists per (objective, column) cell.
///
/// This is a pure value type: every operation computes the next collection
/// state in memory. Persistence is a single snapshot/commit around it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentMatrix {
    links: Vec<AlignmentLink>,
}

impl AlignmentMatrix {
    /// Wraps an existing collection of links.
    pub fn from_links(links: Vec<AlignmentLink>) -> Self {
        Self { links }
    }

    /// Consumes the matrix, returning the underlying links for storage.
    pub fn into_links(self) -> Vec<AlignmentLink> {
        self.links
    }

    /// Returns all links.
    pub fn links(&self) -> &[AlignmentLink] {
        &self.links
    }

    /// Pure lookup of the strength at a cell.
    pub fn strength_of(&self, objective_id: ObjectiveId, column: Column) -> Option<Strength> {
        self.links
            .iter()
            .find(|link| link.is_cell(objective_id, column))
            .map(|link| link.strength)
    }

    /// Cycles the link at a cell through absent→strong→medium→weak→absent.
    ///
    /// Returns the link as stored after the toggle, or `None` when the
    /// weak→absent step removed it. Idempotent only across a full 4-cycle.
    pub fn toggle(&mut self, objective_id: ObjectiveId, column: Column) -> Option<AlignmentLink> {
        let position = self
            .links
            .iter()
            .position(|link| link.is_cell(objective_id, column));

        match position {
            None => {
                let link = AlignmentLink::new(objective_id, column);
                self.links.push(link);
                Some(link)
            }
            Some(index) => match self.links[index].strength.demoted() {
                Some(strength) => {
                    self.links[index].strength = strength;
                    Some(self.links[index])
                }
                None => {
                    self.links.remove(index);
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ActionId, MetricId};
    use proptest::prelude::*;

    fn metric_column() -> Column {
        Column::Metric(MetricId::new())
    }

    #[test]
    fn toggle_walks_the_four_state_cycle() {
        let mut matrix = AlignmentMatrix::default();
        let objective = ObjectiveId::new();
        let column = metric_column();

        let observed: Vec<Option<Strength>> = (0..4)
            .map(|_| matrix.toggle(objective, column).map(|l| l.strength))
            .collect();

        assert_eq!(
            observed,
            vec![
                Some(Strength::Strong),
                Some(Strength::Medium),
                Some(Strength::Weak),
                None,
            ]
        );
        assert!(matrix.links().is_empty());
    }

    #[test]
    fn strength_of_reads_without_mutating() {
        let mut matrix = AlignmentMatrix::default();
        let objective = ObjectiveId::new();
        let column = metric_column();
        matrix.toggle(objective, column);

        let before = matrix.clone();
        assert_eq!(matrix.strength_of(objective, column), Some(Strength::Strong));
        assert_eq!(matrix, before);
    }

    #[test]
    fn strength_of_unknown_cell_is_none() {
        let matrix = AlignmentMatrix::default();
        assert_eq!(matrix.strength_of(ObjectiveId::new(), metric_column()), None);
    }

    #[test]
    fn toggling_one_cell_leaves_other_cells_untouched() {
        let mut matrix = AlignmentMatrix::default();
        let objective = ObjectiveId::new();
        let metric = metric_column();
        let action = Column::Action(ActionId::new());

        matrix.toggle(objective, metric);
        matrix.toggle(objective, action);
        matrix.toggle(objective, action);

        assert_eq!(matrix.strength_of(objective, metric), Some(Strength::Strong));
        assert_eq!(matrix.strength_of(objective, action), Some(Strength::Medium));
    }

    #[test]
    fn dangling_ids_are_stored_without_complaint() {
        // Cross-collection existence is never checked; a link may reference
        // an objective or metric that was deleted or never created.
        let mut matrix = AlignmentMatrix::default();
        let ghost_objective = ObjectiveId::new();
        let ghost_column = metric_column();

        let link = matrix.toggle(ghost_objective, ghost_column).unwrap();
        assert_eq!(link.strength, Strength::Strong);
        assert_eq!(matrix.links().len(), 1);
    }

    fn arb_cell() -> impl Strategy<Value = (u8, u8, bool)> {
        // Small id spaces force collisions so the uniqueness law is stressed.
        (0..4u8, 0..4u8, any::<bool>())
    }

    fn cell_ids(seed: (u8, u8, bool)) -> (ObjectiveId, Column) {
        let (obj, col, is_metric) = seed;
        let objective = ObjectiveId::from_uuid(uuid::Uuid::from_u128(obj as u128 + 1));
        let column_uuid = uuid::Uuid::from_u128(col as u128 + 100);
        let column = if is_metric {
            Column::Metric(MetricId::from_uuid(column_uuid))
        } else {
            Column::Action(ActionId::from_uuid(column_uuid))
        };
        (objective, column)
    }

    proptest! {
        #[test]
        fn four_toggles_round_trip_to_absent(
            seed in arb_cell(),
            prefix in proptest::collection::vec(arb_cell(), 0..20),
        ) {
            let mut matrix = AlignmentMatrix::default();
            for s in &prefix {
                let (objective, column) = cell_ids(*s);
                matrix.toggle(objective, column);
            }

            let (objective, column) = cell_ids(seed);
            // Start the cell from absent regardless of the prefix.
            while matrix.strength_of(objective, column).is_some() {
                matrix.toggle(objective, column);
            }
            let before = matrix.clone();

            for _ in 0..4 {
                matrix.toggle(objective, column);
            }
            prop_assert_eq!(matrix, before);
        }

        #[test]
        fn no_sequence_of_toggles_duplicates_a_cell(
            seeds in proptest::collection::vec(arb_cell(), 0..40),
        ) {
            let mut matrix = AlignmentMatrix::default();
            for s in &seeds {
                let (objective, column) = cell_ids(*s);
                matrix.toggle(objective, column);

                let occupancy = matrix
                    .links()
                    .iter()
                    .filter(|link| link.is_cell(objective, column))
                    .count();
                prop_assert!(occupancy <= 1);
            }
        }
    }
}
