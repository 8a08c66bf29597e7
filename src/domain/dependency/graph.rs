//! Read-only views over the dependency collection.

use std::collections::{HashMap, HashSet};

use super::{Dependency, DependencyKind};
use crate::domain::foundation::InitiativeId;

/// Active dependencies, optionally restricted to one edge kind.
pub fn list_active(deps: &[Dependency], kind: Option<DependencyKind>) -> Vec<&Dependency> {
    deps.iter()
        .filter(|d| d.is_active())
        .filter(|d| kind.map_or(true, |k| d.kind() == k))
        .collect()
}

/// Unresolved precedence constraints: kind Blocks and status Active.
pub fn list_blocking(deps: &[Dependency]) -> Vec<&Dependency> {
    deps.iter().filter(|d| d.is_blocking()).collect()
}

/// Detects cycles among active `Blocks` edges.
///
/// Purely diagnostic: the engine stores arbitrary directed graphs,
/// including cyclic ones, and nothing consults this during writes. Each
/// cycle is reported once as the list of initiative ids along it, starting
/// from the smallest id so output is stable.
pub fn detect_cycles(deps: &[Dependency]) -> Vec<Vec<InitiativeId>> {
    let mut adjacency: HashMap<InitiativeId, Vec<InitiativeId>> = HashMap::new();
    for dep in deps.iter().filter(|d| d.is_blocking()) {
        adjacency.entry(dep.from().id).or_default().push(dep.to().id);
    }
    let mut nodes: Vec<InitiativeId> = adjacency.keys().copied().collect();
    nodes.sort();

    let mut cycles = Vec::new();
    let mut seen_cycles: HashSet<Vec<InitiativeId>> = HashSet::new();
    let mut visited: HashSet<InitiativeId> = HashSet::new();

    for start in nodes {
        if visited.contains(&start) {
            continue;
        }
        let mut stack = vec![(start, 0usize)];
        let mut path = Vec::new();
        let mut on_path: HashSet<InitiativeId> = HashSet::new();

        while let Some((node, edge_index)) = stack.pop() {
            if edge_index == 0 {
                path.push(node);
                on_path.insert(node);
            }
            let neighbors = adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[]);
            if edge_index < neighbors.len() {
                let next = neighbors[edge_index];
                stack.push((node, edge_index + 1));
                if on_path.contains(&next) {
                    let cycle_start = path.iter().position(|&n| n == next).unwrap();
                    let cycle = canonicalize(&path[cycle_start..]);
                    if seen_cycles.insert(cycle.clone()) {
                        cycles.push(cycle);
                    }
                } else if !visited.contains(&next) {
                    stack.push((next, 0));
                }
            } else {
                visited.insert(node);
                on_path.remove(&node);
                path.pop();
            }
        }
    }
    cycles
}

/// Rotates a cycle so it starts at its smallest id, preserving edge order.
fn canonicalize(cycle: &[InitiativeId]) -> Vec<InitiativeId> {
    let min_index = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| **id)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let mut rotated = Vec::with_capacity(cycle.len());
    rotated.extend_from_slice(&cycle[min_index..]);
    rotated.extend_from_slice(&cycle[..min_index]);
    rotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dependency::InitiativeRef;

    fn initiative_id(n: u128) -> InitiativeId {
        InitiativeId::from_uuid(uuid::Uuid::from_u128(n))
    }

    fn edge(from: u128, to: u128, kind: DependencyKind) -> Dependency {
        Dependency::new(
            InitiativeRef::new(initiative_id(from), format!("I{}", from)),
            InitiativeRef::new(initiative_id(to), format!("I{}", to)),
            kind,
            "edge",
        )
        .unwrap()
    }

    #[test]
    fn list_active_filters_resolved_edges() {
        let mut resolved = edge(1, 2, DependencyKind::Blocks);
        resolved.resolve();
        let deps = vec![resolved, edge(2, 3, DependencyKind::Enables)];

        let active = list_active(&deps, None);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind(), DependencyKind::Enables);
    }

    #[test]
    fn list_active_restricts_by_kind() {
        let deps = vec![
            edge(1, 2, DependencyKind::Blocks),
            edge(2, 3, DependencyKind::Informs),
        ];
        let informs = list_active(&deps, Some(DependencyKind::Informs));
        assert_eq!(informs.len(), 1);
        assert_eq!(informs[0].to().id, initiative_id(3));
    }

    #[test]
    fn list_blocking_ignores_other_kinds_and_resolved() {
        let mut resolved_block = edge(1, 2, DependencyKind::Blocks);
        resolved_block.resolve();
        let deps = vec![
            resolved_block,
            edge(3, 4, DependencyKind::Blocks),
            edge(4, 5, DependencyKind::Enables),
        ];

        let blocking = list_blocking(&deps);
        assert_eq!(blocking.len(), 1);
        assert_eq!(blocking[0].from().id, initiative_id(3));
    }

    #[test]
    fn detect_cycles_finds_a_two_node_cycle() {
        let deps = vec![
            edge(1, 2, DependencyKind::Blocks),
            edge(2, 1, DependencyKind::Blocks),
        ];
        let cycles = detect_cycles(&deps);
        assert_eq!(cycles, vec![vec![initiative_id(1), initiative_id(2)]]);
    }

    #[test]
    fn detect_cycles_on_a_dag_is_empty() {
        let deps = vec![
            edge(1, 2, DependencyKind::Blocks),
            edge(1, 3, DependencyKind::Blocks),
            edge(2, 3, DependencyKind::Blocks),
        ];
        assert!(detect_cycles(&deps).is_empty());
    }

    #[test]
    fn detect_cycles_ignores_non_blocking_edges() {
        // The informs-edge back-reference closes a loop on paper, but only
        // blocks edges count as precedence constraints.
        let deps = vec![
            edge(1, 2, DependencyKind::Blocks),
            edge(2, 1, DependencyKind::Informs),
        ];
        assert!(detect_cycles(&deps).is_empty());
    }

    #[test]
    fn detect_cycles_ignores_resolved_blocking_edges() {
        let mut back = edge(2, 1, DependencyKind::Blocks);
        back.resolve();
        let deps = vec![edge(1, 2, DependencyKind::Blocks), back];
        assert!(detect_cycles(&deps).is_empty());
    }

    #[test]
    fn detect_cycles_reports_longer_loops_once() {
        let deps = vec![
            edge(2, 3, DependencyKind::Blocks),
            edge(3, 1, DependencyKind::Blocks),
            edge(1, 2, DependencyKind::Blocks),
        ];
        let cycles = detect_cycles(&deps);
        assert_eq!(
            cycles,
            vec![vec![initiative_id(1), initiative_id(2), initiative_id(3)]]
        );
    }
}
