//! Depth-first cycle search.

use std::collections::HashSet;

use crate::structure::SchemaIndex;

/// Searches for cycles one start node at a time.
///
/// Schemas whose whole reachable subgraph was explored without meeting a
/// cycle are remembered across starts and never walked again.
pub(super) struct CycleFinder<'a, 'g> {
    index: &'a SchemaIndex<'g>,
    acyclic: HashSet<&'g str>,
}

impl<'a, 'g> CycleFinder<'a, 'g> {
    pub(super) fn new(index: &'a SchemaIndex<'g>) -> Self {
        Self {
            index,
            acyclic: HashSet::new(),
        }
    }

    /// Returns the first cycle reachable from `start`, following outgoing
    /// edges in edge order.
    ///
    /// The path begins at the first repeated schema and ends with it again,
    /// so a self-reference yields `[A, A]`. The cycle need not contain
    /// `start` itself.
    pub(super) fn first_cycle(&mut self, start: &'g str) -> Option<Vec<&'g str>> {
        if self.acyclic.contains(start) {
            return None;
        }

        let index = self.index;
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut on_path: HashSet<&str> = HashSet::from([start]);
        let mut path = vec![start];
        let mut frames = vec![index.outgoing(start)];

        while let Some(frame) = frames.last_mut() {
            let Some(edge) = frame.next() else {
                frames.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(done);
                    self.acyclic.insert(done);
                }
                continue;
            };

            let next = edge.to();
            if on_path.contains(next) {
                let from = path.iter().position(|id| *id == next).unwrap_or(0);
                let mut cycle = path.split_off(from);
                cycle.push(next);
                return Some(cycle);
            }
            if self.acyclic.contains(next) || !visited.insert(next) {
                continue;
            }

            path.push(next);
            on_path.insert(next);
            frames.push(index.outgoing(next));
        }

        None
    }
}

/// Order-independent identity of a cycle: its distinct schemas, sorted.
pub(super) fn cycle_key(cycle: &[&str]) -> String {
    let mut members: Vec<&str> = cycle.to_vec();
    members.sort_unstable();
    members.dedup();
    members.join("->")
}

#[cfg(test)]
mod tests {
    use schemagraph_core::{RelationKind, RelationshipEdge, SchemaGraph, SchemaNode};

    use super::*;

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> SchemaGraph {
        SchemaGraph::new(
            nodes
                .iter()
                .map(|id| SchemaNode::new(*id, format!("{id}Schema"), vec![]))
                .collect(),
            edges
                .iter()
                .map(|(from, to)| {
                    RelationshipEdge::foreign_key(*from, *to, "ref", RelationKind::OneToOne)
                })
                .collect(),
        )
    }

    #[test]
    fn test_two_node_cycle() {
        let graph = graph(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let index = SchemaIndex::new(&graph);
        let mut finder = CycleFinder::new(&index);
        assert_eq!(finder.first_cycle("A"), Some(vec!["A", "B", "A"]));
        assert_eq!(finder.first_cycle("B"), Some(vec!["B", "A", "B"]));
    }

    #[test]
    fn test_self_reference() {
        let graph = graph(&["A"], &[("A", "A")]);
        let index = SchemaIndex::new(&graph);
        let mut finder = CycleFinder::new(&index);
        assert_eq!(finder.first_cycle("A"), Some(vec!["A", "A"]));
    }

    #[test]
    fn test_cycle_not_through_start() {
        let graph = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "B")]);
        let index = SchemaIndex::new(&graph);
        let mut finder = CycleFinder::new(&index);
        assert_eq!(finder.first_cycle("A"), Some(vec!["B", "C", "B"]));
    }

    #[test]
    fn test_acyclic_with_shared_descendants() {
        let graph = graph(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "Missing")],
        );
        let index = SchemaIndex::new(&graph);
        let mut finder = CycleFinder::new(&index);
        for start in ["A", "B", "C", "D"] {
            assert_eq!(finder.first_cycle(start), None);
        }
    }

    #[test]
    fn test_memo_does_not_hide_later_cycles() {
        // D finishes acyclic from A; the cycle through C is found from C.
        let graph = graph(&["A", "C", "D"], &[("A", "D"), ("C", "D"), ("C", "C")]);
        let index = SchemaIndex::new(&graph);
        let mut finder = CycleFinder::new(&index);
        assert_eq!(finder.first_cycle("A"), None);
        assert_eq!(finder.first_cycle("C"), Some(vec!["C", "C"]));
    }

    #[test]
    fn test_first_cycle_in_edge_order() {
        let graph = graph(
            &["A", "B", "C"],
            &[("A", "C"), ("A", "B"), ("B", "A"), ("C", "A")],
        );
        let index = SchemaIndex::new(&graph);
        let mut finder = CycleFinder::new(&index);
        assert_eq!(finder.first_cycle("A"), Some(vec!["A", "C", "A"]));
    }

    #[test]
    fn test_cycle_key_ignores_rotation() {
        assert_eq!(cycle_key(&["A", "B", "A"]), cycle_key(&["B", "A", "B"]));
        assert_eq!(cycle_key(&["Post", "User", "Post"]), "Post->User");
    }
}
