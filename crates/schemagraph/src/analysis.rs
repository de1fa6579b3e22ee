//! Static analysis of an assembled schema graph.
//!
//! [`IssueDetector`] runs four independent passes over a [`SchemaGraph`]
//! and returns their findings in pass order:
//!
//! 1. broken references (error): edges whose target is not a schema
//! 2. circular dependencies (warning): the first cycle reachable from each
//!    schema, reported once per distinct set of schemas
//! 3. orphan risks (warning): schemas that are referenced but reference
//!    nothing
//! 4. cascade risks (info): schemas holding more foreign keys than the
//!    configured threshold
//!
//! Within a pass, issues follow schema order (edge order for broken
//! references).

mod cycle;

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, trace};

use schemagraph_core::{Issue, ReferenceMechanism, SchemaGraph};

use crate::{config::AnalysisConfig, structure::SchemaIndex};

use cycle::{CycleFinder, cycle_key};

/// Detects structural issues in schema graphs.
#[derive(Debug, Clone)]
pub struct IssueDetector {
    cascade_threshold: usize,
}

impl IssueDetector {
    /// Create a detector with the default thresholds.
    pub fn new() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            cascade_threshold: config.cascade_threshold(),
        }
    }

    /// Set the number of foreign keys a schema may hold before it is
    /// reported as a cascade risk.
    pub fn set_cascade_threshold(&mut self, threshold: usize) -> &mut Self {
        self.cascade_threshold = threshold;
        self
    }

    /// Run every pass over `graph`.
    pub fn detect(&self, graph: &SchemaGraph) -> Vec<Issue> {
        let index = SchemaIndex::new(graph);
        let mut issues = Vec::new();

        self.broken_references(&index, &mut issues);
        self.circular_dependencies(&index, &mut issues);
        self.orphan_risks(&index, &mut issues);
        self.cascade_risks(&index, &mut issues);

        debug!(issues = issues.len(); "Issue detection finished");
        issues
    }

    fn broken_references(&self, index: &SchemaIndex<'_>, issues: &mut Vec<Issue>) {
        for edge in index.edges() {
            if !index.contains(edge.to()) {
                trace!(from = edge.from(), field = edge.field(), to = edge.to(); "Broken reference");
                issues.push(Issue::broken_reference(edge.from(), edge.field(), edge.to()));
            }
        }
    }

    fn circular_dependencies(&self, index: &SchemaIndex<'_>, issues: &mut Vec<Issue>) {
        let mut finder = CycleFinder::new(index);
        let mut reported = HashSet::new();

        for start in index.nodes() {
            let Some(cycle) = finder.first_cycle(start) else {
                continue;
            };
            if !reported.insert(cycle_key(&cycle)) {
                trace!(start = start; "Cycle already reported");
                continue;
            }
            issues.push(Issue::circular_dependency(
                start,
                cycle.into_iter().map(str::to_string).collect(),
            ));
        }
    }

    fn orphan_risks(&self, index: &SchemaIndex<'_>, issues: &mut Vec<Issue>) {
        for id in index.nodes() {
            if index.in_degree(id) == 0 || index.out_degree(id) > 0 {
                continue;
            }
            let referencers: IndexSet<&str> = index.incoming(id).map(|edge| edge.from()).collect();
            issues.push(Issue::orphan_risk(
                id,
                referencers.into_iter().map(str::to_string).collect(),
            ));
        }
    }

    fn cascade_risks(&self, index: &SchemaIndex<'_>, issues: &mut Vec<Issue>) {
        for id in index.nodes() {
            let foreign_keys: Vec<_> = index
                .outgoing(id)
                .filter(|edge| edge.reference_mechanism() == ReferenceMechanism::ForeignKey)
                .collect();
            if foreign_keys.len() <= self.cascade_threshold {
                continue;
            }
            let targets: IndexSet<&str> = foreign_keys.iter().map(|edge| edge.to()).collect();
            issues.push(Issue::cascade_risk(
                id,
                foreign_keys.len(),
                targets.into_iter().map(str::to_string).collect(),
            ));
        }
    }
}

impl Default for IssueDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use schemagraph_core::{
        IssueCategory, IssueDetail, RelationKind, RelationshipEdge, SchemaNode, Severity,
    };

    use super::*;

    fn node(id: &str) -> SchemaNode {
        SchemaNode::new(id, format!("{id}Schema"), vec![])
    }

    fn fk(from: &str, to: &str, field: &str) -> RelationshipEdge {
        RelationshipEdge::foreign_key(from, to, field, RelationKind::OneToOne)
    }

    fn categories(issues: &[Issue]) -> Vec<IssueCategory> {
        issues.iter().map(Issue::category).collect()
    }

    #[test]
    fn test_empty_graph_has_no_issues() {
        assert!(IssueDetector::new().detect(&SchemaGraph::default()).is_empty());
    }

    #[test]
    fn test_broken_reference_per_edge() {
        let graph = SchemaGraph::new(
            vec![node("A")],
            vec![fk("A", "Ghost", "ghost"), fk("A", "Ghost", "other")],
        );
        let issues = IssueDetector::new().detect(&graph);

        let broken: Vec<_> = issues
            .iter()
            .filter(|i| i.category() == IssueCategory::BrokenReference)
            .collect();
        assert_eq!(broken.len(), 2);
        assert_eq!(broken[0].severity(), Severity::Error);
        assert_eq!(broken[0].subject_schema(), "A");
        assert_eq!(
            broken[0].message(),
            "\"A.ghost\" references \"Ghost\" which doesn't exist in your schemas"
        );
        assert_eq!(
            broken[1].detail(),
            &IssueDetail::TargetSchema {
                target_schema: "Ghost".to_string()
            }
        );
    }

    #[test]
    fn test_mutual_reference_reported_once() {
        let graph = SchemaGraph::new(
            vec![node("A"), node("B")],
            vec![fk("A", "B", "b"), fk("B", "A", "a")],
        );
        let issues = IssueDetector::new().detect(&graph);

        assert_eq!(categories(&issues), [IssueCategory::CircularDependency]);
        assert_eq!(issues[0].subject_schema(), "A");
        assert_eq!(issues[0].message(), "Circular reference detected: A → B → A");
    }

    #[test]
    fn test_self_reference_cycle() {
        let graph = SchemaGraph::new(vec![node("Category")], vec![fk("Category", "Category", "parent")]);
        let issues = IssueDetector::new().detect(&graph);

        assert_eq!(categories(&issues), [IssueCategory::CircularDependency]);
        assert_eq!(
            issues[0].detail(),
            &IssueDetail::CyclePath {
                cycle_path: vec!["Category".to_string(), "Category".to_string()]
            }
        );
    }

    #[test]
    fn test_orphan_lists_every_referencer_once() {
        let graph = SchemaGraph::new(
            vec![node("A"), node("B"), node("Leaf")],
            vec![fk("A", "Leaf", "x"), fk("B", "Leaf", "y"), fk("A", "Leaf", "z")],
        );
        let issues = IssueDetector::new().detect(&graph);

        assert_eq!(categories(&issues), [IssueCategory::OrphanRisk]);
        assert_eq!(issues[0].subject_schema(), "Leaf");
        assert_eq!(
            issues[0].message(),
            "\"Leaf\" has no outgoing references. If A, B documents are deleted, orphans may remain"
        );
    }

    #[test]
    fn test_isolated_schema_is_not_orphan() {
        let graph = SchemaGraph::new(vec![node("Alone")], vec![]);
        assert!(IssueDetector::new().detect(&graph).is_empty());
    }

    #[test]
    fn test_cascade_boundary() {
        let mut edges = vec![fk("Hub", "X", "x"), fk("Hub", "Y", "y")];
        let nodes = vec![node("Hub"), node("X"), node("Y"), node("Z")];
        let graph = SchemaGraph::new(nodes.clone(), edges.clone());
        let issues = IssueDetector::new().detect(&graph);
        assert!(!categories(&issues).contains(&IssueCategory::CascadeRisk));

        edges.push(fk("Hub", "Z", "z"));
        let graph = SchemaGraph::new(nodes, edges);
        let issues = IssueDetector::new().detect(&graph);
        let cascade: Vec<_> = issues
            .iter()
            .filter(|i| i.category() == IssueCategory::CascadeRisk)
            .collect();
        assert_eq!(cascade.len(), 1);
        assert_eq!(cascade[0].severity(), Severity::Info);
        assert_eq!(
            cascade[0].message(),
            "\"Hub\" references 3 other schemas (X, Y, Z). Consider cascade deletion strategy"
        );
    }

    #[test]
    fn test_embedded_edges_do_not_count_for_cascade() {
        let graph = SchemaGraph::new(
            vec![node("Hub"), node("X"), node("Y"), node("Z")],
            vec![
                fk("Hub", "X", "x"),
                fk("Hub", "Y", "y"),
                RelationshipEdge::embedded("Hub", "Z", "z", false),
            ],
        );
        let issues = IssueDetector::new().detect(&graph);
        assert!(!categories(&issues).contains(&IssueCategory::CascadeRisk));
    }

    #[test]
    fn test_cascade_threshold_is_configurable() {
        let graph = SchemaGraph::new(
            vec![node("A"), node("B")],
            vec![fk("A", "B", "b")],
        );
        let mut detector = IssueDetector::new();
        detector.set_cascade_threshold(0);
        let issues = detector.detect(&graph);
        assert_eq!(
            categories(&issues),
            [IssueCategory::OrphanRisk, IssueCategory::CascadeRisk]
        );
    }

    #[test]
    fn test_passes_run_in_order() {
        let graph = SchemaGraph::new(
            vec![node("A"), node("B"), node("C")],
            vec![
                fk("A", "B", "b"),
                fk("B", "A", "a"),
                fk("A", "C", "c"),
                fk("A", "Missing", "m"),
            ],
        );
        let issues = IssueDetector::new().detect(&graph);
        assert_eq!(
            categories(&issues),
            [
                IssueCategory::BrokenReference,
                IssueCategory::CircularDependency,
                IssueCategory::OrphanRisk,
                IssueCategory::CascadeRisk,
            ]
        );
    }
}
