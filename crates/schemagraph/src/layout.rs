//! Hierarchical layout of schema graphs.
//!
//! Ranks are assigned by a breadth-first walk seeded with the schemas that
//! nothing references. Each rank is a column; ranks advance along the X
//! axis at a fixed interval and the schemas of one rank are spread evenly
//! around the centerline `y = 0`.
//!
//! The layout is advisory. Schemas that the walk never reaches (for
//! example every member of a graph in which each schema is referenced)
//! stay on rank 0.

use std::collections::{BTreeMap, HashMap, VecDeque};

use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::Serialize;

use schemagraph_core::{
    ReferenceMechanism, RelationKind, RelationshipEdge, SchemaGraph, color::Color,
    geometry::Point, stroke::EdgeStroke,
};

use crate::{config::AppConfig, error::SchemaGraphError, structure::SchemaIndex};

/// A positioned schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    id: String,
    rank: usize,
    position: Point,
}

impl LayoutNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// A styled relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    id: String,
    source: String,
    target: String,
    label: String,
    kind: RelationKind,
    reference_mechanism: ReferenceMechanism,
    style: EdgeStroke,
}

impl LayoutEdge {
    /// Identifier of the form `{source}-{target}-{position}`, unique per
    /// relationship even when two edges share both endpoints.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The name of the field that holds the reference.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn reference_mechanism(&self) -> ReferenceMechanism {
        self.reference_mechanism
    }

    pub fn style(&self) -> &EdgeStroke {
        &self.style
    }
}

/// Nodes in schema order and edges in relationship order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
}

impl Layout {
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[LayoutEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Ranks in schema order, plus the order schemas take within their rank:
/// discovery order of the walk followed by the schemas it never reached.
struct Ranking<'g> {
    ranks: IndexMap<&'g str, usize>,
    order: Vec<&'g str>,
}

/// Rank-based layout engine.
#[derive(Debug, Clone)]
pub struct HierarchicalLayout {
    rank_spacing: f32,
    node_spacing: f32,
    foreign_key_color: Color,
    embedded_color: Color,
}

impl HierarchicalLayout {
    /// Create an engine with the default spacing and colors.
    pub fn new() -> Self {
        Self {
            rank_spacing: 280.0,
            node_spacing: 120.0,
            foreign_key_color: Color::new("#c17532").unwrap_or_default(),
            embedded_color: Color::new("#7a5c3a").unwrap_or_default(),
        }
    }

    /// Create an engine from the layout and style sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaGraphError::Config`] when a configured color cannot
    /// be parsed.
    pub fn from_config(config: &AppConfig) -> Result<Self, SchemaGraphError> {
        let style = config.style();
        let mut engine = Self::new();
        engine
            .set_rank_spacing(config.layout().rank_spacing())
            .set_node_spacing(config.layout().node_spacing())
            .set_foreign_key_color(style.foreign_key_color().map_err(SchemaGraphError::Config)?)
            .set_embedded_color(style.embedded_color().map_err(SchemaGraphError::Config)?);
        Ok(engine)
    }

    /// Set the horizontal distance between ranks
    pub fn set_rank_spacing(&mut self, spacing: f32) -> &mut Self {
        self.rank_spacing = spacing;
        self
    }

    /// Set the vertical distance between schemas of one rank
    pub fn set_node_spacing(&mut self, spacing: f32) -> &mut Self {
        self.node_spacing = spacing;
        self
    }

    pub fn set_foreign_key_color(&mut self, color: Color) -> &mut Self {
        self.foreign_key_color = color;
        self
    }

    pub fn set_embedded_color(&mut self, color: Color) -> &mut Self {
        self.embedded_color = color;
        self
    }

    /// Calculate the layout of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaGraphError::Layout`] when a spacing is negative or
    /// not finite.
    pub fn calculate(&self, graph: &SchemaGraph) -> Result<Layout, SchemaGraphError> {
        for (name, spacing) in [
            ("rank spacing", self.rank_spacing),
            ("node spacing", self.node_spacing),
        ] {
            if !spacing.is_finite() || spacing < 0.0 {
                return Err(SchemaGraphError::Layout(format!(
                    "{name} must be a non-negative number, got {spacing}"
                )));
            }
        }

        let index = SchemaIndex::new(graph);
        let ranking = Self::ranks(&index);
        let positions = self.positions(&ranking);

        let nodes = ranking
            .ranks
            .iter()
            .map(|(&id, &rank)| LayoutNode {
                id: id.to_string(),
                rank,
                position: positions.get(id).copied().unwrap_or_default(),
            })
            .collect();

        let edges = graph
            .relationships()
            .iter()
            .enumerate()
            .map(|(idx, edge)| self.layout_edge(idx, edge))
            .collect();

        debug!(
            nodes = ranking.ranks.len(),
            ranks = ranking.ranks.values().max().map_or(0, |rank| rank + 1);
            "Layout calculated"
        );
        Ok(Layout { nodes, edges })
    }

    /// Assign a rank to every schema.
    fn ranks<'g>(index: &SchemaIndex<'g>) -> Ranking<'g> {
        let mut ranks: IndexMap<&str, usize> = index.nodes().map(|id| (id, 0)).collect();
        let mut discovered: IndexSet<&str> = index.roots().collect();
        let mut queue: VecDeque<&str> = discovered.iter().copied().collect();

        while let Some(current) = queue.pop_front() {
            let rank = ranks.get(current).copied().unwrap_or(0);
            for edge in index.outgoing(current) {
                let target = edge.to();
                if let Some(target_rank) = ranks.get_mut(target) {
                    *target_rank = (*target_rank).max(rank + 1);
                }
                if discovered.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        // Unknown targets are discovered too but never placed.
        let order = discovered
            .iter()
            .copied()
            .filter(|id| index.contains(id))
            .chain(index.nodes().filter(|id| !discovered.contains(id)))
            .collect();

        Ranking { ranks, order }
    }

    fn positions<'g>(&self, ranking: &Ranking<'g>) -> HashMap<&'g str, Point> {
        let mut columns: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for &id in &ranking.order {
            let rank = ranking.ranks.get(id).copied().unwrap_or(0);
            columns.entry(rank).or_default().push(id);
        }

        let mut positions = HashMap::with_capacity(ranking.order.len());
        for (rank, column) in columns {
            let x = rank as f32 * self.rank_spacing;
            let center = (column.len() as f32 - 1.0) / 2.0;
            for (i, id) in column.into_iter().enumerate() {
                let y = (i as f32 - center) * self.node_spacing;
                positions.insert(id, Point::new(x, y));
            }
        }
        positions
    }

    fn layout_edge(&self, idx: usize, edge: &RelationshipEdge) -> LayoutEdge {
        let color = match edge.reference_mechanism() {
            ReferenceMechanism::ForeignKey => self.foreign_key_color,
            ReferenceMechanism::Embedded => self.embedded_color,
        };
        let many = edge.kind().is_many();
        let style = EdgeStroke::solid(color, if many { 2.0 } else { 1.0 }).with_animated(many);

        LayoutEdge {
            id: format!("{}-{}-{idx}", edge.from(), edge.to()),
            source: edge.from().to_string(),
            target: edge.to().to_string(),
            label: edge.field().to_string(),
            kind: edge.kind(),
            reference_mechanism: edge.reference_mechanism(),
            style,
        }
    }
}

impl Default for HierarchicalLayout {
    fn default() -> Self {
        Self::new()
    }
}
