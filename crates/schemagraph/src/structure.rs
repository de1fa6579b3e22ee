//! Adjacency index over a [`SchemaGraph`].
//!
//! [`SchemaGraph`] stores relationships as a flat list, which is the right
//! shape for export but slow to walk. [`SchemaIndex`] borrows a graph and
//! records, per schema, the positions of its incoming and outgoing edges so
//! the analysis passes and the layout engine can traverse it in edge order.
//!
//! Edges whose target is not a schema of the graph are listed as outgoing
//! edges of their source but never as incoming edges.

use std::{collections::HashMap, marker::PhantomData};

use indexmap::IndexSet;

use schemagraph_core::{RelationshipEdge, SchemaGraph};

/// Position of an edge in the borrowed graph's relationship list.
///
/// The lifetime ties the index to the graph it was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeIndex<'idx>(usize, PhantomData<&'idx ()>);

impl EdgeIndex<'_> {
    fn new(index: usize) -> Self {
        EdgeIndex(index, PhantomData)
    }
}

/// Incoming and outgoing edge lists for every schema of a graph.
#[derive(Debug)]
pub(crate) struct SchemaIndex<'g> {
    graph: &'g SchemaGraph,
    nodes: IndexSet<&'g str>,
    incoming_edges: HashMap<&'g str, Vec<EdgeIndex<'g>>>,
    outgoing_edges: HashMap<&'g str, Vec<EdgeIndex<'g>>>,
}

impl<'g> SchemaIndex<'g> {
    pub(crate) fn new(graph: &'g SchemaGraph) -> Self {
        let nodes: IndexSet<&str> = graph.schemas().iter().map(|s| s.id()).collect();
        let mut incoming_edges: HashMap<&str, Vec<EdgeIndex<'g>>> = HashMap::new();
        let mut outgoing_edges: HashMap<&str, Vec<EdgeIndex<'g>>> = HashMap::new();

        for (i, edge) in graph.relationships().iter().enumerate() {
            outgoing_edges
                .entry(edge.from())
                .or_default()
                .push(EdgeIndex::new(i));
            if nodes.contains(edge.to()) {
                incoming_edges
                    .entry(edge.to())
                    .or_default()
                    .push(EdgeIndex::new(i));
            }
        }

        Self {
            graph,
            nodes,
            incoming_edges,
            outgoing_edges,
        }
    }

    /// Schema ids in declaration order.
    pub(crate) fn nodes(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.nodes.iter().copied()
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub(crate) fn edges(&self) -> &'g [RelationshipEdge] {
        self.graph.relationships()
    }

    fn edge(&self, idx: EdgeIndex<'g>) -> &'g RelationshipEdge {
        &self.graph.relationships()[idx.0]
    }

    /// Edges leaving `id`, in extraction order.
    pub(crate) fn outgoing(&self, id: &str) -> impl Iterator<Item = &'g RelationshipEdge> + '_ {
        self.outgoing_edges
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| self.edge(idx))
    }

    /// Edges arriving at `id`, in extraction order.
    pub(crate) fn incoming(&self, id: &str) -> impl Iterator<Item = &'g RelationshipEdge> + '_ {
        self.incoming_edges
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| self.edge(idx))
    }

    pub(crate) fn in_degree(&self, id: &str) -> usize {
        self.incoming_edges.get(id).map_or(0, Vec::len)
    }

    pub(crate) fn out_degree(&self, id: &str) -> usize {
        self.outgoing_edges.get(id).map_or(0, Vec::len)
    }

    /// Schemas without incoming edges, in declaration order.
    pub(crate) fn roots(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.nodes().filter(|id| self.in_degree(id) == 0)
    }
}
