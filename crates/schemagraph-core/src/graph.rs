//! The assembled schema multigraph.

use serde::Serialize;

use crate::{relationship::RelationshipEdge, schema::SchemaNode};

/// Schemas and the relationships between them.
///
/// Schemas keep declaration order and relationships keep field order,
/// so two graphs assembled from the same input compare equal. Several
/// edges may join the same pair of schemas, and an edge's target may name
/// a schema that is not part of the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaGraph {
    schemas: Vec<SchemaNode>,
    relationships: Vec<RelationshipEdge>,
}

impl SchemaGraph {
    /// Creates a graph from already resolved schemas and relationships.
    ///
    /// Callers are responsible for schema ids being unique and for every
    /// relationship originating at one of the schemas.
    pub fn new(schemas: Vec<SchemaNode>, relationships: Vec<RelationshipEdge>) -> Self {
        Self {
            schemas,
            relationships,
        }
    }

    /// Returns all schemas in declaration order.
    pub fn schemas(&self) -> &[SchemaNode] {
        &self.schemas
    }

    /// Returns all relationships in extraction order.
    pub fn relationships(&self) -> &[RelationshipEdge] {
        &self.relationships
    }

    /// Looks up a schema by display name.
    pub fn schema(&self, id: &str) -> Option<&SchemaNode> {
        self.schemas.iter().find(|schema| schema.id() == id)
    }

    /// Returns `true` if a schema with the given display name exists.
    pub fn contains(&self, id: &str) -> bool {
        self.schema(id).is_some()
    }

    /// Returns relationships whose source is `id`, in extraction order.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a RelationshipEdge> + 'a {
        self.relationships.iter().filter(move |edge| edge.from() == id)
    }

    /// Returns relationships whose target is `id`, in extraction order.
    pub fn incoming<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a RelationshipEdge> + 'a {
        self.relationships.iter().filter(move |edge| edge.to() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
