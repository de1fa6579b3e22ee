//! Schema nodes of the data-model graph.

use serde::Serialize;

/// A schema declaration resolved to its display name.
///
/// `id` is the model display name: the name given by an explicit model
/// registration, or the declaration identifier with a trailing `Schema`
/// removed. `declared_name` keeps the raw identifier from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    id: String,
    declared_name: String,
    fields: Vec<String>,
}

impl SchemaNode {
    /// Creates a schema node.
    ///
    /// # Arguments
    ///
    /// * `id` - Display name, unique within one graph.
    /// * `declared_name` - Identifier the schema was bound to in source.
    /// * `fields` - Field names in source order.
    pub fn new(id: impl Into<String>, declared_name: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            id: id.into(),
            declared_name: declared_name.into(),
            fields,
        }
    }

    /// Returns the display name used as the node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the identifier the schema was declared under.
    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    /// Returns the field names in source order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
