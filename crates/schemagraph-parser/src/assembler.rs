//! Assembly of scan results into a [`SchemaGraph`].

use indexmap::IndexMap;
use schemagraph_core::{RelationshipEdge, SchemaGraph, SchemaNode};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    fields::split_fields,
    relations::extract_relationship,
    scanner::ScanResult,
    span::Span,
};

/// Build the schema graph from everything the scanner found.
///
/// Every declaration becomes one schema node named by its display name,
/// with its fields in source order, and every qualifying field contributes
/// one edge. When two declarations resolve to the same display name the
/// later node replaces the earlier one in place; the edges of both are
/// kept.
pub fn assemble(scan: &ScanResult<'_>) -> (SchemaGraph, Vec<Diagnostic>) {
    let mut collector = DiagnosticCollector::new();
    let mut nodes: IndexMap<&str, (SchemaNode, Span)> = IndexMap::new();
    let mut edges: Vec<RelationshipEdge> = Vec::new();

    for declaration in scan.declarations().values() {
        let id = scan.display_name(declaration.name());
        let fields = split_fields(declaration.body());

        edges.extend(
            fields
                .iter()
                .filter_map(|field| extract_relationship(id, field, scan)),
        );

        let node = SchemaNode::new(
            id,
            declaration.name(),
            fields.iter().map(|f| f.name().to_string()).collect(),
        );
        if let Some((previous, previous_span)) = nodes.insert(id, (node, declaration.span())) {
            collector.emit(
                Diagnostic::warning(format!(
                    "schemas `{}` and `{}` both resolve to `{id}`",
                    previous.declared_name(),
                    declaration.name()
                ))
                .with_code(ErrorCode::W202)
                .with_label(declaration.span(), "this schema replaces the earlier one")
                .with_secondary_label(previous_span, format!("`{id}` first declared here"))
                .with_help("register one of the schemas under a different model name"),
            );
        }
    }

    let schemas: Vec<SchemaNode> = nodes.into_values().map(|(node, _)| node).collect();
    log::debug!(
        schemas = schemas.len(),
        relationships = edges.len();
        "Assembled schema graph"
    );

    (SchemaGraph::new(schemas, edges), collector.finish())
}
