//! JSON documents produced from an [`Analysis`].
//!
//! Three documents are available:
//!
//! - the export document ([`export_document`]), a self-contained report with
//!   a timestamp, summary counters, schemas, relationships and issues
//! - the graph document ([`graph_document`]): `{ schemas, relationships, issues }`
//! - the layout document ([`layout_document`]): `{ nodes, edges }`
//!
//! Every document is pretty-printed with two-space indentation. Field order
//! is fixed by the struct declarations below.
//!
//! In the export document, `refType` names the reference mechanism:
//! `"ForeignKey"` or `"Embedded"`. Readers that expect the older `"ObjectId"`
//! value for foreign keys must map `"ForeignKey"` to it.

use chrono::SecondsFormat;
use serde::Serialize;

use schemagraph_core::{Issue, IssueCategory, RelationKind, RelationshipEdge, SchemaGraph, Severity};

use crate::{Analysis, error::SchemaGraphError, layout::Layout};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    timestamp: String,
    summary: ExportSummary,
    schemas: Vec<ExportSchema<'a>>,
    relationships: Vec<ExportRelationship<'a>>,
    issues: Vec<ExportIssue<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportSummary {
    total_schemas: usize,
    total_relationships: usize,
    issues_found: usize,
}

#[derive(Serialize)]
struct ExportSchema<'a> {
    name: &'a str,
    fields: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRelationship<'a> {
    from: &'a str,
    to: &'a str,
    field: &'a str,
    #[serde(rename = "type")]
    kind: RelationKind,
    /// `"ForeignKey"` or `"Embedded"`, never `"ObjectId"`.
    ref_type: &'static str,
}

#[derive(Serialize)]
struct ExportIssue<'a> {
    severity: Severity,
    #[serde(rename = "type")]
    category: IssueCategory,
    message: &'a str,
}

#[derive(Serialize)]
struct GraphDocument<'a> {
    #[serde(flatten)]
    graph: &'a SchemaGraph,
    issues: &'a [Issue],
}

impl<'a> From<&'a RelationshipEdge> for ExportRelationship<'a> {
    fn from(edge: &'a RelationshipEdge) -> Self {
        Self {
            from: edge.from(),
            to: edge.to(),
            field: edge.field(),
            kind: edge.kind(),
            ref_type: edge.reference_mechanism().into(),
        }
    }
}

impl<'a> From<&'a Issue> for ExportIssue<'a> {
    fn from(issue: &'a Issue) -> Self {
        Self {
            severity: issue.severity(),
            category: issue.category(),
            message: issue.message(),
        }
    }
}

/// Render the export document of `analysis`.
///
/// The timestamp is the analysis time in UTC with millisecond precision,
/// so exporting the same analysis twice yields identical text.
///
/// # Errors
///
/// Returns [`SchemaGraphError::Export`] if serialization fails.
pub fn export_document(analysis: &Analysis) -> Result<String, SchemaGraphError> {
    let graph = analysis.graph();
    let document = ExportDocument {
        timestamp: analysis
            .analyzed_at()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        summary: ExportSummary {
            total_schemas: graph.schemas().len(),
            total_relationships: graph.relationships().len(),
            issues_found: analysis.issues().len(),
        },
        schemas: graph
            .schemas()
            .iter()
            .map(|schema| ExportSchema {
                name: schema.id(),
                fields: schema.fields(),
            })
            .collect(),
        relationships: graph.relationships().iter().map(Into::into).collect(),
        issues: analysis.issues().iter().map(Into::into).collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render the graph and its issues.
///
/// # Errors
///
/// Returns [`SchemaGraphError::Export`] if serialization fails.
pub fn graph_document(analysis: &Analysis) -> Result<String, SchemaGraphError> {
    let document = GraphDocument {
        graph: analysis.graph(),
        issues: analysis.issues(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Render a layout.
///
/// # Errors
///
/// Returns [`SchemaGraphError::Export`] if serialization fails.
pub fn layout_document(layout: &Layout) -> Result<String, SchemaGraphError> {
    Ok(serde_json::to_string_pretty(layout)?)
}
