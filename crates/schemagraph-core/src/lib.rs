//! SchemaGraph Core Types
//!
//! This crate provides the data model shared by the SchemaGraph scanner,
//! analyzer and layout engine. It includes:
//!
//! - **Schemas**: [`schema::SchemaNode`], one per schema declaration
//! - **Relationships**: [`relationship::RelationshipEdge`] with its
//!   [`relationship::RelationKind`] and [`relationship::ReferenceMechanism`]
//! - **Graph**: [`graph::SchemaGraph`], the assembled multigraph
//! - **Issues**: [`issue::Issue`] produced by static analysis
//! - **Geometry**, **Strokes** and **Colors** used by layout output

pub mod color;
pub mod geometry;
pub mod graph;
pub mod issue;
pub mod relationship;
pub mod schema;
pub mod stroke;

pub use graph::SchemaGraph;
pub use issue::{Issue, IssueCategory, IssueDetail, Severity};
pub use relationship::{ReferenceMechanism, RelationKind, RelationshipEdge};
pub use schema::SchemaNode;
