//! # SchemaGraph Parser
//!
//! Heuristic extraction of schema graphs from Mongoose-style source files.
//! The input is scanned, not parsed: a small tokenizer keeps strings,
//! comments and regular expressions opaque, and structural matchers pick
//! out schema declarations, model registrations and field references.
//!
//! ## Usage
//!
//! ```
//! use schemagraph_parser::extract;
//!
//! let source = r#"
//!     const PostSchema = new Schema({
//!         title: String,
//!         author: { type: Schema.Types.ObjectId, ref: 'User' },
//!     });
//!     const UserSchema = new Schema({ name: String });
//! "#;
//!
//! let extraction = extract(source);
//! let graph = extraction.graph();
//! assert_eq!(graph.schemas().len(), 2);
//! assert_eq!(graph.relationships()[0].to(), "User");
//! ```
//!
//! ## Pipeline
//!
//! 1. **Split** - [`units::split_units`] divides `// FILE:` separated input
//! 2. **Scan** - [`scanner::scan`] finds declarations and registrations
//! 3. **Split fields** - [`fields::split_fields`] divides each schema body
//! 4. **Classify** - [`relations::extract_relationship`] turns fields into edges
//! 5. **Assemble** - [`assembler::assemble`] builds the [`SchemaGraph`]
//!
//! Extraction never fails. Malformed input yields fewer schemas or
//! relationships, and anything unusual is reported as a warning
//! [`Diagnostic`](error::Diagnostic) with spans into the original input.

pub mod assembler;
pub mod error;
pub mod fields;
mod lexer;
pub mod relations;
pub mod scanner;
mod span;
mod tokens;
pub mod units;

pub use span::Span;

use schemagraph_core::SchemaGraph;

use error::Diagnostic;

/// The schema graph extracted from a source text, together with the scan
/// diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    graph: SchemaGraph,
    diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    /// Warnings noticed while scanning, in input order per stage.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (SchemaGraph, Vec<Diagnostic>) {
        (self.graph, self.diagnostics)
    }
}

/// Extract the schema graph from source text.
///
/// `source` may contain several units separated by `// FILE: <name>`
/// lines; their declarations share one namespace.
pub fn extract(source: &str) -> Extraction {
    let scan = scanner::scan(source);
    let (graph, assembly_diagnostics) = assembler::assemble(&scan);

    let mut diagnostics = scan.into_diagnostics();
    diagnostics.extend(assembly_diagnostics);

    log::info!(
        schemas = graph.schemas().len(),
        relationships = graph.relationships().len(),
        warnings = diagnostics.len();
        "Extracted schema graph"
    );

    Extraction { graph, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_empty_input() {
        let extraction = extract("");
        assert!(extraction.graph().is_empty());
        assert!(extraction.diagnostics().is_empty());
    }

    #[test]
    fn test_extract_collects_all_stages() {
        let source = "const A = new Schema({ x: 'open\n});\nconst ASchema = new Schema({});";
        let extraction = extract(source);
        let codes: Vec<_> = extraction
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect();
        assert_eq!(codes, [error::ErrorCode::W001, error::ErrorCode::W202]);
        assert_eq!(extraction.graph().schemas().len(), 1);
    }
}
