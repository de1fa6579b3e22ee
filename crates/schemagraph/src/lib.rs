//! SchemaGraph - Static analysis of Mongoose-style schema graphs.
//!
//! The crate extracts schemas and their relationships from source text,
//! reports structural issues (broken references, circular dependencies,
//! orphan and cascade deletion risks), computes an advisory hierarchical
//! layout and renders the results as JSON documents.
//!
//! Malformed input never fails an analysis: it degrades to a smaller graph
//! and warning [`Diagnostic`]s.

pub mod config;

mod analysis;
mod error;
mod export;
mod layout;
mod session;
mod structure;

pub use schemagraph_core::{
    Issue, IssueCategory, IssueDetail, ReferenceMechanism, RelationKind, RelationshipEdge,
    SchemaGraph, SchemaNode, Severity, color, geometry, stroke,
};
pub use schemagraph_parser::{
    Extraction, Span,
    error::{Diagnostic, ErrorCode, Label},
};

pub use analysis::IssueDetector;
pub use error::SchemaGraphError;
pub use layout::{HierarchicalLayout, Layout, LayoutEdge, LayoutNode};
pub use session::Session;

use chrono::{DateTime, Utc};
use log::{debug, info};

use config::AppConfig;

/// A small blog data model used as a built-in example.
///
/// It declares five schemas (`User`, `Post`, `Comment`, `Profile`, `Tag`)
/// linked by eight foreign keys, with explicit model registrations.
pub const EXAMPLE_SCHEMAS: &str = r#"
const mongoose = require('mongoose');
const Schema = mongoose.Schema;

const UserSchema = new Schema({
  name: { type: String, required: true },
  email: { type: String, required: true, unique: true },
  posts: [{ type: Schema.Types.ObjectId, ref: 'Post' }],
  profile: { type: Schema.Types.ObjectId, ref: 'Profile' },
  createdAt: { type: Date, default: Date.now }
});

const PostSchema = new Schema({
  title: { type: String, required: true },
  content: String,
  author: { type: Schema.Types.ObjectId, ref: 'User', required: true },
  comments: [{ type: Schema.Types.ObjectId, ref: 'Comment' }],
  tags: [{ type: Schema.Types.ObjectId, ref: 'Tag' }],
  publishedAt: Date
});

const CommentSchema = new Schema({
  text: { type: String, required: true },
  author: { type: Schema.Types.ObjectId, ref: 'User' },
  post: { type: Schema.Types.ObjectId, ref: 'Post' },
  createdAt: { type: Date, default: Date.now }
});

const ProfileSchema = new Schema({
  bio: String,
  avatar: String,
  user: { type: Schema.Types.ObjectId, ref: 'User', unique: true },
  socialLinks: [String]
});

const TagSchema = new Schema({
  name: { type: String, unique: true },
  slug: String
});

mongoose.model('User', UserSchema);
mongoose.model('Post', PostSchema);
mongoose.model('Comment', CommentSchema);
mongoose.model('Profile', ProfileSchema);
mongoose.model('Tag', TagSchema);
"#;

/// Runs the analysis pipeline.
///
/// # Examples
///
/// ```
/// use schemagraph::{Analyzer, EXAMPLE_SCHEMAS, IssueCategory};
///
/// let analysis = Analyzer::default()
///     .analyze(EXAMPLE_SCHEMAS)
///     .expect("default configuration is valid");
///
/// assert_eq!(analysis.graph().schemas().len(), 5);
/// assert!(
///     analysis
///         .issues()
///         .iter()
///         .any(|issue| issue.category() == IssueCategory::CircularDependency)
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AppConfig,
}

impl Analyzer {
    /// Create an analyzer with the given configuration.
    ///
    /// The configuration is validated on every [`Analyzer::analyze`] call.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Extract the schema graph from `source` without analyzing it.
    pub fn extract(&self, source: &str) -> Extraction {
        schemagraph_parser::extract(source)
    }

    /// Run the issue passes over `graph`.
    pub fn detect_issues(&self, graph: &SchemaGraph) -> Vec<Issue> {
        IssueDetector::from_config(self.config.analysis()).detect(graph)
    }

    /// Compute the hierarchical layout of `graph`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaGraphError` if the layout or style configuration is
    /// unusable.
    pub fn layout(&self, graph: &SchemaGraph) -> Result<Layout, SchemaGraphError> {
        HierarchicalLayout::from_config(&self.config)?.calculate(graph)
    }

    /// Analyze `source`, stamping the result with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaGraphError::Config`] if the configuration is invalid.
    /// Schema sources themselves never cause an error.
    pub fn analyze(&self, source: &str) -> Result<Analysis, SchemaGraphError> {
        self.analyze_at(source, Utc::now())
    }

    /// Analyze `source`, stamping the result with `analyzed_at`.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub fn analyze_at(
        &self,
        source: &str,
        analyzed_at: DateTime<Utc>,
    ) -> Result<Analysis, SchemaGraphError> {
        self.config.validate().map_err(SchemaGraphError::Config)?;

        info!(bytes = source.len(); "Analyzing schemas");
        let (graph, diagnostics) = self.extract(source).into_parts();
        let issues = self.detect_issues(&graph);
        let layout = self.layout(&graph)?;

        let analysis = Analysis {
            graph,
            issues,
            layout,
            diagnostics,
            analyzed_at,
        };
        let summary = analysis.summary();
        info!(
            schemas = summary.schemas,
            relationships = summary.relationships,
            errors = summary.errors,
            warnings = summary.warnings,
            infos = summary.infos;
            "Analysis finished"
        );
        debug!(diagnostics = analysis.diagnostics.len(); "Scan diagnostics collected");

        Ok(analysis)
    }
}

/// The published result of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    graph: SchemaGraph,
    issues: Vec<Issue>,
    layout: Layout,
    diagnostics: Vec<Diagnostic>,
    analyzed_at: DateTime<Utc>,
}

impl Analysis {
    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    /// Issues in pass order: broken references, cycles, orphan risks,
    /// cascade risks.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Scan warnings, with spans into the analyzed source.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn analyzed_at(&self) -> DateTime<Utc> {
        self.analyzed_at
    }

    pub fn summary(&self) -> AnalysisSummary {
        let count = |predicate: fn(&Severity) -> bool| {
            self.issues
                .iter()
                .filter(|issue| predicate(&issue.severity()))
                .count()
        };
        AnalysisSummary {
            schemas: self.graph.schemas().len(),
            relationships: self.graph.relationships().len(),
            issues: self.issues.len(),
            errors: count(Severity::is_error),
            warnings: count(Severity::is_warning),
            infos: count(Severity::is_info),
        }
    }

    /// Render the export document: timestamp, summary, schemas,
    /// relationships and issues.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaGraphError::Export`] if serialization fails.
    pub fn export_json(&self) -> Result<String, SchemaGraphError> {
        export::export_document(self)
    }

    /// Render `{ schemas, relationships, issues }`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaGraphError::Export`] if serialization fails.
    pub fn graph_json(&self) -> Result<String, SchemaGraphError> {
        export::graph_document(self)
    }

    /// Render `{ nodes, edges }`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaGraphError::Export`] if serialization fails.
    pub fn layout_json(&self) -> Result<String, SchemaGraphError> {
        export::layout_document(&self.layout)
    }
}

/// Counters of an [`Analysis`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub schemas: usize,
    pub relationships: usize,
    pub issues: usize,
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}
