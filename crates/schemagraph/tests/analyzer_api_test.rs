//! Integration tests for the Analyzer API
//!
//! These tests run whole analyses over realistic schema sources.

use schemagraph::{
    Analyzer, EXAMPLE_SCHEMAS, Issue, IssueCategory, IssueDetail, ReferenceMechanism,
    RelationKind, Session,
    config::{AnalysisConfig, AppConfig, LayoutConfig, StyleConfig},
};

const CONTENT_MODEL: &str = r#"
// FILE: models/user.js
const UserSchema = new Schema({
  name: String,
  posts: [{ type: Schema.Types.ObjectId, ref: 'Post' }],
  profile: { type: Schema.Types.ObjectId, ref: 'Profile' },
  comments: [{ type: Schema.Types.ObjectId, ref: 'Comment' }],
});

// FILE: models/post.js
const PostSchema = new Schema({
  title: String,
  comments: [{ type: Schema.Types.ObjectId, ref: 'Comment' }],
  tags: [TagSchema],
  featuredTag: TagSchema,
});

// FILE: models/leaves.js
const ProfileSchema = new Schema({ bio: String });
const CommentSchema = new Schema({ text: String });
const TagSchema = new Schema({ label: String });
"#;

fn of_category(issues: &[Issue], category: IssueCategory) -> Vec<&Issue> {
    issues
        .iter()
        .filter(|issue| issue.category() == category)
        .collect()
}

fn subjects(issues: &[&Issue]) -> Vec<String> {
    issues
        .iter()
        .map(|issue| issue.subject_schema().to_string())
        .collect()
}

#[test]
fn test_example_schemas() {
    let analysis = Analyzer::default().analyze(EXAMPLE_SCHEMAS).unwrap();
    let graph = analysis.graph();

    let ids: Vec<_> = graph.schemas().iter().map(|s| s.id()).collect();
    assert_eq!(ids, ["User", "Post", "Comment", "Profile", "Tag"]);
    assert_eq!(graph.relationships().len(), 8);
    assert!(analysis.diagnostics().is_empty());

    let issues = analysis.issues();
    assert!(of_category(issues, IssueCategory::BrokenReference).is_empty());

    let cycles = of_category(issues, IssueCategory::CircularDependency);
    assert_eq!(cycles.len(), 1);
    assert_eq!(
        cycles[0].detail(),
        &IssueDetail::CyclePath {
            cycle_path: vec!["User".into(), "Post".into(), "User".into()]
        }
    );

    let orphans = of_category(issues, IssueCategory::OrphanRisk);
    assert_eq!(subjects(&orphans), ["Tag"]);
    assert_eq!(
        orphans[0].message(),
        "\"Tag\" has no outgoing references. If Post documents are deleted, orphans may remain"
    );

    let cascades = of_category(issues, IssueCategory::CascadeRisk);
    assert_eq!(subjects(&cascades), ["Post"]);
    assert_eq!(
        cascades[0].message(),
        "\"Post\" references 3 other schemas (User, Comment, Tag). Consider cascade deletion strategy"
    );
}

#[test]
fn test_content_model_across_units() {
    let analysis = Analyzer::default().analyze(CONTENT_MODEL).unwrap();
    let graph = analysis.graph();

    assert_eq!(graph.schemas().len(), 5);
    assert_eq!(graph.relationships().len(), 6);

    let issues = analysis.issues();
    assert!(of_category(issues, IssueCategory::BrokenReference).is_empty());
    assert!(of_category(issues, IssueCategory::CircularDependency).is_empty());
    assert_eq!(
        subjects(&of_category(issues, IssueCategory::OrphanRisk)),
        ["Profile", "Comment", "Tag"]
    );
    assert_eq!(
        subjects(&of_category(issues, IssueCategory::CascadeRisk)),
        ["User"]
    );

    let embedded: Vec<_> = graph
        .outgoing("Post")
        .filter(|edge| edge.reference_mechanism() == ReferenceMechanism::Embedded)
        .map(|edge| (edge.field(), edge.kind()))
        .collect();
    assert_eq!(
        embedded,
        [
            ("tags", RelationKind::EmbeddedMany),
            ("featuredTag", RelationKind::EmbeddedOne)
        ]
    );
}

#[test]
fn test_broken_reference_keeps_edge() {
    let source = "const OrderSchema = new Schema({ buyer: { type: Types.ObjectId, ref: 'Customer' } });";
    let analysis = Analyzer::default().analyze(source).unwrap();

    assert_eq!(analysis.graph().relationships().len(), 1);
    assert_eq!(analysis.layout().edges().len(), 1);
    let broken = of_category(analysis.issues(), IssueCategory::BrokenReference);
    assert_eq!(subjects(&broken), ["Order"]);
    assert_eq!(analysis.summary().errors, 1);
}

#[test]
fn test_registered_name_wins() {
    let source = r#"
const accountShape = new Schema({ owner: { type: Schema.Types.ObjectId, ref: 'Member' } });
const MemberSchema = new Schema({ name: String });
module.exports = mongoose.model('Member', MemberSchema);
mongoose.model('Account', accountShape);
"#;
    let analysis = Analyzer::default().analyze(source).unwrap();
    let ids: Vec<_> = analysis
        .graph()
        .schemas()
        .iter()
        .map(|s| s.id())
        .collect();
    assert_eq!(ids, ["Account", "Member"]);
    assert!(of_category(analysis.issues(), IssueCategory::BrokenReference).is_empty());
}

#[test]
fn test_analysis_is_deterministic() {
    let analyzer = Analyzer::default();
    let first = analyzer.analyze(EXAMPLE_SCHEMAS).unwrap();
    let second = analyzer.analyze(EXAMPLE_SCHEMAS).unwrap();

    assert_eq!(first.graph(), second.graph());
    assert_eq!(first.issues(), second.issues());
    assert_eq!(first.layout(), second.layout());
    assert_eq!(first.graph_json().unwrap(), second.graph_json().unwrap());
}

#[test]
fn test_export_is_byte_identical_for_one_analysis() {
    let analysis = Analyzer::default().analyze(EXAMPLE_SCHEMAS).unwrap();
    let first = analysis.export_json().unwrap();
    assert_eq!(first, analysis.export_json().unwrap());
    assert!(first.starts_with("{\n  \"timestamp\": \""));
    assert!(first.contains("\"issuesFound\": 3"));
}

#[test]
fn test_configuration_flows_through() {
    let config = AppConfig::new(
        LayoutConfig::new(100.0, 10.0),
        StyleConfig::new("red", "blue"),
        AnalysisConfig::new(10),
    );
    let analysis = Analyzer::new(config).analyze(EXAMPLE_SCHEMAS).unwrap();

    assert!(of_category(analysis.issues(), IssueCategory::CascadeRisk).is_empty());
    let edge = &analysis.layout().edges()[0];
    assert_eq!(edge.style().color().to_hex(), "#ff0000");
}

#[test]
fn test_session_replaces_analysis_on_every_successful_run() {
    let mut session = Session::default();
    session.analyze(EXAMPLE_SCHEMAS).unwrap();
    assert_eq!(session.current().unwrap().graph().relationships().len(), 8);

    // Input without schemas still analyzes cleanly and publishes an empty graph.
    session.analyze("not a schema at all {").unwrap();
    assert!(session.current().unwrap().graph().is_empty());
}

#[test]
fn test_session_without_previous_analysis_stays_empty_on_failure() {
    let config = AppConfig::new(
        LayoutConfig::new(280.0, -5.0),
        StyleConfig::default(),
        AnalysisConfig::default(),
    );
    let mut session = Session::new(Analyzer::new(config));

    assert!(session.analyze(EXAMPLE_SCHEMAS).is_err());
    assert!(session.current().is_none());
}
