//! Structural integrity issues found by static analysis.
//!
//! Every issue belongs to exactly one [`IssueCategory`], and the category
//! fixes its [`Severity`]. The category-specific payload lives in
//! [`IssueDetail`]; constructors keep the three in agreement.

use std::fmt;

use serde::Serialize;

/// How serious an issue or diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    /// Returns `true` if this is an informational severity.
    pub fn is_info(&self) -> bool {
        matches!(self, Severity::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// The kind of structural risk an issue describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCategory {
    /// A relationship points at a schema that does not exist.
    BrokenReference,
    /// Schemas reference each other in a loop.
    CircularDependency,
    /// A referenced schema that references nothing itself.
    OrphanRisk,
    /// A schema holding many foreign keys.
    CascadeRisk,
}

impl IssueCategory {
    /// The severity every issue of this category carries.
    pub fn severity(self) -> Severity {
        match self {
            Self::BrokenReference => Severity::Error,
            Self::CircularDependency | Self::OrphanRisk => Severity::Warning,
            Self::CascadeRisk => Severity::Info,
        }
    }
}

impl From<IssueCategory> for &'static str {
    fn from(val: IssueCategory) -> Self {
        match val {
            IssueCategory::BrokenReference => "broken-reference",
            IssueCategory::CircularDependency => "circular-dependency",
            IssueCategory::OrphanRisk => "orphan-risk",
            IssueCategory::CascadeRisk => "cascade-risk",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Category-specific issue payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum IssueDetail {
    /// The unresolved target of a broken reference.
    TargetSchema { target_schema: String },
    /// The schemas of a cycle, starting and ending with the same schema.
    CyclePath { cycle_path: Vec<String> },
    /// Every distinct schema referencing an orphan-risk schema.
    ReferencingSchemas { referencing_schemas: Vec<String> },
    /// Every distinct foreign-key target of a cascade-risk schema.
    TargetSchemas { target_schemas: Vec<String> },
}

/// A single finding of static analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    severity: Severity,
    category: IssueCategory,
    message: String,
    subject_schema: String,
    #[serde(flatten)]
    detail: IssueDetail,
}

impl Issue {
    /// A relationship from `subject` through `field` to the missing `target`.
    pub fn broken_reference(subject: &str, field: &str, target: &str) -> Self {
        Self::new(
            IssueCategory::BrokenReference,
            format!(
                "\"{subject}.{field}\" references \"{target}\" which doesn't exist in your schemas"
            ),
            subject,
            IssueDetail::TargetSchema {
                target_schema: target.to_string(),
            },
        )
    }

    /// A cycle found from `subject`. `path` starts and ends with the
    /// repeated schema.
    pub fn circular_dependency(subject: &str, path: Vec<String>) -> Self {
        Self::new(
            IssueCategory::CircularDependency,
            format!("Circular reference detected: {}", path.join(" → ")),
            subject,
            IssueDetail::CyclePath { cycle_path: path },
        )
    }

    /// `subject` is referenced by `referencers` yet references nothing.
    pub fn orphan_risk(subject: &str, referencers: Vec<String>) -> Self {
        Self::new(
            IssueCategory::OrphanRisk,
            format!(
                "\"{subject}\" has no outgoing references. If {} documents are deleted, orphans may remain",
                referencers.join(", ")
            ),
            subject,
            IssueDetail::ReferencingSchemas {
                referencing_schemas: referencers,
            },
        )
    }

    /// `subject` holds `foreign_keys` foreign-key relationships to `targets`.
    pub fn cascade_risk(subject: &str, foreign_keys: usize, targets: Vec<String>) -> Self {
        Self::new(
            IssueCategory::CascadeRisk,
            format!(
                "\"{subject}\" references {foreign_keys} other schemas ({}). Consider cascade deletion strategy",
                targets.join(", ")
            ),
            subject,
            IssueDetail::TargetSchemas {
                target_schemas: targets,
            },
        )
    }

    fn new(category: IssueCategory, message: String, subject: &str, detail: IssueDetail) -> Self {
        Self {
            severity: category.severity(),
            category,
            message,
            subject_schema: subject.to_string(),
            detail,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn category(&self) -> IssueCategory {
        self.category
    }

    /// Human readable description of the issue.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The schema the issue is reported against.
    pub fn subject_schema(&self) -> &str {
        &self.subject_schema
    }

    pub fn detail(&self) -> &IssueDetail {
        &self.detail
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.category, self.message)
    }
}
