//! The core diagnostic type for scan warnings.

use std::fmt;

use crate::{
    error::{Severity, error_code::ErrorCode, label::Label},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// warning[W201]: schema `UserSchema` is declared more than once
///   --> models.js:10:7
///    |
/// 10 | const UserSchema = new Schema({
///    |       ^^^^^^^^^^ redeclared here
///    |
///  3 | const UserSchema = new Schema({
///    |       ---------- first declared here
///    |
///    = help: the later declaration replaces the earlier one
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use schemagraph_parser::error::{Diagnostic, ErrorCode};
    /// # use schemagraph_parser::Span;
    ///
    /// let diag = Diagnostic::warning("unterminated schema body")
    ///     .with_code(ErrorCode::W100)
    ///     .with_label(Span::new(0..10), "opened here")
    ///     .with_help("add the closing `}`");
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Shift every label right by `offset` bytes.
    pub fn with_offset(mut self, offset: usize) -> Self {
        if offset != 0 {
            self.labels = self
                .labels
                .into_iter()
                .map(|label| label.offset_by(offset))
                .collect();
        }
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "warning[W001]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_warning() {
        let diag = Diagnostic::warning("test warning");

        assert!(diag.severity().is_warning());
        assert_eq!(diag.message(), "test warning");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::warning("schema `UserSchema` is declared more than once")
            .with_code(ErrorCode::W201)
            .with_label(Span::new(100..110), "redeclared here")
            .with_secondary_label(Span::new(6..16), "first declared here")
            .with_help("the later declaration replaces the earlier one");

        assert_eq!(diag.code(), Some(ErrorCode::W201));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(!diag.labels()[1].is_primary());
        assert_eq!(
            diag.help(),
            Some("the later declaration replaces the earlier one")
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warning("unterminated block comment").with_code(ErrorCode::W002);
        assert_eq!(diag.to_string(), "warning[W002]: unterminated block comment");
    }

    #[test]
    fn test_with_offset_moves_all_labels() {
        let diag = Diagnostic::warning("moved")
            .with_label(Span::new(0..2), "a")
            .with_secondary_label(Span::new(5..6), "b")
            .with_offset(40);

        assert_eq!(diag.labels()[0].span(), Span::new(40..42));
        assert_eq!(diag.labels()[1].span(), Span::new(45..46));
    }
}
