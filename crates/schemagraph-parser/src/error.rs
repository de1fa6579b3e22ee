//! Diagnostics reported while scanning schema sources.
//!
//! Scanning never fails: unusual or malformed input degrades to fewer
//! schemas and relationships. What the scanner noticed along the way is
//! reported as [`Diagnostic`] warnings carrying an [`ErrorCode`], labeled
//! source spans and optional help text.
//!
//! # Example
//!
//! ```
//! # use schemagraph_parser::error::{Diagnostic, ErrorCode};
//! # use schemagraph_parser::Span;
//!
//! let span = Span::new(100..120);
//! let original_span = Span::new(50..70);
//!
//! let diag = Diagnostic::warning("schema `UserSchema` is declared more than once")
//!     .with_code(ErrorCode::W201)
//!     .with_label(span, "redeclared here")
//!     .with_secondary_label(original_span, "first declared here")
//!     .with_help("the later declaration replaces the earlier one");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use schemagraph_core::Severity;
