//! Codes identifying scan diagnostics.
//!
//! Codes are grouped by the stage that reports them:
//! - `W0xx` - Lexer warnings
//! - `W1xx` - Declaration scanning warnings
//! - `W2xx` - Name resolution warnings

use std::fmt;

/// Codes for categorizing scan diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Warnings (W0xx)
    // =========================================================================
    /// Unterminated string literal.
    ///
    /// A quoted or template string was opened but never closed. Quoted
    /// strings end at the line break, template strings at the end of input.
    W001,

    /// Unterminated block comment.
    ///
    /// A `/*` comment runs to the end of the input.
    W002,

    // =========================================================================
    // Declaration Warnings (W1xx)
    // =========================================================================
    /// Unterminated schema body.
    ///
    /// A schema constructor's opening brace has no matching closing brace,
    /// so the declaration is ignored.
    W100,

    /// Malformed model registration.
    ///
    /// A `model(...)` call does not have a string name followed by a
    /// schema identifier.
    W101,

    // =========================================================================
    // Resolution Warnings (W2xx)
    // =========================================================================
    /// Model registration for an unknown schema.
    ///
    /// The registered schema identifier is not declared in any unit.
    W200,

    /// Schema declared more than once.
    ///
    /// The later declaration's body replaces the earlier one.
    W201,

    /// Duplicate display name.
    ///
    /// Two schema declarations resolve to the same display name; the later
    /// one replaces the earlier in the graph.
    W202,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "W001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::W001 => "W001",
            ErrorCode::W002 => "W002",
            ErrorCode::W100 => "W100",
            ErrorCode::W101 => "W101",
            ErrorCode::W200 => "W200",
            ErrorCode::W201 => "W201",
            ErrorCode::W202 => "W202",
        }
    }

    /// Returns a short description of what this code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::W001 => "unterminated string literal",
            ErrorCode::W002 => "unterminated block comment",
            ErrorCode::W100 => "unterminated schema body",
            ErrorCode::W101 => "malformed model registration",
            ErrorCode::W200 => "registration for unknown schema",
            ErrorCode::W201 => "schema declared more than once",
            ErrorCode::W202 => "duplicate display name",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
