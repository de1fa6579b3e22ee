//! Token definitions for the schema source lexer.
//!
//! The token set is deliberately small: just enough of the host language
//! to find declarations and match brackets. Strings, comments and regular
//! expression literals are kept as single tokens so that the brackets and
//! quotes inside them never count as structure.

use crate::span::Span;

/// A lexical token borrowed from the scanned source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    // Keywords
    Const,
    Let,
    Var,
    New,
    Export,
    Default,

    /// An identifier such as `UserSchema`, `$meta` or `_id`.
    Identifier(&'a str),
    /// A quoted or template string. `content` excludes the quotes and keeps
    /// escape sequences as written.
    StringLiteral {
        content: &'a str,
        quote: char,
        terminated: bool,
    },
    /// An integer or decimal literal, as written.
    Number(&'a str),
    /// A regular expression literal including delimiters and flags.
    RegexLiteral(&'a str),

    // Punctuation
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Colon,
    Equals,
    Dot,
    LeftAngle,
    RightAngle,
    /// Any other single character.
    Other(char),

    // Trivia
    LineComment(&'a str),
    BlockComment {
        terminated: bool,
    },
    Whitespace,
    Newline,
}

impl<'a> Token<'a> {
    /// Returns `true` for comments and whitespace.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::LineComment(_) | Token::BlockComment { .. } | Token::Whitespace | Token::Newline
        )
    }

    /// Returns the identifier text if this is an identifier.
    pub fn as_identifier(&self) -> Option<&'a str> {
        match self {
            Token::Identifier(name) => Some(*name),
            _ => None,
        }
    }

    /// Returns the content of a closed string literal.
    pub fn as_string(&self) -> Option<&'a str> {
        match self {
            Token::StringLiteral {
                content,
                terminated: true,
                ..
            } => Some(*content),
            _ => None,
        }
    }

    /// Returns `true` if a `/` following this token starts a regular
    /// expression literal rather than a division.
    pub(crate) fn allows_regex(&self) -> bool {
        matches!(
            self,
            Token::Colon
                | Token::LeftParen
                | Token::Comma
                | Token::Equals
                | Token::LeftBracket
                | Token::LeftBrace
                | Token::RightBrace
                | Token::Semicolon
                | Token::Other('!' | '&' | '|' | '?')
        )
    }
}

/// A token together with its byte span in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken<'a> {
    pub token: Token<'a>,
    pub span: Span,
}

impl<'a> PositionedToken<'a> {
    pub fn new(token: Token<'a>, span: Span) -> Self {
        Self { token, span }
    }
}
