//! Splitting a schema body into its top-level fields.

use crate::{
    lexer,
    span::Span,
    tokens::{PositionedToken, Token},
};

/// One top-level `name: definition` entry of a schema body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition<'a> {
    name: &'a str,
    definition: &'a str,
    span: Span,
}

impl<'a> FieldDefinition<'a> {
    /// The field name, without quotes if the key was quoted.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The trimmed text after the top-level colon.
    pub fn definition(&self) -> &'a str {
        self.definition
    }

    /// Span of the whole entry, relative to the body.
    pub fn span(&self) -> Span {
        self.span
    }
}

fn depth_delta(token: &Token<'_>) -> isize {
    match token {
        Token::LeftBrace | Token::LeftBracket | Token::LeftParen => 1,
        Token::RightBrace | Token::RightBracket | Token::RightParen => -1,
        _ => 0,
    }
}

/// Split a schema body into fields, in source order.
///
/// Only commas outside every brace, bracket and parenthesis separate
/// fields; strings, comments and regular expressions are opaque. Entries
/// without a top-level colon (spreads, shorthand properties) are skipped,
/// and so are names containing whitespace.
///
/// ```
/// use schemagraph_parser::fields::split_fields;
///
/// let fields = split_fields("name: String, 'tags': [{ type: String }], ...base");
/// let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["name", "tags"]);
/// assert_eq!(fields[1].definition(), "[{ type: String }]");
/// ```
pub fn split_fields(body: &str) -> Vec<FieldDefinition<'_>> {
    let lexed = lexer::tokenize(body);
    let tokens = &lexed.tokens;

    let mut fields = Vec::new();
    let mut depth = 0isize;
    let mut segment_start = 0;

    for (i, positioned) in tokens.iter().enumerate() {
        if depth == 0 && positioned.token == Token::Comma {
            fields.extend(field_from_segment(
                body,
                &tokens[segment_start..i],
                positioned.span.start(),
            ));
            segment_start = i + 1;
        } else {
            depth = (depth + depth_delta(&positioned.token)).max(0);
        }
    }
    fields.extend(field_from_segment(
        body,
        &tokens[segment_start..],
        body.len(),
    ));

    log::trace!(fields = fields.len(); "Split schema body");
    fields
}

fn field_from_segment<'a>(
    body: &'a str,
    segment: &[PositionedToken<'a>],
    segment_end: usize,
) -> Option<FieldDefinition<'a>> {
    let first = segment.iter().position(|t| !t.token.is_trivia())?;

    let mut depth = 0isize;
    let colon = segment.iter().enumerate().skip(first).find_map(|(i, t)| {
        if depth == 0 && t.token == Token::Colon {
            return Some(i);
        }
        depth = (depth + depth_delta(&t.token)).max(0);
        None
    });
    let Some(colon) = colon else {
        log::trace!(entry = body[segment[first].span.start()..segment_end].trim(); "Skipping entry without a name");
        return None;
    };

    let name_start = segment[first].span.start();
    let name_end = segment[colon].span.start();
    let raw_name = body[name_start..name_end].trim();

    let name = match segment[first].token.as_string() {
        Some(content) if segment[first].span.end() - name_start == raw_name.len() => content,
        _ => raw_name,
    };
    if name.is_empty() || name.contains(char::is_whitespace) {
        log::trace!(name = raw_name; "Skipping field with an unsupported name");
        return None;
    }

    Some(FieldDefinition {
        name,
        definition: body[segment[colon].span.end()..segment_end].trim(),
        span: Span::new(name_start..segment_end),
    })
}
