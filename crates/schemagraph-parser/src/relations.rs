//! Classification of field definitions into relationship edges.
//!
//! A field produces at most one edge. The rules are tried in order and the
//! first one that matches decides the edge:
//!
//! 1. an `ObjectId` type marker followed by a `ref: 'Target'` marker is a
//!    foreign key, one-to-many if the definition is array shaped;
//! 2. an array wrapping an object that carries both markers, in either
//!    order, is a one-to-many foreign key;
//! 3. a `ref` marker with no `ObjectId` marker before it is a foreign key,
//!    with the same array test as rule 1;
//! 4. another declared schema used as a value (`type: AddressSchema`,
//!    `AddressSchema` or `[AddressSchema]`) is embedded, embedded-many when
//!    it sits inside brackets.

use schemagraph_core::{RelationKind, RelationshipEdge};

use crate::{
    fields::FieldDefinition,
    lexer,
    scanner::ScanResult,
    tokens::{PositionedToken, Token},
};

/// The significant tokens of one field definition.
struct Definition<'a> {
    tokens: Vec<PositionedToken<'a>>,
}

impl<'a> Definition<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            tokens: lexer::tokenize(text)
                .tokens
                .into_iter()
                .filter(|t| !t.token.is_trivia())
                .collect(),
        }
    }

    fn token(&self, i: usize) -> Option<&Token<'a>> {
        self.tokens.get(i).map(|t| &t.token)
    }

    fn is(&self, i: usize, expected: &Token<'_>) -> bool {
        self.token(i) == Some(expected)
    }

    fn identifier(&self, i: usize) -> Option<&'a str> {
        self.token(i).and_then(Token::as_identifier)
    }

    /// `type: <path>.ObjectId` starting at `i`.
    fn is_object_id_marker(&self, i: usize) -> bool {
        if self.identifier(i) != Some("type") || !self.is(i + 1, &Token::Colon) {
            return false;
        }
        let mut j = i + 2;
        let mut last = self.identifier(j);
        while self.is(j + 1, &Token::Dot) && self.identifier(j + 2).is_some() {
            j += 2;
            last = self.identifier(j);
        }
        last == Some("ObjectId")
    }

    /// `ref: '<Target>'` starting at `i`, returning the target.
    fn ref_marker(&self, i: usize) -> Option<&'a str> {
        if self.identifier(i) != Some("ref") || !self.is(i + 1, &Token::Colon) {
            return None;
        }
        self.token(i + 2)?.as_string()
    }

    fn object_id_markers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.tokens.len()).filter(|&i| self.is_object_id_marker(i))
    }

    fn ref_markers(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        (0..self.tokens.len()).filter_map(|i| self.ref_marker(i).map(|target| (i, target)))
    }

    /// A leading `[`, or a `[` directly wrapping an object literal.
    fn is_array_shaped(&self) -> bool {
        self.is(0, &Token::LeftBracket)
            || (0..self.tokens.len())
                .any(|i| self.is(i, &Token::LeftBracket) && self.is(i + 1, &Token::LeftBrace))
    }

    fn kind_by_shape(&self) -> RelationKind {
        if self.is_array_shaped() {
            RelationKind::OneToMany
        } else {
            RelationKind::OneToOne
        }
    }

    fn matching_brace(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (j, token) in self.tokens.iter().enumerate().skip(open) {
            match token.token {
                Token::LeftBrace => depth += 1,
                Token::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn typed_foreign_key(&self) -> Option<(&'a str, RelationKind)> {
        let marker = self.object_id_markers().next()?;
        let (_, target) = self.ref_markers().find(|&(i, _)| i > marker)?;
        Some((target, self.kind_by_shape()))
    }

    fn array_wrapped_foreign_key(&self) -> Option<&'a str> {
        (0..self.tokens.len())
            .filter(|&i| self.is(i, &Token::LeftBracket) && self.is(i + 1, &Token::LeftBrace))
            .find_map(|i| {
                let range = i + 1..self.matching_brace(i + 1)?;
                let has_marker = range.clone().any(|j| self.is_object_id_marker(j));
                let target = range.clone().find_map(|j| self.ref_marker(j))?;
                has_marker.then_some(target)
            })
    }

    fn shorthand_reference(&self) -> Option<(&'a str, RelationKind)> {
        let first_marker = self.object_id_markers().next();
        let (_, target) = self
            .ref_markers()
            .find(|&(i, _)| first_marker.is_none_or(|marker| i < marker))?;
        Some((target, self.kind_by_shape()))
    }

    /// The first declared schema in a value position whose display name is
    /// not `schema`, and whether it sits inside brackets.
    ///
    /// Self references are skipped rather than ending the search, so
    /// `[UserSchema, AddressSchema]` inside `User` embeds `Address`.
    fn embedded_schema(&self, schema: &str, scan: &ScanResult<'a>) -> Option<(&'a str, bool)> {
        let mut brackets = 0usize;
        for (i, positioned) in self.tokens.iter().enumerate() {
            match positioned.token {
                Token::LeftBracket => brackets += 1,
                Token::RightBracket => brackets = brackets.saturating_sub(1),
                Token::Identifier(name) => {
                    let in_value_position = i == 0
                        || self.is(i - 1, &Token::Colon)
                        || self.is(i - 1, &Token::LeftBracket)
                        || (brackets > 0 && self.is(i - 1, &Token::Comma));
                    if !in_value_position || self.is(i + 1, &Token::Dot) || !scan.is_declared(name)
                    {
                        continue;
                    }
                    let display = scan.display_name(name);
                    if display != schema {
                        return Some((display, brackets > 0));
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Classify one field of `schema` into a relationship edge.
///
/// `schema` is the display name of the schema owning the field and `scan`
/// provides the known declarations for embedded references. Returns `None`
/// when the field does not reference another schema.
pub fn extract_relationship(
    schema: &str,
    field: &FieldDefinition<'_>,
    scan: &ScanResult<'_>,
) -> Option<RelationshipEdge> {
    let definition = Definition::new(field.definition());

    let edge = if let Some((target, kind)) = definition.typed_foreign_key() {
        RelationshipEdge::foreign_key(schema, target, field.name(), kind)
    } else if let Some(target) = definition.array_wrapped_foreign_key() {
        RelationshipEdge::foreign_key(schema, target, field.name(), RelationKind::OneToMany)
    } else if let Some((target, kind)) = definition.shorthand_reference() {
        RelationshipEdge::foreign_key(schema, target, field.name(), kind)
    } else {
        let (target, many) = definition.embedded_schema(schema, scan)?;
        RelationshipEdge::embedded(schema, target, field.name(), many)
    };

    log::trace!(
        from = edge.from(),
        to = edge.to(),
        field = edge.field(),
        kind = edge.kind().to_string();
        "Extracted relationship"
    );
    Some(edge)
}
