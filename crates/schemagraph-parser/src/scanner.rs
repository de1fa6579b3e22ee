//! Structural scanner locating schema declarations and model registrations.
//!
//! The scanner works on the token stream of each [`SourceUnit`] and looks
//! for two shapes without parsing the host language:
//!
//! - schema declarations, `const UserSchema = new mongoose.Schema({ ... })`
//!   with `let` or `var` in place of `const`, with or without `new`, and
//!   with optional type arguments such as `Schema<IUser>`;
//! - model registrations, `model('User', UserSchema)` with optional type
//!   arguments, either as a plain call or behind `export default` or
//!   `module.exports =`.
//!
//! Declarations of all units are merged into one namespace in which a later
//! declaration of the same name replaces the earlier body.

use std::fmt;

use indexmap::IndexMap;

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    lexer,
    span::Span,
    tokens::{PositionedToken, Token},
    units::{self, SourceUnit},
};

/// The syntactic position a model registration was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationForm {
    /// A plain call, possibly assigned to a variable.
    Direct,
    /// `export default model(...)`.
    DefaultExport,
    /// `module.exports = model(...)`.
    ModuleExports,
}

impl From<RegistrationForm> for &'static str {
    fn from(val: RegistrationForm) -> Self {
        match val {
            RegistrationForm::Direct => "direct",
            RegistrationForm::DefaultExport => "export default",
            RegistrationForm::ModuleExports => "module.exports",
        }
    }
}

impl fmt::Display for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A schema constructor bound to an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDeclaration<'a> {
    name: &'a str,
    body: &'a str,
    span: Span,
    body_offset: usize,
    unit: Option<&'a str>,
}

impl<'a> SchemaDeclaration<'a> {
    /// The identifier the schema is bound to.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The text between the braces of the schema definition object.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Span of the identifier within the full input.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Byte offset of [`body`](Self::body) within the full input.
    pub fn body_offset(&self) -> usize {
        self.body_offset
    }

    /// Name of the source unit the declaration was found in.
    pub fn unit(&self) -> Option<&'a str> {
        self.unit
    }
}

/// A `model(name, schema)` call binding a display name to a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRegistration<'a> {
    display_name: &'a str,
    schema_name: &'a str,
    form: RegistrationForm,
    span: Span,
}

impl<'a> ModelRegistration<'a> {
    /// The model name given as the first argument.
    pub fn display_name(&self) -> &'a str {
        self.display_name
    }

    /// The schema identifier given as the second argument.
    pub fn schema_name(&self) -> &'a str {
        self.schema_name
    }

    pub fn form(&self) -> RegistrationForm {
        self.form
    }

    /// Span from `model` to the schema identifier within the full input.
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Everything found in the input by [`scan`].
#[derive(Debug, Clone, Default)]
pub struct ScanResult<'a> {
    declarations: IndexMap<&'a str, SchemaDeclaration<'a>>,
    registrations: IndexMap<&'a str, ModelRegistration<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ScanResult<'a> {
    /// Schema declarations keyed by identifier, in order of first
    /// declaration.
    pub fn declarations(&self) -> &IndexMap<&'a str, SchemaDeclaration<'a>> {
        &self.declarations
    }

    /// Model registrations keyed by schema identifier. When a schema is
    /// registered more than once the last registration is kept.
    pub fn registrations(&self) -> &IndexMap<&'a str, ModelRegistration<'a>> {
        &self.registrations
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns `true` if `name` is a declared schema identifier.
    pub fn is_declared(&self, name: &str) -> bool {
        self.declarations.contains_key(name)
    }

    /// Resolve a schema identifier to its display name.
    ///
    /// The name of an explicit model registration wins. Otherwise a
    /// trailing `Schema` (any case) is removed from the identifier.
    pub fn display_name(&self, declared: &'a str) -> &'a str {
        match self.registrations.get(declared) {
            Some(registration) => registration.display_name,
            None => strip_schema_suffix(declared),
        }
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Remove a trailing case-insensitive `Schema` from an identifier.
///
/// An identifier that consists of the suffix alone is returned unchanged.
///
/// ```
/// use schemagraph_parser::scanner::strip_schema_suffix;
///
/// assert_eq!(strip_schema_suffix("PostSchema"), "Post");
/// assert_eq!(strip_schema_suffix("addressschema"), "address");
/// assert_eq!(strip_schema_suffix("Comment"), "Comment");
/// assert_eq!(strip_schema_suffix("Schema"), "Schema");
/// ```
pub fn strip_schema_suffix(name: &str) -> &str {
    const SUFFIX: &str = "schema";
    let Some(cut) = name.len().checked_sub(SUFFIX.len()) else {
        return name;
    };
    if cut == 0 || !name.is_char_boundary(cut) {
        return name;
    }
    let (stem, suffix) = name.split_at(cut);
    if suffix.eq_ignore_ascii_case(SUFFIX) {
        stem
    } else {
        name
    }
}

/// Scan the whole input, merging all source units into one namespace.
pub fn scan(input: &str) -> ScanResult<'_> {
    let mut collector = DiagnosticCollector::new();
    let mut declarations: IndexMap<&str, SchemaDeclaration<'_>> = IndexMap::new();
    let mut registrations: IndexMap<&str, ModelRegistration<'_>> = IndexMap::new();

    for unit in units::split_units(input) {
        let unit_scan = UnitScanner::new(&unit).scan();
        collector.extend_offset(unit_scan.diagnostics, 0);

        for declaration in unit_scan.declarations {
            let (name, span) = (declaration.name, declaration.span);
            if let Some(previous) = declarations.insert(name, declaration) {
                collector.emit(
                    Diagnostic::warning(format!("schema `{name}` is declared more than once"))
                        .with_code(ErrorCode::W201)
                        .with_label(span, "redeclared here")
                        .with_secondary_label(previous.span, "first declared here")
                        .with_help("the later declaration replaces the earlier one"),
                );
            }
        }

        for registration in unit_scan.registrations {
            log::trace!(
                schema = registration.schema_name;
                "Found {} model registration `{}`",
                registration.form,
                registration.display_name
            );
            if let Some(previous) = registrations.insert(registration.schema_name, registration)
            {
                log::debug!(
                    schema = previous.schema_name,
                    replaced = previous.display_name;
                    "Schema registered more than once, keeping the last registration"
                );
            }
        }
    }

    for registration in registrations.values() {
        if !declarations.contains_key(registration.schema_name) {
            collector.emit(
                Diagnostic::warning(format!(
                    "model `{}` is registered for unknown schema `{}`",
                    registration.display_name, registration.schema_name
                ))
                .with_code(ErrorCode::W200)
                .with_label(registration.span, "registered here")
                .with_help(format!(
                    "declare `{}` in one of the analyzed files",
                    registration.schema_name
                )),
            );
        }
    }

    log::debug!(
        declarations = declarations.len(),
        registrations = registrations.len();
        "Scanned schema sources"
    );

    ScanResult {
        declarations,
        registrations,
        diagnostics: collector.finish(),
    }
}

/// Findings of a single unit, with spans in full-input coordinates.
struct UnitScan<'a> {
    declarations: Vec<SchemaDeclaration<'a>>,
    registrations: Vec<ModelRegistration<'a>>,
    diagnostics: Vec<Diagnostic>,
}

struct UnitScanner<'a> {
    text: &'a str,
    offset: usize,
    unit: Option<&'a str>,
    tokens: Vec<PositionedToken<'a>>,
    collector: DiagnosticCollector,
}

impl<'a> UnitScanner<'a> {
    fn new(unit: &SourceUnit<'a>) -> Self {
        let lexed = lexer::tokenize(unit.text());
        let mut collector = DiagnosticCollector::new();
        collector.extend_offset(lexed.diagnostics, unit.offset());

        Self {
            text: unit.text(),
            offset: unit.offset(),
            unit: unit.name(),
            tokens: lexed
                .tokens
                .into_iter()
                .filter(|t| !t.token.is_trivia())
                .collect(),
            collector,
        }
    }

    fn scan(mut self) -> UnitScan<'a> {
        let mut declarations = Vec::new();
        let mut registrations = Vec::new();

        for i in 0..self.tokens.len() {
            match self.tokens[i].token {
                Token::Const | Token::Let | Token::Var => {
                    if let Some(declaration) = self.declaration_at(i) {
                        declarations.push(declaration);
                    }
                }
                Token::Identifier("model") => {
                    if let Some(registration) = self.registration_at(i) {
                        registrations.push(registration);
                    }
                }
                _ => {}
            }
        }

        log::trace!(
            unit = self.unit.unwrap_or("<input>"),
            declarations = declarations.len(),
            registrations = registrations.len();
            "Scanned source unit"
        );

        UnitScan {
            declarations,
            registrations,
            diagnostics: self.collector.finish(),
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

    fn global(&self, span: Span) -> Span {
        span.offset_by(self.offset)
    }

    /// Match `<declare> Name = [new] path.Schema [<...>] ( {` at `i` and
    /// extract the body up to the matching brace.
    fn declaration_at(&mut self, i: usize) -> Option<SchemaDeclaration<'a>> {
        let name = self.identifier(i + 1)?;
        if !self.is(i + 2, &Token::Equals) {
            return None;
        }
        let mut j = i + 3;
        if self.is(j, &Token::New) {
            j += 1;
        }
        let (after_path, constructor) = self.dotted_path(j)?;
        if constructor != "Schema" {
            return None;
        }
        let j = self.skip_type_arguments(after_path)?;
        if !self.is(j, &Token::LeftParen) || !self.is(j + 1, &Token::LeftBrace) {
            return None;
        }

        let open = j + 1;
        let name_span = self.tokens[i + 1].span;
        let open_span = self.tokens[open].span;
        let Some(close) = self.matching_brace(open) else {
            let diagnostic =
                Diagnostic::warning(format!("schema `{name}` has an unterminated body"))
                    .with_code(ErrorCode::W100)
                    .with_label(self.global(open_span), "this brace is never closed")
                    .with_secondary_label(self.global(name_span), "declared here")
                    .with_help("add the closing `}`; the declaration is ignored until then");
            self.collector.emit(diagnostic);
            return None;
        };

        let body_start = open_span.end();
        let body_end = self.tokens[close].span.start();
        Some(SchemaDeclaration {
            name,
            body: &self.text[body_start..body_end],
            span: self.global(name_span),
            body_offset: self.offset + body_start,
            unit: self.unit,
        })
    }

    /// Match `model [<...>] ( 'Name' , SchemaIdent )` at the `model`
    /// identifier `i`.
    fn registration_at(&mut self, i: usize) -> Option<ModelRegistration<'a>> {
        let open = self.skip_type_arguments(i + 1)?;
        if !self.is(open, &Token::LeftParen) {
            return None;
        }
        let display_name = self.token(open + 1)?.as_string()?;
        if !self.is(open + 2, &Token::Comma) {
            // A single-argument call looks a model up instead of registering it.
            return None;
        }

        let schema_name = self.identifier(open + 3).filter(|_| {
            matches!(
                self.token(open + 4),
                Some(Token::RightParen | Token::Comma)
            )
        });
        let Some(schema_name) = schema_name else {
            let end = self
                .tokens
                .get(open + 3)
                .map_or(self.tokens[open + 2].span, |t| t.span);
            let diagnostic = Diagnostic::warning(format!(
                "model `{display_name}` is not registered with a schema identifier"
            ))
            .with_code(ErrorCode::W101)
            .with_label(
                self.global(self.tokens[i].span.union(end)),
                ErrorCode::W101.description(),
            )
            .with_help("pass the schema variable as the second argument");
            self.collector.emit(diagnostic);
            return None;
        };

        Some(ModelRegistration {
            display_name,
            schema_name,
            form: self.registration_form(i),
            span: self.global(self.tokens[i].span.union(self.tokens[open + 3].span)),
        })
    }

    /// Classify the statement a `model` call at `i` appears in.
    fn registration_form(&self, i: usize) -> RegistrationForm {
        // Walk back over a receiver chain such as `mongoose.`.
        let mut start = i;
        while start >= 2
            && self.is(start - 1, &Token::Dot)
            && self.identifier(start - 2).is_some()
        {
            start -= 2;
        }

        if start >= 2 && self.is(start - 2, &Token::Export) && self.is(start - 1, &Token::Default)
        {
            RegistrationForm::DefaultExport
        } else if start >= 4
            && self.identifier(start - 4) == Some("module")
            && self.is(start - 3, &Token::Dot)
            && self.identifier(start - 2) == Some("exports")
            && self.is(start - 1, &Token::Equals)
        {
            RegistrationForm::ModuleExports
        } else {
            RegistrationForm::Direct
        }
    }

    /// Match `Ident (. Ident)*` at `i`, returning the index after the path
    /// and its last segment.
    fn dotted_path(&self, i: usize) -> Option<(usize, &'a str)> {
        let mut last = self.identifier(i)?;
        let mut j = i + 1;
        while self.is(j, &Token::Dot) {
            let Some(segment) = self.identifier(j + 1) else {
                break;
            };
            last = segment;
            j += 2;
        }
        Some((j, last))
    }

    /// Skip a balanced `<...>` list at `i`, if present.
    ///
    /// Returns `None` if the list is not closed before the end of the
    /// statement.
    fn skip_type_arguments(&self, i: usize) -> Option<usize> {
        if !self.is(i, &Token::LeftAngle) {
            return Some(i);
        }
        let mut depth = 0usize;
        for (j, token) in self.tokens.iter().enumerate().skip(i) {
            match token.token {
                Token::LeftAngle => depth += 1,
                Token::RightAngle => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j + 1);
                    }
                }
                Token::Semicolon | Token::LeftParen => return None,
                _ => {}
            }
        }
        None
    }

    /// Index of the `}` matching the `{` at `open`.
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
}
