//! Lexical analyzer for schema source text.
//!
//! The lexer converts source text into a stream of [`Token`]s. It never
//! fails: characters it does not know become [`Token::Other`], and strings
//! or comments left open at the end of a line or of the input are closed
//! implicitly and reported as warnings.
//!
//! A `/` starts a regular expression literal only where an expression may
//! begin (after `:`, `(`, `,`, `=` and similar), otherwise it is a plain
//! character, so `a / b / c` never swallows the text in between.

use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, delimited, not, opt, preceded, repeat, terminated},
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::{any, none_of, one_of, rest, take_until, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O>;

/// Parse line comment starting with '//'
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded("//", take_while(0.., |c| c != '\n'))
        .map(Token::LineComment)
        .parse_next(input)
}

/// Parse a block comment. An unclosed comment runs to the end of input.
fn block_comment<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded(
        "/*",
        alt((
            terminated(take_until(0.., "*/"), "*/").value(true),
            rest.value(false),
        )),
    )
    .map(|terminated| Token::BlockComment { terminated })
    .parse_next(input)
}

/// Parse a single or double quoted string.
///
/// Escapes are skipped over, not decoded. An unclosed string stops before
/// the line break.
fn quoted_string<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let content = repeat(
        0..,
        alt((
            preceded('\\', any).void(),
            none_of([quote, '\\', '\n']).void(),
        )),
    )
    .map(|()| ())
    .take()
    .parse_next(input)?;
    let terminated = opt(quote).parse_next(input)?.is_some();

    Ok(Token::StringLiteral {
        content,
        quote,
        terminated,
    })
}

/// Parse a template string. Template strings may span lines; an unclosed
/// one runs to the end of input.
fn template_string<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '`'.parse_next(input)?;
    let content = repeat(
        0..,
        alt((preceded('\\', any).void(), none_of(['`', '\\']).void())),
    )
    .map(|()| ())
    .take()
    .parse_next(input)?;
    let terminated = opt('`').parse_next(input)?.is_some();

    Ok(Token::StringLiteral {
        content,
        quote: '`',
        terminated,
    })
}

fn regex_escape(input: &mut Input<'_>) -> IResult<()> {
    preceded('\\', none_of(['\n'])).void().parse_next(input)
}

/// Parse a character class inside a regular expression, where `/` does
/// not terminate the literal.
fn regex_class(input: &mut Input<'_>) -> IResult<()> {
    delimited(
        '[',
        repeat(0.., alt((regex_escape, none_of([']', '\\', '\n']).void()))).map(|()| ()),
        ']',
    )
    .parse_next(input)
}

/// Parse a regular expression literal such as `/^[a-z/]+$/gi`.
///
/// Fails without consuming input if the literal does not close on the
/// same line.
fn regex_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        '/',
        not(one_of(['/', '*'])),
        repeat(
            1..,
            alt((
                regex_escape,
                regex_class,
                none_of(['/', '\\', '[', '\n']).void(),
            )),
        )
        .map(|()| ()),
        '/',
        take_while(0.., |c: char| c.is_ascii_alphabetic()),
    )
        .take()
        .map(Token::RegexLiteral)
        .parse_next(input)
}

/// Parse an integer or decimal number
fn number<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (digit1, opt(('.', digit1)))
        .take()
        .map(Token::Number)
        .parse_next(input)
}

/// Parse an identifier, mapping reserved words to their keyword tokens.
fn identifier<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    (
        one_of(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    )
        .take()
        .map(|word: &str| match word {
            "const" => Token::Const,
            "let" => Token::Let,
            "var" => Token::Var,
            "new" => Token::New,
            "export" => Token::Export,
            "default" => Token::Default,
            _ => Token::Identifier(word),
        })
        .parse_next(input)
}

/// Parse single character punctuation
fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
        '['.value(Token::LeftBracket),
        ']'.value(Token::RightBracket),
        '('.value(Token::LeftParen),
        ')'.value(Token::RightParen),
        ','.value(Token::Comma),
        ';'.value(Token::Semicolon),
        ':'.value(Token::Colon),
        '='.value(Token::Equals),
        '.'.value(Token::Dot),
        '<'.value(Token::LeftAngle),
        '>'.value(Token::RightAngle),
    ))
    .parse_next(input)
}

/// Parse whitespace (spaces, tabs, etc. but not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse newline
fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

fn other<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    any.map(Token::Other).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>, regex_allowed: bool) -> IResult<PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let regex = if regex_allowed {
        opt(regex_literal).parse_next(input)?
    } else {
        None
    };

    let token = match regex {
        Some(token) => token,
        None => alt((
            line_comment,    // Must come before `other`
            block_comment,   // Must come before `other`
            quoted_string,
            template_string,
            number,
            identifier,
            punctuation,
            newline,         // Must come before whitespace
            whitespace,
            other,
        ))
        .parse_next(input)?,
    };

    let end_pos = input.current_token_start();
    Ok(PositionedToken::new(token, Span::new(start_pos..end_pos)))
}

/// The output of [`tokenize`]: every token, trivia included, and the
/// warnings noticed along the way.
#[derive(Debug, Clone, Default)]
pub struct Lexed<'a> {
    pub tokens: Vec<PositionedToken<'a>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
    regex_allowed: bool,
}

impl<'a> Lexer<'a> {
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
            regex_allowed: true,
        }
    }

    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input, self.regex_allowed) {
                Ok(token) => self.push(token),
                Err(_) => {
                    // `other` accepts any character, so this only guards
                    // against a stalled stream.
                    log::trace!(position = input.current_token_start(); "Skipping unlexable character");
                    if input.next_token().is_none() {
                        break;
                    }
                }
            }
        }
    }

    fn push(&mut self, token: PositionedToken<'a>) {
        match token.token {
            Token::StringLiteral {
                quote,
                terminated: false,
                ..
            } => self.diagnostics.emit(
                Diagnostic::warning("unterminated string literal")
                    .with_code(ErrorCode::W001)
                    .with_label(token.span, ErrorCode::W001.description())
                    .with_help(format!("add the closing `{quote}`")),
            ),
            Token::BlockComment { terminated: false } => self.diagnostics.emit(
                Diagnostic::warning("unterminated block comment")
                    .with_code(ErrorCode::W002)
                    .with_label(token.span, ErrorCode::W002.description())
                    .with_help("add `*/` to close the comment"),
            ),
            _ => {}
        }

        if !token.token.is_trivia() {
            self.regex_allowed = token.token.allows_regex();
        }
        self.tokens.push(token);
    }

    fn finish(self) -> Lexed<'a> {
        Lexed {
            tokens: self.tokens,
            diagnostics: self.diagnostics.finish(),
        }
    }
}

/// Split source text into tokens.
///
/// Spans are byte offsets into `input`. Tokenizing never fails; malformed
/// constructs are reported in [`Lexed::diagnostics`].
pub fn tokenize(input: &str) -> Lexed<'_> {
    let mut lexer = Lexer::new();
    lexer.tokenize(LocatingSlice::new(input));
    let lexed = lexer.finish();
    log::trace!(
        tokens = lexed.tokens.len(),
        diagnostics = lexed.diagnostics.len();
        "Tokenized source"
    );
    lexed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token<'_>> {
        tokenize(input)
            .tokens
            .into_iter()
            .map(|t| t.token)
            .filter(|t| !t.is_trivia())
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("const let var new export default constant $id _x"),
            vec![
                Token::Const,
                Token::Let,
                Token::Var,
                Token::New,
                Token::Export,
                Token::Default,
                Token::Identifier("constant"),
                Token::Identifier("$id"),
                Token::Identifier("_x"),
            ]
        );
    }

    #[test]
    fn test_declaration_tokens() {
        assert_eq!(
            kinds("const A = new Schema<T>({ n: 1.5 });"),
            vec![
                Token::Const,
                Token::Identifier("A"),
                Token::Equals,
                Token::New,
                Token::Identifier("Schema"),
                Token::LeftAngle,
                Token::Identifier("T"),
                Token::RightAngle,
                Token::LeftParen,
                Token::LeftBrace,
                Token::Identifier("n"),
                Token::Colon,
                Token::Number("1.5"),
                Token::RightBrace,
                Token::RightParen,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_braces_inside_strings_are_not_structural() {
        let tokens = kinds(r#"{ a: "}", b: '{\'', c: `${x}` }"#);
        let braces = tokens
            .iter()
            .filter(|t| matches!(t, Token::LeftBrace | Token::RightBrace))
            .count();
        assert_eq!(braces, 2);
        assert!(tokens.contains(&Token::StringLiteral {
            content: "{\\'",
            quote: '\'',
            terminated: true
        }));
    }

    #[test]
    fn test_comments() {
        let lexed = tokenize("a // }\n/* { */ b");
        let tokens: Vec<_> = lexed.tokens.iter().map(|t| t.token.clone()).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Identifier("a"),
                Token::Whitespace,
                Token::LineComment(" }"),
                Token::Newline,
                Token::BlockComment { terminated: true },
                Token::Whitespace,
                Token::Identifier("b"),
            ]
        );
        assert!(lexed.diagnostics.is_empty());
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let lexed = tokenize("x: 'abc\ny");
        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.diagnostics[0].code(), Some(ErrorCode::W001));
        assert_eq!(lexed.diagnostics[0].labels()[0].span(), Span::new(3..7));
        assert_eq!(
            lexed.tokens.last().map(|t| t.token.clone()),
            Some(Token::Identifier("y"))
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let lexed = tokenize("a /* never closed {");
        assert_eq!(lexed.diagnostics.len(), 1);
        assert_eq!(lexed.diagnostics[0].code(), Some(ErrorCode::W002));
        assert_eq!(
            lexed.tokens.last().map(|t| t.token.clone()),
            Some(Token::BlockComment { terminated: false })
        );
    }

    #[test]
    fn test_regex_after_colon() {
        assert_eq!(
            kinds(r"match: /^[a-z/{]+$/i,"),
            vec![
                Token::Identifier("match"),
                Token::Colon,
                Token::RegexLiteral(r"/^[a-z/{]+$/i"),
                Token::Comma,
            ]
        );
    }

    #[test]
    fn test_division_is_not_regex() {
        assert_eq!(
            kinds("a / b / c"),
            vec![
                Token::Identifier("a"),
                Token::Other('/'),
                Token::Identifier("b"),
                Token::Other('/'),
                Token::Identifier("c"),
            ]
        );
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "const UserSchema = 'x';";
        let lexed = tokenize(source);
        let rebuilt: String = lexed
            .tokens
            .iter()
            .map(|t| &source[t.span.to_range()])
            .collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_unicode_is_preserved() {
        let source = "naïve: 'café' → ok";
        let lexed = tokenize(source);
        let rebuilt: String = lexed
            .tokens
            .iter()
            .map(|t| &source[t.span.to_range()])
            .collect();
        assert_eq!(rebuilt, source);
        assert_eq!(lexed.tokens[0].token, Token::Identifier("naïve"));
    }
}
