//! Lexical analyzer for flowchart text.
//!
//! The lexer converts source text into a stream of [`Token`]s for the line
//! parser. It is total: characters the grammar has no use for become
//! [`Token::Stray`], and a label whose closing delimiter is missing on its
//! line is reported as a warning and lexed as ordinary text.
//!
//! The public entry point is [`tokenize`].

use drawtree_core::graph::ArrowKind;
use winnow::{
    Parser as _,
    combinator::{alt, not, opt, peek, preceded, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{any, literal, one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
    tokens::{Delimiter, Keyword, PositionedToken, Token},
};

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError>;

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse comment starting with '%%'
fn comment<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    preceded("%%", take_while(0.., |c| c != '\n'))
        .map(Token::Comment)
        .parse_next(input)
}

/// Parse header keywords with word boundary checking
fn keyword<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    terminated(
        alt((
            literal("flowchart").value(Keyword::Flowchart),
            literal("graph").value(Keyword::Graph),
        )),
        // `graphics` is an identifier, not the keyword followed by `ics`
        peek(not(one_of(is_identifier_char))),
    )
    .map(Token::Keyword)
    .parse_next(input)
}

/// Parse identifiers (`[A-Za-z0-9_]+`, digits may lead)
fn identifier<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., is_identifier_char)
        .map(Token::Identifier)
        .parse_next(input)
}

/// Parse a link: one or more dashes with an optional arrow head
fn arrow<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    (take_while(1.., '-'), opt('>'))
        .map(|(_, head)| match head {
            Some(_) => Token::Arrow(ArrowKind::Directed),
            None => Token::Arrow(ArrowKind::Open),
        })
        .parse_next(input)
}

/// Parse an edge label written as `|text|` on a single line
fn edge_label<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    terminated(
        preceded('|', take_while(0.., |c| c != '|' && c != '\n')),
        '|',
    )
    .map(Token::EdgeLabel)
    .parse_next(input)
}

/// Parse whitespace (spaces, tabs, carriage returns, but not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse newline
fn newline<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Parse semicolon
fn semicolon<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    ';'.value(Token::Semicolon).parse_next(input)
}

/// Consume any single character the grammar does not know
fn stray<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    any.map(Token::Stray).parse_next(input)
}

/// Build a parser for a label enclosed in `delimiter`, closed on the same line.
fn delimited_label<'a>(
    delimiter: Delimiter,
) -> impl winnow::Parser<Input<'a>, [PositionedToken<'a>; 3], ErrMode<ContextError>> {
    let close = delimiter.close();
    (
        delimiter.open().span(),
        take_while(0.., move |c: char| c != close && c != '\n').with_span(),
        close.span(),
    )
        .map(move |(open_span, (text, text_span), close_span)| {
            [
                PositionedToken::new(Token::OpenBracket(delimiter), Span::new(open_span)),
                PositionedToken::new(Token::LabelText(text), Span::new(text_span)),
                PositionedToken::new(Token::CloseBracket(delimiter), Span::new(close_span)),
            ]
        })
}

/// Parse a bracketed node label into open, text and close tokens
fn bracketed_label<'a>(input: &mut Input<'a>) -> IResult<'a, [PositionedToken<'a>; 3]> {
    alt((
        delimited_label(Delimiter::Square),
        delimited_label(Delimiter::Round),
    ))
    .parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<'a, PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        comment,    // Must come before stray '%'
        keyword,    // Must come before identifier
        identifier, // Must come before stray chars
        arrow,
        edge_label, // Falls back to a stray '|' when unclosed
        semicolon,
        newline, // Must come before whitespace
        whitespace,
        stray, // Always succeeds on non-empty input
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and warnings.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            let checkpoint = input.checkpoint();
            if let Ok(label) = bracketed_label(&mut input) {
                self.tokens.extend(label);
                continue;
            }
            input.reset(&checkpoint);

            if input.starts_with(['[', '(']) {
                self.report_unterminated(&input);
            }

            match positioned_token(&mut input) {
                Ok(token) => self.tokens.push(token),
                // Only reachable at end of input
                Err(_) => break,
            }
        }
    }

    /// Record a warning for a label delimiter with no closing counterpart.
    fn report_unterminated(&mut self, input: &Input<'a>) {
        let start = input.current_token_start();
        let line_len = input.find('\n').unwrap_or(input.len());
        let close = if input.starts_with('[') { ']' } else { ')' };

        self.diagnostics.emit(
            Diagnostic::warning("label is never closed")
                .with_code(ErrorCode::W001)
                .with_label(Span::new(start..start + line_len), "label opened here")
                .with_help(format!(
                    "close the label with `{close}` on the same line; the text is read as plain tokens"
                )),
        );
    }

    /// Finish lexing and return tokens with collected warnings.
    fn finish(self) -> (Vec<PositionedToken<'a>>, Vec<Diagnostic>) {
        (self.tokens, self.diagnostics.finish())
    }
}

/// Split source text into positioned tokens.
///
/// Never fails. Returns every token together with the warnings raised for
/// unterminated labels, in source order.
pub fn tokenize(input: &str) -> (Vec<PositionedToken<'_>>, Vec<Diagnostic>) {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}
