use std::fmt;

use drawtree_core::graph::ArrowKind;

use crate::span::Span;

/// Reserved words that open a flowchart definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Graph,
    Flowchart,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Graph => "graph",
            Keyword::Flowchart => "flowchart",
        }
    }
}

/// The bracket pair around a node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `[label]`
    Square,
    /// `(label)`
    Round,
}

impl Delimiter {
    pub fn open(&self) -> char {
        match self {
            Delimiter::Square => '[',
            Delimiter::Round => '(',
        }
    }

    pub fn close(&self) -> char {
        match self {
            Delimiter::Square => ']',
            Delimiter::Round => ')',
        }
    }
}

/// Token types for flowchart text
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // Keywords
    Keyword(Keyword),

    // Names and labels
    Identifier(&'src str),
    OpenBracket(Delimiter),
    LabelText(&'src str),
    CloseBracket(Delimiter),
    EdgeLabel(&'src str), // |text|

    // Operators
    Arrow(ArrowKind), // --> or ---

    // Punctuation
    Semicolon,

    // Comments
    Comment(&'src str), // %% comment

    // Whitespace
    Whitespace,
    Newline,

    // Anything the grammar has no use for
    Stray(char),
}

impl Token<'_> {
    /// Returns `true` for tokens that carry no graph meaning.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::Newline | Token::Comment(_) | Token::Semicolon
        )
    }
}

/// A token with its byte span in the full source
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Keyword(keyword) => write!(f, "{}", keyword.as_str()),

            Token::Identifier(name) => write!(f, "{name}"),
            Token::OpenBracket(delimiter) => write!(f, "{}", delimiter.open()),
            Token::LabelText(text) => write!(f, "{text}"),
            Token::CloseBracket(delimiter) => write!(f, "{}", delimiter.close()),
            Token::EdgeLabel(text) => write!(f, "|{text}|"),

            Token::Arrow(ArrowKind::Directed) => write!(f, "-->"),
            Token::Arrow(ArrowKind::Open) => write!(f, "---"),

            Token::Semicolon => write!(f, ";"),
            Token::Comment(comment) => write!(f, "%%{comment}"),
            Token::Whitespace => write!(f, " "),
            Token::Newline => write!(f, "\\n"),
            Token::Stray(c) => write!(f, "{c}"),
        }
    }
}
