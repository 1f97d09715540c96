//! Line-oriented parser that builds a [`Graph`] from lexer tokens.
//!
//! Lines are split into statements on `;`. Each statement is read twice. The first pass declares every identifier on
//! the statement, together with the bracketed label that immediately
//! follows it. The second pass splits the statement on arrows and links the leading
//! identifier of each pair of adjacent segments. Anything the parser cannot
//! use is reported as a warning and skipped.

use drawtree_core::graph::{ArrowKind, Edge, Graph};
use log::{debug, trace};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Returns the node identifier a token stands for, if any.
///
/// Header keywords count as identifiers anywhere but at the start of a line.
fn node_name<'a>(token: &PositionedToken<'a>) -> Option<&'a str> {
    match token.token {
        Token::Identifier(name) => Some(name),
        Token::Keyword(keyword) => Some(keyword.as_str()),
        _ => None,
    }
}

/// Returns the trimmed text of a bracketed label at the start of `rest`.
fn bracket_label<'a>(rest: &[PositionedToken<'a>]) -> Option<&'a str> {
    match rest {
        [
            PositionedToken {
                token: Token::OpenBracket(_),
                ..
            },
            PositionedToken {
                token: Token::LabelText(text),
                ..
            },
            ..,
        ] => Some((*text).trim()),
        _ => None,
    }
}

fn is_arrow(token: &PositionedToken<'_>) -> bool {
    matches!(token.token, Token::Arrow(_))
}

/// Span covering every token in `tokens`.
fn covering_span(tokens: &[PositionedToken<'_>]) -> Option<Span> {
    let first = tokens.first()?;
    let last = tokens.last()?;
    Some(first.span.union(last.span))
}

/// The start of a segment between two arrows.
struct SegmentHead<'a> {
    /// `|text|` directly after the preceding arrow.
    edge_label: Option<&'a str>,
    /// The first meaningful token, expected to be a node identifier.
    endpoint: Option<&'a str>,
}

impl<'a> SegmentHead<'a> {
    fn read(segment: &[PositionedToken<'a>]) -> Self {
        let mut edge_label = None;
        let mut tokens = segment.iter().filter(|token| !token.is_trivia());

        let mut head = tokens.next();
        if let Some(PositionedToken {
            token: Token::EdgeLabel(text),
            ..
        }) = head
        {
            edge_label = Some((*text).trim()).filter(|text| !text.is_empty());
            head = tokens.next();
        }

        Self {
            edge_label,
            endpoint: head.and_then(node_name),
        }
    }
}

/// Accumulates the graph and warnings while walking the lines of a source.
struct GraphBuilder {
    graph: Graph,
    diagnostics: DiagnosticCollector,
}

impl GraphBuilder {
    fn new() -> Self {
        Self {
            graph: Graph::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    fn line(&mut self, number: usize, line: &[PositionedToken<'_>]) {
        for statement in line.split(|token| token.token == Token::Semicolon) {
            self.statement(number, statement);
        }
    }

    fn statement(&mut self, number: usize, line: &[PositionedToken<'_>]) {
        let Some(first) = line.iter().find(|token| !token.is_trivia()) else {
            // Blank or comment-only
            return;
        };

        if let Token::Keyword(keyword) = first.token {
            debug!(line = number, keyword = keyword.as_str(); "Skipping header line");
            return;
        }

        let declared = self.declarations(line);
        let has_arrows = self.edges(line);

        if declared == 0 && !has_arrows {
            let span = covering_span(line).unwrap_or(first.span);
            self.diagnostics.emit(
                Diagnostic::warning("statement does not declare any node or edge")
                    .with_code(ErrorCode::W003)
                    .with_label(span, "ignored")
                    .with_help("write a node as `ID`, `ID[Label]` or `ID(Label)`, and link nodes with `-->`"),
            );
        }
    }

    /// Declares every node identifier of a statement and returns how many were seen.
    fn declarations(&mut self, line: &[PositionedToken<'_>]) -> usize {
        let mut count = 0;
        for (index, token) in line.iter().enumerate() {
            let Some(id) = node_name(token) else {
                continue;
            };
            let label = bracket_label(&line[index + 1..]);
            self.graph.declare(id, label);
            count += 1;
        }
        count
    }

    /// Links adjacent arrow segments. Returns `true` if the statement has arrows.
    fn edges(&mut self, line: &[PositionedToken<'_>]) -> bool {
        let arrows: Vec<&PositionedToken<'_>> = line.iter().filter(|t| is_arrow(t)).collect();
        if arrows.is_empty() {
            return false;
        }

        let segments: Vec<&[PositionedToken<'_>]> = line.split(|t| is_arrow(t)).collect();

        for (index, arrow) in arrows.iter().enumerate() {
            let kind = match arrow.token {
                Token::Arrow(kind) => kind,
                _ => ArrowKind::default(),
            };
            let source = SegmentHead::read(segments[index]);
            let target = SegmentHead::read(segments[index + 1]);

            match (source.endpoint, target.endpoint) {
                (Some(source), Some(target_id)) => {
                    trace!(source, target = target_id; "Adding edge");
                    let mut edge = Edge::new(source, target_id).with_kind(kind);
                    if let Some(label) = target.edge_label {
                        edge = edge.with_label(label);
                    }
                    self.graph.add_edge(edge);
                }
                (None, _) => self.report_missing_endpoint(segments[index], arrow),
                (_, None) => self.report_missing_endpoint(segments[index + 1], arrow),
            }
        }

        true
    }

    fn report_missing_endpoint(&mut self, segment: &[PositionedToken<'_>], arrow: &PositionedToken<'_>) {
        let span = covering_span(segment).unwrap_or(arrow.span);
        self.diagnostics.emit(
            Diagnostic::warning("link has no node on one side")
                .with_code(ErrorCode::W002)
                .with_label(span, "expected a node identifier here")
                .with_secondary_label(arrow.span, "this link is skipped")
                .with_help("start each side of a link with a node such as `A` or `A[Label]`"),
        );
    }

    fn finish(self) -> (Graph, Vec<Diagnostic>) {
        (self.graph, self.diagnostics.finish())
    }
}

/// Builds a graph from the token stream of a whole source.
///
/// Never fails. Malformed lines contribute whatever could be recognized and
/// raise warnings, returned in source order next to the graph.
pub fn build_graph(tokens: &[PositionedToken<'_>]) -> (Graph, Vec<Diagnostic>) {
    let mut builder = GraphBuilder::new();

    for (index, line) in tokens
        .split(|token| token.token == Token::Newline)
        .enumerate()
    {
        builder.line(index + 1, line);
    }

    builder.finish()
}
