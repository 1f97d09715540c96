//! # drawtree Parser
//!
//! Best-effort parser for the flowchart subset of the Mermaid markup. It
//! turns source text into a [`Graph`] of nodes and edges.
//!
//! Parsing never fails. Lines that cannot be understood are skipped and
//! reported as warning [`Diagnostic`](error::Diagnostic)s, so callers decide
//! how to present them.
//!
//! ## Usage
//!
//! ```
//! # use drawtree_parser::parse;
//! let source = "
//!     graph TD
//!     A[Home] --> B[About]
//!     A --> C[Products]
//! ";
//!
//! let parsed = parse(source);
//! assert_eq!(parsed.graph().nodes_count(), 3);
//! assert!(parsed.warnings().is_empty());
//! ```

pub mod error;
mod lexer;
mod parser;
#[cfg(test)]
mod parser_tests;
mod span;
mod tokens;

pub use span::Span;

use drawtree_core::graph::Graph;

use error::Diagnostic;

/// The result of parsing: the graph plus every warning raised on the way.
#[derive(Debug)]
pub struct Parsed {
    graph: Graph,
    warnings: Vec<Diagnostic>,
}

impl Parsed {
    /// Returns the parsed graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the warnings in source order.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Splits the result into the graph and its warnings.
    pub fn into_parts(self) -> (Graph, Vec<Diagnostic>) {
        (self.graph, self.warnings)
    }
}

/// Parse flowchart source text into a graph.
///
/// It orchestrates the parsing pipeline:
///
/// 1. **Tokenize** - Convert source text to tokens, line by line
/// 2. **Build** - Declare nodes and link edge chains per line
///
/// Every edge endpoint in the returned graph resolves to exactly one node.
/// An input with no recognizable content yields an empty graph.
pub fn parse(source: &str) -> Parsed {
    // Step 1: Tokenize
    let (tokens, mut warnings) = lexer::tokenize(source);

    // Step 2: Build
    let (graph, parse_warnings) = parser::build_graph(&tokens);
    warnings.extend(parse_warnings);

    warnings.sort_by_key(|diagnostic| {
        diagnostic
            .labels()
            .first()
            .map(|label| label.span().start())
    });

    Parsed { graph, warnings }
}
