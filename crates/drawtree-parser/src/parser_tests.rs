//! Unit tests for the line-oriented flowchart parser
//!
//! These tests run source text through the lexer and parser together and
//! check the resulting graph and warnings.

use drawtree_core::graph::{ArrowKind, Graph};

use crate::{
    error::{Diagnostic, ErrorCode},
    lexer, parser,
};

/// Helper function to lex and parse a source string
fn parse_source(source: &str) -> (Graph, Vec<Diagnostic>) {
    let (tokens, mut warnings) = lexer::tokenize(source);
    let (graph, parse_warnings) = parser::build_graph(&tokens);
    warnings.extend(parse_warnings);
    (graph, warnings)
}

/// Helper function to parse a source string that must not warn
fn parse_clean(source: &str) -> Graph {
    let (graph, warnings) = parse_source(source);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    graph
}

fn node_ids(graph: &Graph) -> Vec<&str> {
    graph.nodes().map(|node| node.id()).collect()
}

fn edge_pairs(graph: &Graph) -> Vec<(&str, &str)> {
    graph
        .edges()
        .iter()
        .map(|edge| (edge.source(), edge.target()))
        .collect()
}

fn label_of<'a>(graph: &'a Graph, id: &str) -> &'a str {
    graph
        .node(id)
        .unwrap_or_else(|| panic!("node `{id}` missing"))
        .label()
}

fn warning_codes(warnings: &[Diagnostic]) -> Vec<ErrorCode> {
    warnings.iter().filter_map(Diagnostic::code).collect()
}

// ===================
// Declarations
// ===================

#[test]
fn test_bare_and_labeled_declarations() {
    let graph = parse_clean("A\nB[About Us]\nC(Contact)");

    assert_eq!(node_ids(&graph), ["A", "B", "C"]);
    assert_eq!(label_of(&graph, "A"), "A");
    assert_eq!(label_of(&graph, "B"), "About Us");
    assert_eq!(label_of(&graph, "C"), "Contact");
    assert!(graph.edges().is_empty());
}

#[test]
fn test_label_is_trimmed() {
    let graph = parse_clean("A[  Home  ]");
    assert_eq!(label_of(&graph, "A"), "Home");
}

#[test]
fn test_blank_label_falls_back_to_identifier() {
    let graph = parse_clean("A[]\nB(   )");
    assert_eq!(label_of(&graph, "A"), "A");
    assert_eq!(label_of(&graph, "B"), "B");
}

#[test]
fn test_later_label_overwrites_bare_declaration() {
    let graph = parse_clean("A\nA[Home]");
    assert_eq!(label_of(&graph, "A"), "Home");
    assert_eq!(graph.nodes_count(), 1);
}

#[test]
fn test_bare_reference_keeps_label() {
    let graph = parse_clean("A[Home]\nA");
    assert_eq!(label_of(&graph, "A"), "Home");
}

#[test]
fn test_last_descriptive_label_wins() {
    let graph = parse_clean("A[Home]\nA[Start]\nA[A]");
    assert_eq!(label_of(&graph, "A"), "Start");
}

#[test]
fn test_identifiers_are_case_sensitive() {
    let graph = parse_clean("a --> A");
    assert_eq!(node_ids(&graph), ["a", "A"]);
}

#[test]
fn test_label_with_arrow_text_is_not_an_edge() {
    let graph = parse_clean("A[from --> to]");
    assert_eq!(node_ids(&graph), ["A"]);
    assert_eq!(label_of(&graph, "A"), "from --> to");
    assert!(graph.edges().is_empty());
}

// ===================
// Edges
// ===================

#[test]
fn test_simple_edge() {
    let graph = parse_clean("A --> B");
    assert_eq!(edge_pairs(&graph), [("A", "B")]);
    assert_eq!(graph.edges()[0].kind(), ArrowKind::Directed);
}

#[test]
fn test_chain_produces_multiple_edges() {
    let graph = parse_clean("A[Home]-->B[About]-->C-->D");
    assert_eq!(edge_pairs(&graph), [("A", "B"), ("B", "C"), ("C", "D")]);
    assert_eq!(label_of(&graph, "B"), "About");
}

#[test]
fn test_open_link() {
    let graph = parse_clean("A --- B");
    assert_eq!(graph.edges()[0].kind(), ArrowKind::Open);
}

#[test]
fn test_edge_label() {
    let graph = parse_clean("A -->| yes | B\nB --> C");
    assert_eq!(graph.edges()[0].label(), Some("yes"));
    assert_eq!(graph.edges()[1].label(), None);
}

#[test]
fn test_duplicate_edges_are_kept() {
    let graph = parse_clean("A --> B\nA --> B");
    assert_eq!(edge_pairs(&graph), [("A", "B"), ("A", "B")]);
}

#[test]
fn test_edge_endpoints_are_created_on_first_sight() {
    let graph = parse_clean("X --> Y\nY[Why]");
    assert_eq!(node_ids(&graph), ["X", "Y"]);
    assert_eq!(label_of(&graph, "Y"), "Why");
}

#[test]
fn test_semicolon_and_comment_are_ignored() {
    let graph = parse_clean("A --> B; %% first link\n%% whole line comment\nB --> C;");
    assert_eq!(edge_pairs(&graph), [("A", "B"), ("B", "C")]);
}

#[test]
fn test_semicolon_separates_statements() {
    let graph = parse_clean("graph TD; Hub --> Left; Hub --> Right;;");
    assert_eq!(node_ids(&graph), ["Hub", "Left", "Right"]);
    assert_eq!(edge_pairs(&graph), [("Hub", "Left"), ("Hub", "Right")]);
}

// ===================
// Headers and blank lines
// ===================

#[test]
fn test_header_lines_are_skipped() {
    let graph = parse_clean("graph TD\nflowchart LR\n  A --> B");
    assert_eq!(node_ids(&graph), ["A", "B"]);
}

#[test]
fn test_keyword_in_identifier_position_is_a_node() {
    let graph = parse_clean("A --> graph");
    assert_eq!(edge_pairs(&graph), [("A", "graph")]);
}

#[test]
fn test_header_without_space_is_a_node() {
    // `graphTD` is one identifier, so the line declares a node
    let graph = parse_clean("graphTD\nA --> B");
    assert_eq!(node_ids(&graph), ["graphTD", "A", "B"]);
    assert_eq!(edge_pairs(&graph), [("A", "B")]);
}

#[test]
fn test_blank_and_whitespace_lines() {
    let graph = parse_clean("\n   \n\t\nA\n\n");
    assert_eq!(node_ids(&graph), ["A"]);
}

#[test]
fn test_crlf_line_endings() {
    let graph = parse_clean("graph TD\r\nA[Home] --> B\r\n");
    assert_eq!(edge_pairs(&graph), [("A", "B")]);
    assert_eq!(label_of(&graph, "A"), "Home");
}

#[test]
fn test_empty_source() {
    let graph = parse_clean("");
    assert!(graph.is_empty());
}

// ===================
// Recovery
// ===================

#[test]
fn test_segment_without_identifier_skips_edge() {
    let (graph, warnings) = parse_source("A --> & B\nC --> D");

    assert_eq!(edge_pairs(&graph), [("C", "D")]);
    // `B` is still declared even though its link was skipped
    assert!(graph.node("B").is_some());
    assert_eq!(warning_codes(&warnings), [ErrorCode::W002]);
}

#[test]
fn test_label_without_identifier_declares_nothing() {
    let (graph, warnings) = parse_source("A --> (B)");

    assert_eq!(node_ids(&graph), ["A"]);
    assert!(graph.node("B").is_none());
    assert!(graph.edges().is_empty());
    assert_eq!(warning_codes(&warnings), [ErrorCode::W002]);
}

#[test]
fn test_dangling_arrow() {
    let (graph, warnings) = parse_source("A -->");
    assert!(graph.edges().is_empty());
    assert_eq!(node_ids(&graph), ["A"]);
    assert_eq!(warning_codes(&warnings), [ErrorCode::W002]);

    let primary = &warnings[0].labels()[0];
    assert!(primary.is_primary());
}

#[test]
fn test_partial_chain_keeps_valid_links() {
    let (graph, warnings) = parse_source("A --> B --> * --> C");
    assert_eq!(edge_pairs(&graph), [("A", "B")]);
    assert_eq!(warning_codes(&warnings), [ErrorCode::W002, ErrorCode::W002]);
}

#[test]
fn test_line_without_elements() {
    let (graph, warnings) = parse_source("A\n&& !!\nB");
    assert_eq!(node_ids(&graph), ["A", "B"]);
    assert_eq!(warning_codes(&warnings), [ErrorCode::W003]);

    let span = warnings[0].labels()[0].span();
    assert_eq!(span.start(), 2);
    assert_eq!(span.end(), 7);
}

#[test]
fn test_unterminated_label_degrades() {
    let (graph, warnings) = parse_source("A[Home --> B");

    assert_eq!(warning_codes(&warnings), [ErrorCode::W001]);
    assert_eq!(label_of(&graph, "A"), "A");
    assert_eq!(edge_pairs(&graph), [("A", "B")]);
}

#[test]
fn test_warnings_are_warnings() {
    let (_, warnings) = parse_source("A[x\n-->\n@@");
    assert!(!warnings.is_empty());
    assert!(warnings.iter().all(|w| w.severity().is_warning()));
}

#[test]
fn test_public_parse_orders_warnings_by_position() {
    let parsed = crate::parse("@@\nA[open\nB -->");
    let starts: Vec<usize> = parsed
        .warnings()
        .iter()
        .map(|w| w.labels()[0].span().start())
        .collect();

    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
    assert_eq!(
        warning_codes(parsed.warnings()),
        [ErrorCode::W003, ErrorCode::W001, ErrorCode::W002]
    );
}

// ===================
// Site map scenario
// ===================

#[test]
fn test_site_map() {
    let source = "graph TD\n  A[Home] --> B[About]\n  A --> C[Products]\n  C --> D[Electronics]\n";
    let graph = parse_clean(source);

    assert_eq!(node_ids(&graph), ["A", "B", "C", "D"]);
    assert_eq!(edge_pairs(&graph), [("A", "B"), ("A", "C"), ("C", "D")]);
    assert_eq!(label_of(&graph, "D"), "Electronics");
    assert!(graph.nodes().all(|node| node.level().is_none()));
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for generating identifiers that are not header keywords.
    fn identifier_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_]{1,8}".prop_filter("avoid keywords", |s| {
            !matches!(s.as_str(), "graph" | "flowchart")
        })
    }

    /// Strategy for a line made of an identifier chain with optional labels.
    fn chain_strategy() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
        prop::collection::vec(
            (identifier_strategy(), prop::option::of("[A-Za-z ]{0,10}")),
            1..6,
        )
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every edge endpoint resolves to exactly one node.
    fn check_endpoints_resolve(source: &str) -> Result<(), TestCaseError> {
        let (graph, _) = parse_source(source);

        for edge in graph.edges() {
            prop_assert!(graph.node(edge.source()).is_some());
            prop_assert!(graph.node(edge.target()).is_some());
        }

        let mut ids: Vec<&str> = graph.nodes().map(|node| node.id()).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), count);
        Ok(())
    }

    /// A chain of n segments yields n - 1 edges, in order.
    fn check_chain_edges(chain: &[(String, Option<String>)]) -> Result<(), TestCaseError> {
        let line = chain
            .iter()
            .map(|(id, label)| match label {
                Some(label) => format!("{id}[{label}]"),
                None => id.clone(),
            })
            .collect::<Vec<_>>()
            .join(" --> ");

        let (graph, warnings) = parse_source(&line);
        prop_assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        prop_assert_eq!(graph.edges().len(), chain.len() - 1);

        for (edge, pair) in graph.edges().iter().zip(chain.windows(2)) {
            prop_assert_eq!(edge.source(), pair[0].0.as_str());
            prop_assert_eq!(edge.target(), pair[1].0.as_str());
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn arbitrary_text_never_panics(source in "\\PC{0,80}") {
            check_endpoints_resolve(&source)?;
        }

        #[test]
        fn flowchart_like_text_resolves(source in "[AB_1 \\[\\]()|;%>\n-]{0,60}") {
            check_endpoints_resolve(&source)?;
        }

        #[test]
        fn chains_produce_adjacent_edges(chain in chain_strategy()) {
            check_chain_edges(&chain)?;
        }
    }
}
