use log::{debug, info};

use drawtree_core::graph::{Edge, Graph, Node};

/// Keyword that marks the preferred main root, matched case-insensitively.
const HOME_MARKER: &str = "home";

fn is_home(node: &Node) -> bool {
    node.label().to_lowercase().contains(HOME_MARKER)
}

/// Links every root to a single main root.
///
/// A root is a node with no incoming edges. When there is more than one,
/// the main root is the first root whose label contains `home` (in any
/// case), or else the first root. An edge from the main root to each other
/// root is appended in first-seen order, leaving the main root as the only
/// root.
///
/// Graphs with at most one root are returned unchanged. This covers graphs
/// where every node sits on a cycle.
///
/// # Examples
///
/// ```
/// # use drawtree::structure::link_orphans;
/// # use drawtree_core::graph::{Edge, Graph};
/// let mut graph = Graph::new();
/// graph.declare("B", Some("Blog"));
/// graph.declare("H", Some("Home"));
///
/// let graph = link_orphans(graph);
/// assert_eq!(graph.edges(), [Edge::new("H", "B")]);
/// assert_eq!(graph.roots().count(), 1);
/// ```
pub fn link_orphans(mut graph: Graph) -> Graph {
    let roots: Vec<&Node> = graph.roots().collect();
    if roots.len() <= 1 {
        return graph;
    }

    let Some(main) = roots.iter().find(|node| is_home(node)).or(roots.first()) else {
        return graph;
    };
    let main_id = main.id().to_string();

    let orphans: Vec<String> = roots
        .iter()
        .map(|node| node.id())
        .filter(|id| *id != main_id)
        .map(str::to_string)
        .collect();

    for orphan in &orphans {
        debug!(source = main_id, target = orphan; "Linking orphan root");
        graph.add_edge(Edge::new(main_id.as_str(), orphan.as_str()));
    }

    info!(main_root = main_id, linked = orphans.len(); "Orphan roots linked");

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new();
        for (id, label) in nodes {
            graph.declare(id, Some(label));
        }
        for (source, target) in edges {
            graph.add_edge(Edge::new(*source, *target));
        }
        graph
    }

    fn edge_pairs(graph: &Graph) -> Vec<(&str, &str)> {
        graph
            .edges()
            .iter()
            .map(|edge| (edge.source(), edge.target()))
            .collect()
    }

    #[test]
    fn test_home_root_becomes_main() {
        let graph = graph_from(&[("B", "Blog"), ("H", "Home")], &[]);

        let graph = link_orphans(graph);

        assert_eq!(edge_pairs(&graph), [("H", "B")]);
        let roots: Vec<&str> = graph.roots().map(Node::id).collect();
        assert_eq!(roots, ["H"]);
    }

    #[test]
    fn test_home_match_is_case_insensitive_substring() {
        let graph = graph_from(&[("A", "Start"), ("B", "Our HOMEpage")], &[]);

        let graph = link_orphans(graph);

        assert_eq!(edge_pairs(&graph), [("B", "A")]);
    }

    #[test]
    fn test_first_root_without_home() {
        let graph = graph_from(
            &[("X", "Other"), ("Y", "Y"), ("Z", "Z")],
            &[("X", "Y")],
        );

        let graph = link_orphans(graph);

        assert_eq!(edge_pairs(&graph), [("X", "Y"), ("X", "Z")]);
    }

    #[test]
    fn test_first_home_root_wins() {
        let graph = graph_from(
            &[("A", "Blog"), ("B", "Home"), ("C", "Home Office")],
            &[],
        );

        let graph = link_orphans(graph);

        assert_eq!(edge_pairs(&graph), [("B", "A"), ("B", "C")]);
    }

    #[test]
    fn test_orphan_chains() {
        let graph = graph_from(
            &[("A", "Home"), ("B", "B"), ("X", "Other"), ("Y", "Y")],
            &[("A", "B"), ("X", "Y")],
        );

        let graph = link_orphans(graph);

        assert_eq!(edge_pairs(&graph), [("A", "B"), ("X", "Y"), ("A", "X")]);
        assert_eq!(graph.nodes_count(), 4);
    }

    #[test]
    fn test_single_root_unchanged() {
        let graph = graph_from(&[("A", "Home"), ("B", "B")], &[("A", "B")]);

        let graph = link_orphans(graph);

        assert_eq!(edge_pairs(&graph), [("A", "B")]);
    }

    #[test]
    fn test_idempotent() {
        let graph = graph_from(&[("A", "A"), ("B", "B"), ("C", "C")], &[]);

        let once = link_orphans(graph);
        let twice = link_orphans(once.clone());

        assert_eq!(once.edges(), twice.edges());
    }

    #[test]
    fn test_all_cycle_graph_unchanged() {
        let graph = graph_from(&[("A", "A"), ("B", "B")], &[("A", "B"), ("B", "A")]);

        let graph = link_orphans(graph);

        assert_eq!(edge_pairs(&graph), [("A", "B"), ("B", "A")]);
        assert_eq!(graph.roots().count(), 0);
    }

    #[test]
    fn test_synthesized_edges_are_plain() {
        let graph = graph_from(&[("A", "Home"), ("B", "B")], &[]);

        let graph = link_orphans(graph);

        assert_eq!(graph.edges(), [Edge::new("A", "B")]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = link_orphans(Graph::new());
        assert!(graph.is_empty());
    }
}
