use std::collections::{HashSet, VecDeque};

use log::{debug, info};

use drawtree_core::graph::Graph;

/// Breadth-first depths of every node reachable from `root`, in discovery order.
fn discover<'a>(graph: &'a Graph, root: &'a str) -> Vec<(&'a str, usize)> {
    let adjacency = graph.adjacency();

    let mut discovered = vec![(root, 0)];
    let mut seen = HashSet::from([root]);
    let mut queue = VecDeque::from([(root, 0)]);

    while let Some((id, level)) = queue.pop_front() {
        for &target in adjacency.get(id).into_iter().flatten() {
            if seen.insert(target) {
                discovered.push((target, level + 1));
                queue.push_back((target, level + 1));
            }
        }
    }

    discovered
}

/// Assigns every node its hierarchy level.
///
/// The root is recomputed from the graph: the first node without incoming
/// edges, or the first node when none qualifies. A breadth-first traversal
/// from the root gives each newly discovered node its parent's level plus
/// one. The first discovery wins, so a level is the shortest hop count from
/// the root. Siblings are visited in edge declaration order.
///
/// Nodes the traversal never reaches keep no level.
///
/// # Examples
///
/// ```
/// # use drawtree::structure::assign_levels;
/// # use drawtree_core::graph::{Edge, Graph};
/// let mut graph = Graph::new();
/// graph.add_edge(Edge::new("A", "B"));
/// graph.add_edge(Edge::new("B", "C"));
/// graph.add_edge(Edge::new("A", "C"));
///
/// let graph = assign_levels(graph);
/// assert_eq!(graph.node("C").unwrap().level(), Some(1));
/// ```
pub fn assign_levels(mut graph: Graph) -> Graph {
    let Some(root) = graph.root().map(|node| node.id().to_string()) else {
        return graph;
    };

    let levels: Vec<(String, usize)> = discover(&graph, &root)
        .into_iter()
        .map(|(id, level)| (id.to_string(), level))
        .collect();

    for (id, level) in &levels {
        graph.set_level(id, *level);
    }

    for node in graph.nodes().filter(|node| node.level().is_none()) {
        debug!(id = node.id(); "Node is unreachable from the root");
    }

    let depth = levels.iter().map(|(_, level)| *level).max().unwrap_or(0);
    info!(
        root,
        reached = levels.len(),
        unreachable = graph.nodes_count() - levels.len(),
        depth;
        "Hierarchy levels assigned"
    );

    graph
}

#[cfg(test)]
mod tests {
    use drawtree_core::graph::Edge;

    use super::*;

    fn graph_from(edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new();
        for (source, target) in edges {
            graph.add_edge(Edge::new(*source, *target));
        }
        graph
    }

    fn levels(graph: &Graph) -> Vec<(&str, Option<usize>)> {
        graph
            .nodes()
            .map(|node| (node.id(), node.level()))
            .collect()
    }

    #[test]
    fn test_shortcut_edge_wins() {
        let graph = assign_levels(graph_from(&[("A", "B"), ("B", "C"), ("A", "C")]));

        assert_eq!(
            levels(&graph),
            [("A", Some(0)), ("B", Some(1)), ("C", Some(1))]
        );
    }

    #[test]
    fn test_site_map_levels() {
        let graph = assign_levels(graph_from(&[("A", "B"), ("A", "C"), ("C", "D")]));

        assert_eq!(
            levels(&graph),
            [("A", Some(0)), ("B", Some(1)), ("C", Some(1)), ("D", Some(2))]
        );
    }

    #[test]
    fn test_unreachable_nodes_keep_no_level() {
        let mut graph = graph_from(&[("A", "B"), ("X", "Y")]);
        graph.declare("Lonely", None);

        let graph = assign_levels(graph);

        assert_eq!(
            levels(&graph),
            [
                ("A", Some(0)),
                ("B", Some(1)),
                ("X", None),
                ("Y", None),
                ("Lonely", None),
            ]
        );
    }

    #[test]
    fn test_root_is_first_zero_incoming_node() {
        let graph = assign_levels(graph_from(&[("B", "C"), ("A", "B")]));

        assert_eq!(
            levels(&graph),
            [("B", Some(1)), ("C", Some(2)), ("A", Some(0))]
        );
    }

    #[test]
    fn test_cycle_falls_back_to_first_node() {
        let graph = assign_levels(graph_from(&[("A", "B"), ("B", "C"), ("C", "A")]));

        assert_eq!(
            levels(&graph),
            [("A", Some(0)), ("B", Some(1)), ("C", Some(2))]
        );
    }

    #[test]
    fn test_duplicates_and_self_loops() {
        let graph = assign_levels(graph_from(&[("A", "B"), ("A", "B"), ("B", "B")]));

        assert_eq!(levels(&graph), [("A", Some(0)), ("B", Some(1))]);
    }

    #[test]
    fn test_levels_are_written_once() {
        let graph = assign_levels(graph_from(&[("A", "B")]));
        let graph = assign_levels(graph);

        assert_eq!(levels(&graph), [("A", Some(0)), ("B", Some(1))]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = assign_levels(Graph::new());
        assert!(graph.is_empty());
    }
}
