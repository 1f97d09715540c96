//! Graph data model shared by every pipeline stage.
//!
//! # Architecture
//!
//! - [`Node`]: a labeled vertex with an optional hierarchy level
//! - [`Edge`]: a directed connection between two node identifiers
//! - [`Graph`]: insertion-ordered node registry plus the edge sequence
//!
//! Node order is the order in which identifiers were first seen. Every stage
//! of the conversion relies on it: root selection, orphan linking, and the
//! document serializer all walk nodes in this order.
//!
//! The graph is directed and allows self-loops and multiple edges between
//! the same pair of nodes.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;

/// How an edge was written in the source markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArrowKind {
    /// An arrow with a head, e.g. `-->`.
    #[default]
    Directed,
    /// A plain link without a head, e.g. `---`.
    Open,
}

/// A labeled vertex representing one page or section of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: String,
    label: String,
    level: Option<usize>,
}

impl Node {
    /// Creates a bare node whose label is its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            level: None,
        }
    }

    /// Replaces the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the hierarchy level.
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }

    /// Returns the unique identifier of the node.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display label of the node.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the hierarchy level, or `None` if the node was never reached
    /// from the root.
    pub fn level(&self) -> Option<usize> {
        self.level
    }
}

/// A directed relationship from a source node to a target node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: String,
    target: String,
    kind: ArrowKind,
    label: Option<String>,
}

impl Edge {
    /// Creates a directed, unlabeled edge.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: ArrowKind::Directed,
            label: None,
        }
    }

    /// Sets the arrow kind of the edge.
    pub fn with_kind(mut self, kind: ArrowKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attaches a text label to the edge.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn kind(&self) -> ArrowKind {
        self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A flowchart graph: unique nodes in first-seen order plus an edge list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: IndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node, creating it on first sight.
    ///
    /// A new identifier takes `label` when one is given and non-blank,
    /// otherwise its own identifier. For an existing identifier the stored
    /// label is replaced only when `label` is present and differs from the
    /// identifier, so a later bare reference never erases a captured label.
    ///
    /// # Examples
    ///
    /// ```
    /// # use drawtree_core::graph::Graph;
    /// let mut graph = Graph::new();
    /// graph.declare("A", None);
    /// graph.declare("A", Some("Home"));
    /// graph.declare("A", None);
    /// assert_eq!(graph.node("A").unwrap().label(), "Home");
    /// ```
    pub fn declare(&mut self, id: &str, label: Option<&str>) -> &Node {
        let label = label.filter(|label| !label.trim().is_empty());

        let node = self.nodes.entry(id.to_string()).or_insert_with(|| {
            trace!(id; "Creating node");
            Node::new(id)
        });

        if let Some(label) = label.filter(|label| *label != id) {
            trace!(id, label; "Setting node label");
            node.label = label.to_string();
        }

        node
    }

    /// Appends an edge.
    ///
    /// Endpoints that are not yet declared are created as bare nodes, so
    /// every edge endpoint always resolves to exactly one node.
    pub fn add_edge(&mut self, edge: Edge) {
        self.declare(&edge.source, None);
        self.declare(&edge.target, None);
        self.edges.push(edge);
    }

    /// Returns the node for the given identifier, if it exists.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Returns the position of a node in first-seen order.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Returns an iterator over all nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Returns the total number of nodes in the graph.
    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns all edges in declaration order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Counts incoming edges for every node.
    ///
    /// Nodes without incoming edges are present with a count of zero.
    pub fn incoming_counts(&self) -> IndexMap<&str, usize> {
        let mut counts: IndexMap<&str, usize> =
            self.nodes.keys().map(|id| (id.as_str(), 0)).collect();
        for edge in &self.edges {
            if let Some(count) = counts.get_mut(edge.target()) {
                *count += 1;
            }
        }
        counts
    }

    /// Returns an iterator over root nodes (nodes with no incoming edges),
    /// in first-seen order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        let counts = self.incoming_counts();
        self.nodes
            .values()
            .filter(move |node| counts.get(node.id()).copied() == Some(0))
    }

    /// Returns the node that anchors level 0.
    ///
    /// This is the first root in first-seen order. When every node has an
    /// incoming edge (a graph made only of cycles) the first node is used.
    /// Returns `None` only for an empty graph.
    pub fn root(&self) -> Option<&Node> {
        self.roots().next().or_else(|| self.nodes.values().next())
    }

    /// Builds the source → targets mapping from the edge sequence.
    ///
    /// Target lists follow edge declaration order and keep duplicates.
    pub fn adjacency(&self) -> HashMap<&str, Vec<&str>> {
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        for edge in &self.edges {
            adjacency
                .entry(edge.source())
                .or_default()
                .push(edge.target());
        }
        adjacency
    }

    /// Records the hierarchy level of a node.
    ///
    /// The level is written once. Returns `false` and leaves the node
    /// untouched if the node is unknown or already has a level.
    pub fn set_level(&mut self, id: &str, level: usize) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) if node.level.is_none() => {
                node.level = Some(level);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_new() {
        let graph = Graph::new();

        assert!(graph.is_empty());
        assert_eq!(graph.nodes_count(), 0);
        assert_eq!(graph.edges().len(), 0);
        assert_eq!(graph.roots().count(), 0);
        assert!(graph.root().is_none());
    }

    #[test]
    fn test_declare_keeps_first_seen_order() {
        let mut graph = Graph::new();
        graph.declare("C", None);
        graph.declare("A", None);
        graph.declare("B", None);
        graph.declare("A", Some("Again"));

        let ids: Vec<&str> = graph.nodes().map(Node::id).collect();
        assert_eq!(ids, ["C", "A", "B"]);
        assert_eq!(graph.node_index("B"), Some(2));
    }

    #[test]
    fn test_declare_label_rules() {
        let mut graph = Graph::new();

        graph.declare("A", None);
        assert_eq!(graph.node("A").unwrap().label(), "A");

        graph.declare("A", Some("Home"));
        assert_eq!(graph.node("A").unwrap().label(), "Home");

        // Bare reference never erases a captured label
        graph.declare("A", None);
        assert_eq!(graph.node("A").unwrap().label(), "Home");

        // A label equal to the identifier does not count as descriptive
        graph.declare("A", Some("A"));
        assert_eq!(graph.node("A").unwrap().label(), "Home");

        // Last descriptive label wins
        graph.declare("A", Some("Start"));
        assert_eq!(graph.node("A").unwrap().label(), "Start");
    }

    #[test]
    fn test_declare_blank_label_falls_back_to_id() {
        let mut graph = Graph::new();
        graph.declare("A", Some("  "));
        assert_eq!(graph.node("A").unwrap().label(), "A");
    }

    #[test]
    fn test_add_edge_creates_missing_endpoints() {
        let mut graph = Graph::new();
        graph.declare("A", Some("Home"));
        graph.add_edge(Edge::new("A", "B"));

        assert_eq!(graph.nodes_count(), 2);
        assert_eq!(graph.node("B").unwrap().label(), "B");
        assert_eq!(graph.node("A").unwrap().label(), "Home");
    }

    #[test]
    fn test_roots_in_insertion_order() {
        let mut graph = Graph::new();
        graph.add_edge(Edge::new("root1", "child"));
        graph.declare("root2", None);
        graph.declare("root3", None);

        let roots: Vec<&str> = graph.roots().map(Node::id).collect();
        assert_eq!(roots, ["root1", "root2", "root3"]);
        assert_eq!(graph.root().unwrap().id(), "root1");
    }

    #[test]
    fn test_root_of_cycle_is_first_node() {
        let mut graph = Graph::new();
        graph.add_edge(Edge::new("A", "B"));
        graph.add_edge(Edge::new("B", "A"));

        assert_eq!(graph.roots().count(), 0);
        assert_eq!(graph.root().unwrap().id(), "A");
    }

    #[test]
    fn test_self_loop_is_not_root() {
        let mut graph = Graph::new();
        graph.add_edge(Edge::new("A", "A"));

        assert_eq!(graph.roots().count(), 0);
        assert_eq!(graph.incoming_counts()["A"], 1);
    }

    #[test]
    fn test_adjacency_keeps_duplicates_in_order() {
        let mut graph = Graph::new();
        graph.add_edge(Edge::new("A", "B"));
        graph.add_edge(Edge::new("A", "C"));
        graph.add_edge(Edge::new("A", "B"));

        let adjacency = graph.adjacency();
        assert_eq!(adjacency["A"], ["B", "C", "B"]);
        assert!(!adjacency.contains_key("B"));
    }

    #[test]
    fn test_set_level_is_write_once() {
        let mut graph = Graph::new();
        graph.declare("A", None);

        assert!(graph.set_level("A", 2));
        assert!(!graph.set_level("A", 0));
        assert_eq!(graph.node("A").unwrap().level(), Some(2));
        assert!(!graph.set_level("missing", 0));
    }

    #[test]
    fn test_edge_builders() {
        let edge = Edge::new("A", "B")
            .with_kind(ArrowKind::Open)
            .with_label("yes");

        assert_eq!(edge.source(), "A");
        assert_eq!(edge.target(), "B");
        assert_eq!(edge.kind(), ArrowKind::Open);
        assert_eq!(edge.label(), Some("yes"));
        assert_eq!(Edge::new("A", "B").kind(), ArrowKind::Directed);
    }
}
