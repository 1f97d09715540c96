//! Positioned nodes and edges produced by a layout engine.
//!
//! A [`Layout`] is the only input of the document serializer. It pairs each
//! graph node with the center point and box size chosen by the layout engine,
//! and each edge with optional routing waypoints.

use crate::{
    geometry::{Bounds, Point, Size},
    graph::{ArrowKind, Edge, Node},
};

/// A node together with its box size and the absolute position of its center.
#[derive(Debug, Clone)]
pub struct PositionedNode {
    node: Node,
    center: Point,
    size: Size,
}

impl PositionedNode {
    /// Construct a positioned node from a graph node, its center and its size.
    pub fn new(node: Node, center: Point, size: Size) -> Self {
        Self { node, center, size }
    }

    /// Get a reference to the underlying graph node
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn id(&self) -> &str {
        self.node.id()
    }

    pub fn label(&self) -> &str {
        self.node.label()
    }

    pub fn level(&self) -> Option<usize> {
        self.node.level()
    }

    /// Get the center of the node box
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Calculate the bounds of the node box.
    pub fn bounds(&self) -> Bounds {
        self.center.to_bounds(self.size)
    }
}

/// An edge together with the waypoints a layout engine routed it through.
#[derive(Debug, Clone)]
pub struct PositionedEdge {
    edge: Edge,
    waypoints: Vec<Point>,
}

impl PositionedEdge {
    pub fn new(edge: Edge) -> Self {
        Self {
            edge,
            waypoints: Vec::new(),
        }
    }

    /// Set the routing waypoints (builder style).
    pub fn with_waypoints(mut self, waypoints: Vec<Point>) -> Self {
        self.waypoints = waypoints;
        self
    }

    pub fn source(&self) -> &str {
        self.edge.source()
    }

    pub fn target(&self) -> &str {
        self.edge.target()
    }

    pub fn kind(&self) -> ArrowKind {
        self.edge.kind()
    }

    pub fn label(&self) -> Option<&str> {
        self.edge.label()
    }

    /// Intermediate routing points, empty when the consumer routes the edge.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }
}

/// A fully positioned graph.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    nodes: Vec<PositionedNode>,
    edges: Vec<PositionedEdge>,
}

impl Layout {
    pub fn new(nodes: Vec<PositionedNode>, edges: Vec<PositionedEdge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PositionedEdge] {
        &self.edges
    }

    /// Bounding box of all node boxes, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let (first, rest) = self.nodes.split_first()?;
        Some(
            rest.iter()
                .fold(first.bounds(), |acc, node| acc.merge(&node.bounds())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positioned_node_bounds() {
        let node = PositionedNode::new(
            Node::new("A").with_label("Home"),
            Point::new(100.0, 100.0),
            Size::new(160.0, 60.0),
        );

        assert_eq!(node.id(), "A");
        assert_eq!(node.label(), "Home");
        assert_eq!(node.bounds().min_point(), Point::new(20.0, 70.0));
    }

    #[test]
    fn test_layout_bounds() {
        let size = Size::new(10.0, 10.0);
        let layout = Layout::new(
            vec![
                PositionedNode::new(Node::new("A"), Point::new(5.0, 5.0), size),
                PositionedNode::new(Node::new("B"), Point::new(45.0, 25.0), size),
            ],
            vec![PositionedEdge::new(Edge::new("A", "B"))],
        );

        let bounds = layout.bounds().unwrap();
        assert_eq!(bounds.min_point(), Point::new(0.0, 0.0));
        assert_eq!(bounds.width(), 50.0);
        assert_eq!(bounds.height(), 30.0);
        assert!(Layout::default().bounds().is_none());
    }

    #[test]
    fn test_positioned_edge_waypoints() {
        let edge = PositionedEdge::new(Edge::new("A", "B").with_label("next"))
            .with_waypoints(vec![Point::new(1.0, 2.0)]);

        assert_eq!(edge.source(), "A");
        assert_eq!(edge.target(), "B");
        assert_eq!(edge.label(), Some("next"));
        assert_eq!(edge.waypoints(), [Point::new(1.0, 2.0)]);
    }
}
