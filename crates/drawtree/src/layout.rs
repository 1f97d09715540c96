//! Layout stage.
//!
//! Positions every node of a leveled [`Graph`] through a layout [`Engine`].
//! Engines see a flattened view of the graph ([`LayoutNode`] and
//! [`LayoutEdge`] slices) and answer with a [`Placement`]; [`position`]
//! joins the placement back onto the graph to produce the [`Layout`] the
//! exporter consumes.

mod engines;

pub use engines::{EngineBuilder, sugiyama, tree};

use std::collections::HashMap;

use log::{debug, info};

use drawtree_core::{
    geometry::{Point, Size},
    graph::Graph,
    positioned::{Layout, PositionedEdge, PositionedNode},
};

use crate::error::DrawtreeError;

/// A node as seen by a layout engine.
#[derive(Debug, Clone, Copy)]
pub struct LayoutNode<'a> {
    id: &'a str,
    size: Size,
    level: Option<usize>,
}

impl<'a> LayoutNode<'a> {
    pub fn new(id: &'a str, size: Size, level: Option<usize>) -> Self {
        Self { id, size, level }
    }

    pub fn id(&self) -> &'a str {
        self.id
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Hierarchy level hint, `None` for nodes unreachable from the root.
    pub fn level(&self) -> Option<usize> {
        self.level
    }
}

/// An edge as seen by a layout engine, as indices into the node slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutEdge {
    source: usize,
    target: usize,
}

impl LayoutEdge {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// The answer of a layout engine.
///
/// Holds one center point per input node, in input order, and optional
/// waypoints for individual edges.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    centers: Vec<Point>,
    waypoints: HashMap<usize, Vec<Point>>,
}

impl Placement {
    pub fn new(centers: Vec<Point>) -> Self {
        Self {
            centers,
            waypoints: HashMap::new(),
        }
    }

    /// Routes the edge at `edge` through `points`.
    pub fn with_waypoints(mut self, edge: usize, points: Vec<Point>) -> Self {
        self.waypoints.insert(edge, points);
        self
    }

    pub fn centers(&self) -> &[Point] {
        &self.centers
    }

    /// Waypoints of an edge, empty when the edge runs straight.
    pub fn waypoints(&self, edge: usize) -> &[Point] {
        self.waypoints.get(&edge).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Capability interface of a layout algorithm.
pub trait Engine {
    /// Compute node centers and edge waypoints.
    ///
    /// - `nodes`: every node, in graph insertion order
    /// - `edges`: every edge, in declaration order, indexing into `nodes`
    ///
    /// The returned placement must hold exactly one center per node.
    fn calculate(
        &self,
        nodes: &[LayoutNode<'_>],
        edges: &[LayoutEdge],
    ) -> Result<Placement, DrawtreeError>;
}

/// Positions every node and edge of `graph` with `engine`.
///
/// All nodes share `node_size`.
///
/// # Errors
///
/// Returns [`DrawtreeError::Layout`] when the engine fails or answers with
/// a placement that does not cover every node.
pub fn position(
    graph: &Graph,
    engine: &dyn Engine,
    node_size: Size,
) -> Result<Layout, DrawtreeError> {
    let nodes: Vec<LayoutNode> = graph
        .nodes()
        .map(|node| LayoutNode::new(node.id(), node_size, node.level()))
        .collect();

    let edges = graph
        .edges()
        .iter()
        .map(|edge| {
            let index = |id: &str| {
                graph.node_index(id).ok_or_else(|| {
                    DrawtreeError::Layout(format!("edge endpoint `{id}` has no node"))
                })
            };
            Ok(LayoutEdge::new(index(edge.source())?, index(edge.target())?))
        })
        .collect::<Result<Vec<_>, DrawtreeError>>()?;

    debug!(nodes_count = nodes.len(), edges_count = edges.len(); "Calculating layout");
    let placement = engine.calculate(&nodes, &edges)?;

    if placement.centers().len() != nodes.len() {
        return Err(DrawtreeError::Layout(format!(
            "engine placed {} of {} nodes",
            placement.centers().len(),
            nodes.len()
        )));
    }

    let positioned_nodes = graph
        .nodes()
        .zip(placement.centers())
        .map(|(node, center)| PositionedNode::new(node.clone(), *center, node_size))
        .collect();

    let positioned_edges = graph
        .edges()
        .iter()
        .enumerate()
        .map(|(index, edge)| {
            PositionedEdge::new(edge.clone()).with_waypoints(placement.waypoints(index).to_vec())
        })
        .collect();

    let layout = Layout::new(positioned_nodes, positioned_edges);
    if let Some(bounds) = layout.bounds() {
        info!(width = bounds.width(), height = bounds.height(); "Layout calculated");
    }

    Ok(layout)
}
