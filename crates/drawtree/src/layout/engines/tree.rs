//! Level-row layout engine
//!
//! Places one row of nodes per hierarchy level, top to bottom, with nodes in
//! graph insertion order inside a row. Rows are centered on the widest row.
//! Nodes without a level share a final row below the tree.

use std::collections::BTreeMap;

use log::debug;

use drawtree_core::geometry::Point;

use crate::{
    error::DrawtreeError,
    layout::{self, LayoutEdge, LayoutNode, Placement},
};

/// Distance between the drawing and the page origin.
const MARGIN: f32 = 40.0;

/// The tree layout engine
pub struct Engine {
    /// Gap between neighboring nodes in a row
    horizontal_spacing: f32,

    /// Gap between rows
    vertical_spacing: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new tree layout engine
    pub fn new() -> Self {
        Self {
            horizontal_spacing: 40.0,
            vertical_spacing: 80.0,
        }
    }

    /// Set the gap between neighboring nodes in a row
    pub fn set_horizontal_spacing(&mut self, spacing: f32) -> &mut Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the gap between rows
    pub fn set_vertical_spacing(&mut self, spacing: f32) -> &mut Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Group node indices into rows, shallowest level first.
    fn rows(nodes: &[LayoutNode<'_>]) -> Vec<Vec<usize>> {
        let unreachable_row = nodes
            .iter()
            .filter_map(LayoutNode::level)
            .max()
            .map_or(0, |deepest| deepest + 1);

        let mut rows: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (index, node) in nodes.iter().enumerate() {
            rows.entry(node.level().unwrap_or(unreachable_row))
                .or_default()
                .push(index);
        }
        rows.into_values().collect()
    }

    fn row_width(&self, nodes: &[LayoutNode<'_>], row: &[usize]) -> f32 {
        let boxes: f32 = row.iter().map(|&index| nodes[index].size().width()).sum();
        boxes + self.horizontal_spacing * row.len().saturating_sub(1) as f32
    }

    /// Route an edge that does not point down through the left gutter.
    fn detour(
        &self,
        source: &LayoutNode<'_>,
        from: Point,
        target: &LayoutNode<'_>,
        to: Point,
    ) -> Vec<Point> {
        let gutter = MARGIN / 2.0;
        let below_source =
            from.y() + source.size().height() / 2.0 + self.vertical_spacing / 2.0;
        let above_target = to.y() - target.size().height() / 2.0 - self.vertical_spacing / 2.0;

        vec![
            Point::new(from.x(), below_source),
            Point::new(gutter, below_source),
            Point::new(gutter, above_target),
            Point::new(to.x(), above_target),
        ]
    }
}

impl layout::Engine for Engine {
    fn calculate(
        &self,
        nodes: &[LayoutNode<'_>],
        edges: &[LayoutEdge],
    ) -> Result<Placement, DrawtreeError> {
        let rows = Self::rows(nodes);
        let widest = rows
            .iter()
            .map(|row| self.row_width(nodes, row))
            .fold(0.0_f32, f32::max);

        let mut centers = vec![Point::default(); nodes.len()];
        let mut row_of = vec![0; nodes.len()];
        let mut top = MARGIN;

        for (row_index, row) in rows.iter().enumerate() {
            let row_height = row
                .iter()
                .map(|&index| nodes[index].size().height())
                .fold(0.0_f32, f32::max);
            let mut left = MARGIN + (widest - self.row_width(nodes, row)) / 2.0;

            for &index in row {
                let size = nodes[index].size();
                centers[index] = Point::new(left + size.width() / 2.0, top + row_height / 2.0);
                row_of[index] = row_index;
                left += size.width() + self.horizontal_spacing;
            }

            top += row_height + self.vertical_spacing;
        }

        debug!(rows_count = rows.len(), widest; "Tree rows placed");

        let mut placement = Placement::new(centers.clone());
        for (index, edge) in edges.iter().enumerate() {
            let (source, target) = (edge.source(), edge.target());
            if edge.is_self_loop() || row_of[target] > row_of[source] {
                continue;
            }
            let points = self.detour(
                &nodes[source],
                centers[source],
                &nodes[target],
                centers[target],
            );
            placement = placement.with_waypoints(index, points);
        }

        Ok(placement)
    }
}
