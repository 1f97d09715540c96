//! Sugiyama (hierarchical) layout engine
//!
//! Uses the rust-sugiyama implementation of layered drawing to position
//! nodes with few edge crossings. Each connected component is laid out on
//! its own and components are placed side by side. Nodes that take part in
//! no edge are placed on a row below the layered drawing.

use std::{collections::HashMap, panic};

use indexmap::IndexSet;
use log::debug;
use rust_sugiyama::configure::Config;

use drawtree_core::geometry::{Point, Size};

use crate::{
    error::DrawtreeError,
    layout::{self, LayoutEdge, LayoutNode, Placement},
};

/// Distance between the drawing and the page origin.
const MARGIN: f32 = 40.0;

/// Horizontal distance between neighboring vertices in rust-sugiyama units.
const VERTEX_SPACING: f64 = 3.0;

/// Coordinates of one component as returned by rust-sugiyama.
type Coordinates = Vec<(usize, (f64, f64))>;

/// The Sugiyama layout engine
pub struct Engine {
    /// Gap between neighboring nodes in a layer
    horizontal_spacing: f32,

    /// Gap between layers
    vertical_spacing: f32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new Sugiyama layout engine
    pub fn new() -> Self {
        Self {
            horizontal_spacing: 40.0,
            vertical_spacing: 80.0,
        }
    }

    /// Set the gap between neighboring nodes in a layer
    pub fn set_horizontal_spacing(&mut self, spacing: f32) -> &mut Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the gap between layers
    pub fn set_vertical_spacing(&mut self, spacing: f32) -> &mut Self {
        self.vertical_spacing = spacing;
        self
    }

    /// Run rust-sugiyama, turning a panic inside the crate into an error.
    fn layered(edges: Vec<(u32, u32)>) -> Result<Vec<Coordinates>, DrawtreeError> {
        let layouts = panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: VERTEX_SPACING,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        })
        .map_err(|err| {
            let message = err
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| err.downcast_ref::<&str>().copied())
                .unwrap_or("unknown error");
            DrawtreeError::Layout(format!("rust-sugiyama layout engine panicked: {message}"))
        })?;

        Ok(layouts
            .into_iter()
            .map(|(coords, _, _)| {
                coords
                    .into_iter()
                    .map(|(id, (x, y))| (id, (x as f64, y as f64)))
                    .collect()
            })
            .collect())
    }
}

/// Maps raw y coordinates of a component onto layer indices, root layer first.
fn layer_indices(coords: &Coordinates, edges: &IndexSet<(u32, u32)>) -> HashMap<usize, usize> {
    let mut ys: Vec<f64> = coords.iter().map(|&(_, (_, y))| y).collect();
    ys.sort_by(f64::total_cmp);
    ys.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);

    let layer_of = |y: f64| {
        ys.iter()
            .position(|&layer_y| (layer_y - y).abs() < f64::EPSILON)
            .unwrap_or_default()
    };

    let mut layers: HashMap<usize, usize> = coords
        .iter()
        .map(|&(id, (_, y))| (id, layer_of(y)))
        .collect();

    // rust-sugiyama does not promise which way the y axis grows; sources go on top
    let points_up = edges.iter().find_map(|&(source, target)| {
        let source = layers.get(&(source as usize))?;
        let target = layers.get(&(target as usize))?;
        Some(source > target)
    });
    if points_up == Some(true) {
        let last = ys.len().saturating_sub(1);
        for layer in layers.values_mut() {
            *layer = last - *layer;
        }
    }

    layers
}

impl layout::Engine for Engine {
    fn calculate(
        &self,
        nodes: &[LayoutNode<'_>],
        edges: &[LayoutEdge],
    ) -> Result<Placement, DrawtreeError> {
        let cell = nodes
            .iter()
            .map(LayoutNode::size)
            .fold(Size::default(), Size::max);
        let column_pitch = cell.width() + self.horizontal_spacing;
        let row_pitch = cell.height() + self.vertical_spacing;

        // Self-loops and duplicates carry no layering information
        let sugiyama_edges: IndexSet<(u32, u32)> = edges
            .iter()
            .filter(|edge| !edge.is_self_loop())
            .map(|edge| (edge.source() as u32, edge.target() as u32))
            .collect();

        let components = if sugiyama_edges.is_empty() {
            Vec::new()
        } else {
            debug!(
                nodes_count = nodes.len(),
                edges_count = sugiyama_edges.len();
                "Applying Sugiyama algorithm"
            );
            Self::layered(sugiyama_edges.iter().copied().collect())?
        };

        let mut centers: Vec<Option<Point>> = vec![None; nodes.len()];
        let mut left = MARGIN;
        let mut layers_count = 0;

        for coords in &components {
            let layers = layer_indices(coords, &sugiyama_edges);
            let min_x = coords
                .iter()
                .map(|&(_, (x, _))| x)
                .fold(f64::INFINITY, f64::min);
            let mut right = left;

            for &(id, (x, _)) in coords {
                let (Some(slot), Some(&layer)) = (centers.get_mut(id), layers.get(&id)) else {
                    debug!(id; "Vertex from rust-sugiyama result is out of range");
                    continue;
                };
                let column = ((x - min_x) / VERTEX_SPACING) as f32;
                let center = Point::new(
                    left + column * column_pitch + cell.width() / 2.0,
                    MARGIN + layer as f32 * row_pitch + cell.height() / 2.0,
                );
                right = right.max(center.x() + cell.width() / 2.0);
                layers_count = layers_count.max(layer + 1);
                *slot = Some(center);
            }

            left = right + self.horizontal_spacing;
        }

        // Isolated nodes go on one row below everything else
        let isolated_top = MARGIN + layers_count as f32 * row_pitch;
        let mut isolated_left = MARGIN;
        let mut isolated_count = 0;
        let centers = centers
            .into_iter()
            .map(|center| {
                center.unwrap_or_else(|| {
                    let point = Point::new(
                        isolated_left + cell.width() / 2.0,
                        isolated_top + cell.height() / 2.0,
                    );
                    isolated_left += column_pitch;
                    isolated_count += 1;
                    point
                })
            })
            .collect();

        debug!(
            components_count = components.len(),
            layers_count,
            isolated_count;
            "Sugiyama layout generated"
        );

        Ok(Placement::new(centers))
    }
}
