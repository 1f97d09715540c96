//! Layout engine factory module
//!
//! This module selects and configures a layout [`Engine`] from the
//! [`LayoutConfig`]. It uses a builder pattern for creating engines.

pub mod sugiyama;
pub mod tree;

use log::debug;

use drawtree_core::geometry::Size;

use crate::{
    config::{LayoutConfig, LayoutEngine},
    error::DrawtreeError,
    layout::Engine,
};

/// Builder for creating and configuring layout engines.
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    engine: LayoutEngine,
    node_size: Size,
    horizontal_spacing: f32,
    vertical_spacing: f32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl EngineBuilder {
    /// Create a new engine builder with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine builder from a layout configuration section
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            engine: config.engine(),
            node_size: Size::new(config.node_width(), config.node_height()),
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
        }
    }

    /// Set the layout algorithm
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the size of every node box
    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_size = size;
        self
    }

    /// Set the gap between neighboring boxes in a row
    pub fn with_horizontal_spacing(mut self, spacing: f32) -> Self {
        self.horizontal_spacing = spacing;
        self
    }

    /// Set the gap between rows
    pub fn with_vertical_spacing(mut self, spacing: f32) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Build the configured engine for a graph with `edges_count` edges.
    ///
    /// A graph without edges has nothing to layer, so it always gets the
    /// tree engine.
    ///
    /// # Errors
    ///
    /// Returns [`DrawtreeError::Config`] when the node size is not positive
    /// or a spacing is negative.
    pub fn build(&self, edges_count: usize) -> Result<Box<dyn Engine>, DrawtreeError> {
        self.validate()?;

        let engine_type = if edges_count == 0 {
            LayoutEngine::Tree
        } else {
            self.engine
        };
        debug!(engine:? = engine_type, requested:? = self.engine; "Building layout engine");

        let engine: Box<dyn Engine> = match engine_type {
            LayoutEngine::Tree => {
                let mut e = tree::Engine::new();
                e.set_horizontal_spacing(self.horizontal_spacing);
                e.set_vertical_spacing(self.vertical_spacing);
                Box::new(e)
            }
            LayoutEngine::Sugiyama => {
                let mut e = sugiyama::Engine::new();
                e.set_horizontal_spacing(self.horizontal_spacing);
                e.set_vertical_spacing(self.vertical_spacing);
                Box::new(e)
            }
        };
        Ok(engine)
    }

    fn validate(&self) -> Result<(), DrawtreeError> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        let non_negative = |value: f32| value.is_finite() && value >= 0.0;

        if !positive(self.node_size.width()) || !positive(self.node_size.height()) {
            return Err(DrawtreeError::Config(format!(
                "node size must be positive, got {}x{}",
                self.node_size.width(),
                self.node_size.height()
            )));
        }
        if !non_negative(self.horizontal_spacing) || !non_negative(self.vertical_spacing) {
            return Err(DrawtreeError::Config(format!(
                "spacing must not be negative, got horizontal {} and vertical {}",
                self.horizontal_spacing, self.vertical_spacing
            )));
        }
        Ok(())
    }
}
