//! Configuration types for drawtree conversions.
//!
//! This module provides configuration structures that control how graphs
//! are laid out, styled and exported. All types implement
//! [`serde::Deserialize`] for loading from external sources; every field has
//! a default, so a partial file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Layout engine choice, node box size and spacing.
//! - [`StyleConfig`] - Color tiers by hierarchy level and font size.
//! - [`ExportConfig`] - Shape of the written document.
//!
//! # Example
//!
//! ```
//! # use drawtree::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().tiers().len(), 4);
//! assert_eq!(config.layout().node_width(), 160.0);
//! ```

use serde::Deserialize;

use drawtree_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig, export: ExportConfig) -> Self {
        Self {
            layout,
            style,
            export,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Available layout engines.
///
/// # Variants
///
/// - `Tree` - One row per hierarchy level (default)
/// - `Sugiyama` - Layered drawing that minimizes edge crossings
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutEngine {
    #[default]
    Tree,
    Sugiyama,
}

impl From<LayoutEngine> for &'static str {
    fn from(val: LayoutEngine) -> Self {
        match val {
            LayoutEngine::Tree => "tree",
            LayoutEngine::Sugiyama => "sugiyama",
        }
    }
}

fn default_node_width() -> f32 {
    160.0
}

fn default_node_height() -> f32 {
    60.0
}

fn default_horizontal_spacing() -> f32 {
    40.0
}

fn default_vertical_spacing() -> f32 {
    80.0
}

/// Layout engine and geometry configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    engine: LayoutEngine,

    /// Width of every node box.
    #[serde(default = "default_node_width")]
    node_width: f32,

    /// Height of every node box.
    #[serde(default = "default_node_height")]
    node_height: f32,

    /// Gap between neighboring boxes in a row.
    #[serde(default = "default_horizontal_spacing")]
    horizontal_spacing: f32,

    /// Gap between rows.
    #[serde(default = "default_vertical_spacing")]
    vertical_spacing: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            node_width: default_node_width(),
            node_height: default_node_height(),
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Returns a copy that uses the given engine.
    pub fn with_engine(mut self, engine: LayoutEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }
}

/// Fill and stroke colors for one hierarchy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TierStyle {
    fill: Color,
    stroke: Color,
}

impl TierStyle {
    pub fn new(fill: Color, stroke: Color) -> Self {
        Self { fill, stroke }
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> Color {
        self.stroke
    }

    fn from_hex(fill: &str, stroke: &str) -> Self {
        // Built-in palette entries are valid hex literals
        Self {
            fill: Color::new(fill).unwrap_or_default(),
            stroke: Color::new(stroke).unwrap_or_default(),
        }
    }
}

fn default_tiers() -> Vec<TierStyle> {
    vec![
        TierStyle::from_hex("#dae8fc", "#6c8ebf"),
        TierStyle::from_hex("#d5e8d4", "#82b366"),
        TierStyle::from_hex("#fff2cc", "#d6b656"),
        TierStyle::from_hex("#f8cecc", "#b85450"),
    ]
}

fn default_fallback() -> TierStyle {
    TierStyle::from_hex("#f5f5f5", "#666666")
}

fn default_font_size() -> u32 {
    14
}

/// Visual styling configuration for written nodes.
///
/// Tier `n` colors nodes at hierarchy level `n`. Nodes deeper than the last
/// tier, and nodes without a level, use the fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default = "default_tiers")]
    tiers: Vec<TierStyle>,

    #[serde(default = "default_fallback")]
    fallback: TierStyle,

    #[serde(default = "default_font_size")]
    font_size: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            fallback: default_fallback(),
            font_size: default_font_size(),
        }
    }
}

impl StyleConfig {
    pub fn tiers(&self) -> &[TierStyle] {
        &self.tiers
    }

    pub fn fallback(&self) -> TierStyle {
        self.fallback
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Returns the tier for a hierarchy level.
    ///
    /// # Example
    ///
    /// ```
    /// # use drawtree::config::StyleConfig;
    /// let style = StyleConfig::default();
    /// assert_eq!(style.tier(Some(0)).fill().to_hex(), "#dae8fc");
    /// assert_eq!(style.tier(Some(4)), style.fallback());
    /// assert_eq!(style.tier(None), style.fallback());
    /// ```
    pub fn tier(&self, level: Option<usize>) -> TierStyle {
        level
            .and_then(|level| self.tiers.get(level))
            .copied()
            .unwrap_or(self.fallback)
    }
}

fn default_diagram_name() -> String {
    "Page-1".to_string()
}

/// Configuration for the written document.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Wrap the graph model in an `mxfile`/`diagram` envelope.
    #[serde(default)]
    mxfile_envelope: bool,

    /// Page name shown by the editor when the envelope is written.
    #[serde(default = "default_diagram_name")]
    diagram_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            mxfile_envelope: false,
            diagram_name: default_diagram_name(),
        }
    }
}

impl ExportConfig {
    /// Returns a copy with the envelope switched on or off.
    pub fn with_mxfile_envelope(mut self, enabled: bool) -> Self {
        self.mxfile_envelope = enabled;
        self
    }

    pub fn mxfile_envelope(&self) -> bool {
        self.mxfile_envelope
    }

    pub fn diagram_name(&self) -> &str {
        &self.diagram_name
    }
}
