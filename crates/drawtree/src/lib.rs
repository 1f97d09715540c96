//! drawtree - Convert Mermaid-style flowcharts into leveled draw.io diagrams.
//!
//! The conversion runs in stages: the source text is parsed into a graph,
//! orphan roots are linked under a single main root, every node gets a
//! hierarchy level, a layout engine positions the nodes, and the positioned
//! graph is written as a draw.io `mxGraphModel` document.

pub mod config;
pub mod layout;
pub mod structure;

mod error;
mod export;

pub use drawtree_core::{color, geometry, graph, positioned};
pub use drawtree_parser::{
    Parsed,
    error::{Diagnostic, ErrorCode, Severity},
};

pub use error::DrawtreeError;

use log::{debug, info, trace};

use drawtree_core::graph::Graph;

use config::AppConfig;
use export::Exporter;

/// Result of a full conversion.
#[derive(Debug)]
pub struct Conversion {
    graph: Graph,
    document: String,
    warnings: Vec<Diagnostic>,
}

impl Conversion {
    /// The normalized and leveled graph the document was written from.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    /// Warnings raised while parsing the source.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_document(self) -> String {
        self.document
    }
}

/// Facade over the parsing, structuring, layout and export stages.
///
/// # Examples
///
/// ```
/// use drawtree::{Converter, config::AppConfig};
///
/// let source = "
///     graph TD
///     A[Home] --> B[About]
///     A --> C[Products]
///     C --> D[Electronics]
/// ";
///
/// let converter = Converter::new(AppConfig::default());
/// let conversion = converter.convert(source).expect("Failed to convert");
///
/// assert_eq!(conversion.graph().nodes_count(), 4);
/// assert!(conversion.document().contains("<mxGraphModel"));
/// ```
#[derive(Default)]
pub struct Converter {
    config: AppConfig,
    engine: Option<Box<dyn layout::Engine>>,
}

impl Converter {
    /// Create a new converter with the given configuration.
    ///
    /// The layout engine is built from `config` on every render unless one
    /// is injected with [`Converter::with_engine`].
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            engine: None,
        }
    }

    /// Use `engine` instead of the configured layout engine.
    pub fn with_engine(mut self, engine: Box<dyn layout::Engine>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse source text into a graph.
    ///
    /// Unrecognized content never fails the parse; it is reported through
    /// [`Parsed::warnings`].
    ///
    /// # Errors
    ///
    /// Returns [`DrawtreeError::EmptyGraph`] when the source declares no node
    /// at all. The error carries the warnings and the source so callers can
    /// show what was skipped.
    pub fn parse(&self, source: &str) -> Result<Parsed, DrawtreeError> {
        info!("Parsing source");

        let parsed = drawtree_parser::parse(source);
        let graph = parsed.graph();
        info!(
            nodes_count = graph.nodes_count(),
            edges_count = graph.edges().len(),
            warnings_count = parsed.warnings().len();
            "Source parsed"
        );

        if graph.is_empty() {
            let (_, warnings) = parsed.into_parts();
            return Err(DrawtreeError::new_empty_graph(warnings, source));
        }

        trace!(graph:? = parsed.graph(); "Parsed graph");
        Ok(parsed)
    }

    /// Render a parsed graph into a draw.io document.
    ///
    /// # Errors
    ///
    /// Returns [`DrawtreeError::EmptyGraph`] for a graph without nodes,
    /// [`DrawtreeError::Config`] for an invalid layout configuration and
    /// [`DrawtreeError::Layout`] when the layout engine fails.
    pub fn render_drawio(&self, graph: Graph) -> Result<String, DrawtreeError> {
        self.render(graph).map(|(_, document)| document)
    }

    /// Parse and render in one step.
    ///
    /// # Errors
    ///
    /// Any error of [`Converter::parse`] or [`Converter::render_drawio`].
    pub fn convert(&self, source: &str) -> Result<Conversion, DrawtreeError> {
        let (graph, warnings) = self.parse(source)?.into_parts();
        let (graph, document) = self.render(graph)?;

        Ok(Conversion {
            graph,
            document,
            warnings,
        })
    }

    fn render(&self, graph: Graph) -> Result<(Graph, String), DrawtreeError> {
        if graph.is_empty() {
            return Err(DrawtreeError::new_empty_graph(Vec::new(), String::new()));
        }

        // Build the hierarchy
        info!("Building hierarchy");
        let graph = structure::prepare(graph);
        debug!(edges_count = graph.edges().len(); "Hierarchy built");
        trace!(graph:?; "Leveled graph");

        // Calculate layout
        let builder = layout::EngineBuilder::from_config(self.config.layout());
        let layout = match &self.engine {
            Some(engine) => layout::position(&graph, engine.as_ref(), builder.node_size())?,
            None => {
                let engine = builder.build(graph.edges().len())?;
                layout::position(&graph, engine.as_ref(), builder.node_size())?
            }
        };

        // Serialize
        let exporter = export::drawio::Drawio::new(self.config.style(), self.config.export());
        let document = exporter.export(&layout)?;

        info!("draw.io document rendered successfully");
        Ok((graph, document))
    }
}
