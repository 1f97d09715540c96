//! draw.io (diagrams.net) graph model exporter.
//!
//! Writes an `mxGraphModel` document: two baseline cells, then one vertex
//! cell per node and one edge cell per edge. Node cells are colored by the
//! tier of their hierarchy level. Optionally the model is wrapped in the
//! `mxfile`/`diagram` envelope the desktop editor saves.

use log::{debug, info};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use drawtree_core::{
    geometry::Point,
    graph::ArrowKind,
    positioned::{Layout, PositionedEdge, PositionedNode},
};

use crate::{
    config::{ExportConfig, StyleConfig},
    export::{Error, Exporter},
};

/// Canvas settings written on the `mxGraphModel` element.
const MODEL_ATTRIBUTES: [(&str, &str); 15] = [
    ("dx", "1422"),
    ("dy", "794"),
    ("grid", "1"),
    ("gridSize", "10"),
    ("guides", "1"),
    ("tooltips", "1"),
    ("connect", "1"),
    ("arrows", "1"),
    ("fold", "1"),
    ("page", "1"),
    ("pageScale", "1"),
    ("pageWidth", "1169"),
    ("pageHeight", "827"),
    ("math", "0"),
    ("shadow", "0"),
];

/// Shape parameters shared by every node.
const NODE_STYLE: &str = "rounded=1;whiteSpace=wrap;html=1;shadow=1;fontStyle=1;";

/// Orthogonal routing from the bottom center of the source to the top
/// center of the target.
const EDGE_STYLE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonalLoop=1;jettySize=auto;html=1;\
exitX=0.5;exitY=1;exitDx=0;exitDy=0;entryX=0.5;entryY=0;entryDx=0;entryDy=0;";

/// Id of the invisible root cell.
const ROOT_CELL: &str = "0";

/// Id of the default layer, parent of every node and edge.
const LAYER_CELL: &str = "1";

type XmlWriter = Writer<Vec<u8>>;

/// Cell id of a node. The prefix keeps node ids apart from the baseline
/// cells and from edge ids.
fn node_cell_id(node_id: &str) -> String {
    format!("node_{node_id}")
}

/// Format a coordinate with at most two decimals and no trailing zeros.
fn number(value: f32) -> String {
    // Adding zero turns -0 into 0
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    rounded.to_string()
}

/// draw.io exporter configured with style and export settings.
pub struct Drawio<'a> {
    style: &'a StyleConfig,
    export: &'a ExportConfig,
}

impl<'a> Drawio<'a> {
    pub fn new(style: &'a StyleConfig, export: &'a ExportConfig) -> Self {
        Self { style, export }
    }

    fn node_style(&self, level: Option<usize>) -> String {
        let tier = self.style.tier(level);
        format!(
            "{NODE_STYLE}fontSize={};fillColor={};strokeColor={};",
            self.style.font_size(),
            tier.fill().to_hex(),
            tier.stroke().to_hex()
        )
    }

    fn edge_style(kind: ArrowKind) -> String {
        match kind {
            ArrowKind::Directed => EDGE_STYLE.to_string(),
            ArrowKind::Open => format!("{EDGE_STYLE}endArrow=none;"),
        }
    }

    fn write_model(&self, writer: &mut XmlWriter, layout: &Layout) -> Result<(), Error> {
        writer.write_event(Event::Start(
            BytesStart::new("mxGraphModel").with_attributes(MODEL_ATTRIBUTES),
        ))?;
        writer.write_event(Event::Start(BytesStart::new("root")))?;

        writer.write_event(Event::Empty(
            BytesStart::new("mxCell").with_attributes([("id", ROOT_CELL)]),
        ))?;
        writer.write_event(Event::Empty(
            BytesStart::new("mxCell").with_attributes([("id", LAYER_CELL), ("parent", ROOT_CELL)]),
        ))?;

        for node in layout.nodes() {
            self.write_node(writer, node)?;
        }
        for (index, edge) in layout.edges().iter().enumerate() {
            Self::write_edge(writer, index, edge)?;
        }

        writer.write_event(Event::End(BytesEnd::new("root")))?;
        writer.write_event(Event::End(BytesEnd::new("mxGraphModel")))?;
        Ok(())
    }

    fn write_node(&self, writer: &mut XmlWriter, node: &PositionedNode) -> Result<(), Error> {
        let id = node_cell_id(node.id());
        let style = self.node_style(node.level());
        // draw.io positions a vertex by its top-left corner
        let top_left = node.bounds().min_point();
        let (x, y) = (number(top_left.x()), number(top_left.y()));
        let (width, height) = (number(node.size().width()), number(node.size().height()));

        writer.write_event(Event::Start(BytesStart::new("mxCell").with_attributes([
            ("id", id.as_str()),
            ("value", node.label()),
            ("style", style.as_str()),
            ("vertex", "1"),
            ("parent", LAYER_CELL),
        ])))?;
        writer.write_event(Event::Empty(BytesStart::new("mxGeometry").with_attributes([
            ("x", x.as_str()),
            ("y", y.as_str()),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("as", "geometry"),
        ])))?;
        writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
        Ok(())
    }

    fn write_edge(writer: &mut XmlWriter, index: usize, edge: &PositionedEdge) -> Result<(), Error> {
        let id = format!("edge_{index}");
        let source = node_cell_id(edge.source());
        let target = node_cell_id(edge.target());
        let style = Self::edge_style(edge.kind());

        writer.write_event(Event::Start(BytesStart::new("mxCell").with_attributes([
            ("id", id.as_str()),
            ("value", edge.label().unwrap_or_default()),
            ("style", style.as_str()),
            ("edge", "1"),
            ("parent", LAYER_CELL),
            ("source", source.as_str()),
            ("target", target.as_str()),
        ])))?;

        let geometry =
            BytesStart::new("mxGeometry").with_attributes([("relative", "1"), ("as", "geometry")]);
        if edge.waypoints().is_empty() {
            writer.write_event(Event::Empty(geometry))?;
        } else {
            writer.write_event(Event::Start(geometry))?;
            Self::write_waypoints(writer, edge.waypoints())?;
            writer.write_event(Event::End(BytesEnd::new("mxGeometry")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
        Ok(())
    }

    fn write_waypoints(writer: &mut XmlWriter, points: &[Point]) -> Result<(), Error> {
        writer.write_event(Event::Start(
            BytesStart::new("Array").with_attributes([("as", "points")]),
        ))?;
        for point in points {
            let (x, y) = (number(point.x()), number(point.y()));
            writer.write_event(Event::Empty(
                BytesStart::new("mxPoint").with_attributes([("x", x.as_str()), ("y", y.as_str())]),
            ))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Array")))?;
        Ok(())
    }
}

impl Exporter for Drawio<'_> {
    fn export(&self, layout: &Layout) -> Result<String, Error> {
        info!(
            nodes_count = layout.nodes().len(),
            edges_count = layout.edges().len(),
            envelope = self.export.mxfile_envelope();
            "Exporting draw.io document"
        );

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        if self.export.mxfile_envelope() {
            writer.write_event(Event::Start(
                BytesStart::new("mxfile").with_attributes([("host", "drawtree")]),
            ))?;
            writer.write_event(Event::Start(BytesStart::new("diagram").with_attributes([
                ("id", "drawtree"),
                ("name", self.export.diagram_name()),
            ])))?;
        }

        self.write_model(&mut writer, layout)?;

        if self.export.mxfile_envelope() {
            writer.write_event(Event::End(BytesEnd::new("diagram")))?;
            writer.write_event(Event::End(BytesEnd::new("mxfile")))?;
        }

        let document = String::from_utf8(writer.into_inner())?;
        debug!(bytes = document.len(); "draw.io document written");
        Ok(document)
    }
}
