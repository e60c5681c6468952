//! SVG element descriptions for nodes, edges, and the arrow marker.
//!
//! The same descriptions back both the live DOM surface and the
//! standalone snapshot from [`render_document`], so a node looks the same
//! whichever way it was drawn.

use pn_core::{Edge, EditorConfig, Node, NodeType, SceneStore, ViewTransform, edge_endpoints};
use std::fmt::Write;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Attribute carrying the node id on every clickable node primitive.
pub const DATA_ID: &str = "data-id";
pub const DATA_START_NODE_ID: &str = "data-start-node-id";
pub const DATA_END_NODE_ID: &str = "data-end-node-id";

/// Id of the shared arrowhead marker definition.
pub const ARROW_MARKER_ID: &str = "arrow";

/// Corner radius large enough that the 50×50 box renders as a circle.
const TRANSITION_RADIUS: f64 = 2000.0;

/// A single SVG element ready to be created in the DOM or written as markup.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub text: Option<String>,
    pub children: Vec<SvgElement>,
}

impl SvgElement {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl ToString) -> Self {
        self.attrs.push((name, value.to_string()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: SvgElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append this element as XML markup.
    pub fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, r#" {name}="{}""#, escape(value));
        }
        if self.text.is_none() && self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The node body: a box centered on the node position.
pub fn node_body(node: &Node, config: &EditorConfig) -> SvgElement {
    let size = config.node_size;
    let half = config.half_extent();
    let radius = match node.node_type {
        NodeType::Place => 0.0,
        NodeType::Transition => TRANSITION_RADIUS,
    };
    SvgElement::new("rect")
        .attr("class", "node")
        .attr("x", node.position.x)
        .attr("y", node.position.y)
        .attr("width", size)
        .attr("height", size)
        .attr("transform", format!("translate({}, {})", -half, -half))
        .attr("rx", radius)
        .attr("fill", "#eee")
        .attr("stroke", "#ccc")
        .attr("stroke-width", 1)
        .attr(DATA_ID, node.id.as_str())
}

/// The centered id label drawn over the node body.
pub fn node_label(node: &Node) -> SvgElement {
    SvgElement::new("text")
        .attr("x", node.position.x)
        .attr("y", node.position.y)
        .attr(DATA_ID, node.id.as_str())
        .attr("font-size", 20)
        .attr("font-family", "Arial")
        .attr("text-anchor", "middle")
        .attr("dominant-baseline", "middle")
        .text(node.id.as_str())
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// Line attributes `(x1, y1, x2, y2)` for an edge, already shortened.
pub fn edge_line_coords(edge: &Edge, config: &EditorConfig) -> [f64; 4] {
    let ends = edge_endpoints(
        edge.start_position,
        edge.end_position,
        config.half_extent(),
        config.edge_margin,
    );
    [ends.start.x, ends.start.y, ends.end.x, ends.end.y]
}

pub fn edge_line(edge: &Edge, config: &EditorConfig) -> SvgElement {
    let [x1, y1, x2, y2] = edge_line_coords(edge, config);
    SvgElement::new("line")
        .attr("class", "edge")
        .attr("x1", x1)
        .attr("y1", y1)
        .attr("x2", x2)
        .attr("y2", y2)
        .attr("marker-end", format!("url(#{ARROW_MARKER_ID})"))
        .attr(DATA_START_NODE_ID, edge.start_node_id.as_str())
        .attr(DATA_END_NODE_ID, edge.end_node_id.as_str())
        .attr("stroke", "black")
}

/// Arrowhead marker shared by every edge line.
pub fn arrow_marker() -> SvgElement {
    SvgElement::new("marker")
        .attr("id", ARROW_MARKER_ID)
        .attr("markerWidth", 10)
        .attr("markerHeight", 10)
        .attr("refX", 8)
        .attr("refY", 5)
        .attr("orient", "auto-start-reverse")
        .child(
            SvgElement::new("path")
                .attr("d", "M 0 0 L 10 5 L 0 10 z")
                .attr("fill", "black"),
        )
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// Render the whole scene as a standalone SVG document.
///
/// Mirrors the live DOM layout: a `graph` group carrying the view transform,
/// holding the `edges` group (marker first) and then the `nodes` group.
pub fn render_document(store: &SceneStore, view: &ViewTransform, config: &EditorConfig) -> String {
    let mut edges = SvgElement::new("g").attr("id", "edges").child(arrow_marker());
    for (_, edge) in store.edges() {
        edges = edges.child(edge_line(edge, config));
    }

    let mut nodes = SvgElement::new("g").attr("id", "nodes");
    for node in store.nodes() {
        nodes = nodes.child(node_body(node, config)).child(node_label(node));
    }

    let graph = SvgElement::new("g")
        .attr("id", "graph")
        .attr("transform", view.svg_transform())
        .child(edges)
        .child(nodes);

    let root = SvgElement::new("svg")
        .attr("xmlns", SVG_NS)
        .attr("id", "canvas")
        .child(graph);

    let mut out = String::new();
    root.write_markup(&mut out);
    log::debug!(
        "rendered snapshot: {} nodes, {} edges, {} bytes",
        store.node_count(),
        store.edge_count(),
        out.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pn_core::{NodeId, Position};
    use pretty_assertions::assert_eq;

    fn place(id: &str, x: f64, y: f64) -> Node {
        Node::new(NodeId::intern(id), NodeType::Place, Position::new(x, y))
    }

    #[test]
    fn place_is_square_transition_is_round() {
        let config = EditorConfig::default();
        let p = node_body(&place("p", 0.0, 0.0), &config);
        assert_eq!(p.get("rx"), Some("0"));

        let mut t = place("t", 0.0, 0.0);
        t.node_type = NodeType::Transition;
        assert_eq!(node_body(&t, &config).get("rx"), Some("2000"));
    }

    #[test]
    fn node_body_is_centered_on_position() {
        let config = EditorConfig::default();
        let body = node_body(&place("c", 40.0, 60.0), &config);
        assert_eq!(body.get("x"), Some("40"));
        assert_eq!(body.get("y"), Some("60"));
        assert_eq!(body.get("transform"), Some("translate(-25, -25)"));
        assert_eq!(body.get(DATA_ID), Some("c"));
    }

    #[test]
    fn label_shows_the_id() {
        let label = node_label(&place("p42", 1.0, 2.0));
        assert_eq!(label.text.as_deref(), Some("p42"));
        assert_eq!(label.get(DATA_ID), Some("p42"));
    }

    #[test]
    fn edge_line_is_shortened_and_annotated() {
        let a = place("ea", 0.0, 0.0);
        let b = place("eb", 100.0, 0.0);
        let line = edge_line(&Edge::new(&a, &b), &EditorConfig::default());
        assert_eq!(line.get("x1"), Some("30"));
        assert_eq!(line.get("x2"), Some("70"));
        assert_eq!(line.get("marker-end"), Some("url(#arrow)"));
        assert_eq!(line.get(DATA_START_NODE_ID), Some("ea"));
        assert_eq!(line.get(DATA_END_NODE_ID), Some("eb"));
    }

    #[test]
    fn markup_escapes_text_and_attributes() {
        let mut out = String::new();
        SvgElement::new("text")
            .attr("data-id", "a\"<b>")
            .text("x & y")
            .write_markup(&mut out);
        assert_eq!(out, r#"<text data-id="a&quot;&lt;b&gt;">x &amp; y</text>"#);
    }

    #[test]
    fn document_contains_marker_nodes_and_edges() {
        let mut store = SceneStore::new();
        let a = place("da", 0.0, 0.0);
        let b = place("db", 100.0, 0.0);
        store.add_node(a.clone()).unwrap();
        store.add_node(b.clone()).unwrap();
        store.add_edge(Edge::new(&a, &b)).unwrap();

        let svg = render_document(&store, &ViewTransform::default(), &EditorConfig::default());
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" id="canvas">"#));
        assert!(svg.contains(r#"<g id="graph" transform="scale(1) translate(0, 0)">"#));
        assert!(svg.contains(r#"<marker id="arrow""#));
        assert!(svg.contains(r#"x1="30" y1="0" x2="70" y2="0""#));
        assert_eq!(svg.matches(r#"class="node""#).count(), 2);
        // Edges are drawn beneath nodes.
        assert!(svg.find(r#"id="edges""#) < svg.find(r#"id="nodes""#));
    }
}
