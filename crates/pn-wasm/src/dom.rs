//! SVG DOM rendering surface.
//!
//! Mounts onto an existing `<svg>` holding a `graph` group with `edges` and
//! `nodes` groups inside. Keeps a handle to every created element so moves
//! and removals never query the document.

use pn_core::{EdgeKey, NodeId, Position, Vec2, ViewTransform};
use pn_render::RenderSurface;
use pn_render::svg::{SVG_NS, SvgElement, arrow_marker};
use std::collections::HashMap;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Element ids the surface looks up on mount.
pub struct SurfaceIds {
    pub canvas: &'static str,
    pub graph: &'static str,
    pub nodes: &'static str,
    pub edges: &'static str,
    /// Optional text element showing the current mode.
    pub status: &'static str,
}

impl Default for SurfaceIds {
    fn default() -> Self {
        Self {
            canvas: "canvas",
            graph: "graph",
            nodes: "nodes",
            edges: "edges",
            status: "state",
        }
    }
}

pub struct DomSurface {
    document: Document,
    canvas: Element,
    graph: Element,
    nodes: Element,
    edges: Element,
    status: Option<Element>,
    node_elements: HashMap<NodeId, [Element; 2]>,
    edge_elements: HashMap<EdgeKey, Element>,
}

impl DomSurface {
    /// Find the required elements. Any missing one is a fatal setup error.
    pub fn mount(document: &Document, ids: &SurfaceIds) -> Result<Self, JsValue> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from(js_sys::Error::new(&format!("#{id} not found"))))
        };
        let surface = Self {
            document: document.clone(),
            canvas: find(ids.canvas)?,
            graph: find(ids.graph)?,
            nodes: find(ids.nodes)?,
            edges: find(ids.edges)?,
            status: document.get_element_by_id(ids.status),
            node_elements: HashMap::new(),
            edge_elements: HashMap::new(),
        };
        surface.install_marker()?;
        Ok(surface)
    }

    fn create(&self, desc: &SvgElement) -> Result<Element, JsValue> {
        let el = self.document.create_element_ns(Some(SVG_NS), desc.tag)?;
        for (name, value) in &desc.attrs {
            el.set_attribute(name, value)?;
        }
        if let Some(text) = &desc.text {
            el.set_text_content(Some(text));
        }
        for child in &desc.children {
            let child_el = self.create(child)?;
            el.append_child(&child_el)?;
        }
        Ok(el)
    }

    fn install_marker(&self) -> Result<(), JsValue> {
        let marker = self.create(&arrow_marker())?;
        self.edges.append_child(&marker)?;
        Ok(())
    }

    fn try_insert_node(&mut self, id: NodeId, body: &SvgElement, label: &SvgElement) -> Result<(), JsValue> {
        let body = self.create(body)?;
        let label = self.create(label)?;
        self.nodes.append_child(&body)?;
        self.nodes.append_child(&label)?;
        self.node_elements.insert(id, [body, label]);
        Ok(())
    }

    fn try_move_node(&self, id: NodeId, position: Position) -> Result<(), JsValue> {
        let Some(elements) = self.node_elements.get(&id) else {
            return Ok(());
        };
        let (x, y) = (position.x.to_string(), position.y.to_string());
        for el in elements {
            el.set_attribute("x", &x)?;
            el.set_attribute("y", &y)?;
        }
        Ok(())
    }

    fn try_insert_edge(&mut self, key: EdgeKey, line: &SvgElement) -> Result<(), JsValue> {
        let el = self.create(line)?;
        self.edges.append_child(&el)?;
        self.edge_elements.insert(key, el);
        Ok(())
    }

    fn try_update_edge(&self, key: EdgeKey, coords: [f64; 4]) -> Result<(), JsValue> {
        let Some(el) = self.edge_elements.get(&key) else {
            return Ok(());
        };
        for (name, value) in ["x1", "y1", "x2", "y2"].into_iter().zip(coords) {
            el.set_attribute(name, &value.to_string())?;
        }
        Ok(())
    }
}

fn report(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("svg {op} failed: {e:?}");
    }
}

impl RenderSurface for DomSurface {
    fn insert_node(&mut self, id: NodeId, body: SvgElement, label: SvgElement) {
        let result = self.try_insert_node(id, &body, &label);
        report("insert node", result);
    }

    fn move_node(&mut self, id: NodeId, position: Position) {
        report("move node", self.try_move_node(id, position));
    }

    fn remove_node(&mut self, id: NodeId) {
        if let Some(elements) = self.node_elements.remove(&id) {
            for el in elements {
                el.remove();
            }
        }
    }

    fn insert_edge(&mut self, key: EdgeKey, line: SvgElement) {
        let result = self.try_insert_edge(key, &line);
        report("insert edge", result);
    }

    fn update_edge(&mut self, key: EdgeKey, coords: [f64; 4]) {
        report("update edge", self.try_update_edge(key, coords));
    }

    fn remove_edge(&mut self, key: EdgeKey) {
        if let Some(el) = self.edge_elements.remove(&key) {
            el.remove();
        }
    }

    fn clear(&mut self) {
        self.nodes.set_inner_html("");
        self.edges.set_inner_html("");
        self.node_elements.clear();
        self.edge_elements.clear();
        report("restore marker", self.install_marker());
    }

    fn set_view(&mut self, view: &ViewTransform) {
        report(
            "transform",
            self.graph.set_attribute("transform", &view.svg_transform()),
        );
    }

    fn origin(&self) -> Option<Vec2> {
        if !self.canvas.is_connected() {
            return None;
        }
        let rect = self.canvas.get_bounding_client_rect();
        Some(Vec2::new(rect.left(), rect.top()))
    }

    fn show_mode(&mut self, name: &str) {
        if let Some(status) = &self.status {
            status.set_text_content(Some(name));
        }
    }
}
