//! Shared fixtures: an in-memory surface and a loaded editor.

#![allow(dead_code)]

use pn_core::{EdgeKey, EditorConfig, NodeId, Position, Vec2, ViewTransform};
use pn_editor::{Editor, RemoteRequest, Reply};
use pn_render::{RenderSurface, SvgElement};
use std::collections::HashMap;

/// Records what would be on screen.
#[derive(Default)]
pub struct RecordingSurface {
    pub nodes: HashMap<NodeId, (SvgElement, SvgElement)>,
    pub edges: HashMap<EdgeKey, SvgElement>,
    pub view: Option<ViewTransform>,
    pub mode: String,
    pub origin: Option<Vec2>,
    pub clears: usize,
}

impl RecordingSurface {
    pub fn attached() -> Self {
        Self {
            origin: Some(Vec2::ZERO),
            ..Self::default()
        }
    }

    /// `(x1, y1, x2, y2)` of every line between `from` and `to`.
    pub fn lines_between(&self, from: &str, to: &str) -> Vec<[f64; 4]> {
        self.edges
            .values()
            .filter(|line| {
                line.get("data-start-node-id") == Some(from)
                    && line.get("data-end-node-id") == Some(to)
            })
            .map(|line| {
                let n = |k| line.get(k).and_then(|v| v.parse().ok()).unwrap_or(f64::NAN);
                [n("x1"), n("y1"), n("x2"), n("y2")]
            })
            .collect()
    }
}

fn set(el: &mut SvgElement, name: &'static str, value: f64) {
    match el.attrs.iter_mut().find(|(n, _)| *n == name) {
        Some((_, v)) => *v = value.to_string(),
        None => el.attrs.push((name, value.to_string())),
    }
}

impl RenderSurface for RecordingSurface {
    fn insert_node(&mut self, id: NodeId, body: SvgElement, label: SvgElement) {
        self.nodes.insert(id, (body, label));
    }

    fn move_node(&mut self, id: NodeId, position: Position) {
        if let Some((body, label)) = self.nodes.get_mut(&id) {
            for el in [body, label] {
                set(el, "x", position.x);
                set(el, "y", position.y);
            }
        }
    }

    fn remove_node(&mut self, id: NodeId) {
        self.nodes.remove(&id);
    }

    fn insert_edge(&mut self, key: EdgeKey, line: SvgElement) {
        self.edges.insert(key, line);
    }

    fn update_edge(&mut self, key: EdgeKey, [x1, y1, x2, y2]: [f64; 4]) {
        if let Some(line) = self.edges.get_mut(&key) {
            set(line, "x1", x1);
            set(line, "y1", y1);
            set(line, "x2", x2);
            set(line, "y2", y2);
        }
    }

    fn remove_edge(&mut self, key: EdgeKey) {
        self.edges.remove(&key);
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.clears += 1;
    }

    fn set_view(&mut self, view: &ViewTransform) {
        self.view = Some(*view);
    }

    fn origin(&self) -> Option<Vec2> {
        self.origin
    }

    fn show_mode(&mut self, name: &str) {
        self.mode = name.to_string();
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// An editor loaded with `fixtures/nodes.json` and `fixtures/edges.json`:
/// `p1 → t1 → p2` laid out on the x axis, 100 apart.
pub fn loaded_editor() -> Editor<RecordingSurface> {
    init_logging();
    let mut editor = Editor::new(RecordingSurface::attached(), EditorConfig::default());
    let [nodes, edges] = Editor::<RecordingSurface>::initial_load();
    editor.apply_reply(&nodes, Ok(Reply::ok(include_str!("../fixtures/nodes.json"))));
    editor.apply_reply(&edges, Ok(Reply::ok(include_str!("../fixtures/edges.json"))));
    editor
}

/// Reply as the store would for `request`, echoing the created entity.
pub fn confirm(editor: &mut Editor<RecordingSurface>, request: &RemoteRequest, body: &str) {
    editor.apply_reply(request, Ok(Reply::ok(body)));
}

pub fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}
