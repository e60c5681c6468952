//! Render sync: keeps the display in step with the scene store.
//!
//! Every mutation goes through here so that the `SceneStore` and the
//! `RenderSurface` change in the same call. There is no batching and no
//! deferred redraw.
//!
//! Two inputs feed the engine:
//!
//! - **Local mutations** from the session (drag moves, view changes). These
//!   never leave the client.
//! - **Confirmed changes** decoded from store replies. Creation, connection,
//!   deletion, and clearing only ever happen here, after the store said yes.

use crate::remote::Confirmed;
use pn_core::{Edge, EditorConfig, Node, NodeId, Position, SceneError, SceneStore, ViewTransform};
use pn_render::RenderSurface;
use pn_render::svg::{edge_line, edge_line_coords, node_body, node_label};

/// Owns the scene store and the surface it is mirrored onto.
pub struct SyncEngine<S: RenderSurface> {
    /// Nodes and edges currently rendered (single source of truth).
    pub scene: SceneStore,
    pub surface: S,
    pub config: EditorConfig,
}

impl<S: RenderSurface> SyncEngine<S> {
    pub fn new(surface: S, config: EditorConfig) -> Self {
        Self {
            scene: SceneStore::new(),
            surface,
            config,
        }
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), SceneError> {
        let body = node_body(&node, &self.config);
        let label = node_label(&node);
        let id = node.id;
        self.scene.add_node(node)?;
        self.surface.insert_node(id, body, label);
        Ok(())
    }

    /// Remove a node and every edge touching it. Returns `false` if absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(removed) = self.scene.remove_node(id) else {
            return false;
        };
        for (key, _) in &removed.edges {
            self.surface.remove_edge(*key);
        }
        self.surface.remove_node(id);
        log::debug!("removed {id} and {} edges", removed.edges.len());
        true
    }

    /// Move a node and redraw each edge touching it.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<(), SceneError> {
        let keys = self.scene.update_node_position(id, position)?;
        self.surface.move_node(id, position);
        for key in keys {
            if let Some(edge) = self.scene.edge(key) {
                let coords = edge_line_coords(edge, &self.config);
                self.surface.update_edge(key, coords);
            }
        }
        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), SceneError> {
        let key = self.scene.add_edge(edge)?;
        if let Some(stored) = self.scene.edge(key) {
            self.surface.insert_edge(key, edge_line(stored, &self.config));
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.scene.clear();
        self.surface.clear();
    }

    pub fn set_view(&mut self, view: &ViewTransform) {
        self.surface.set_view(view);
    }

    /// Apply a store-confirmed change. Lookup failures (stale ids, duplicate
    /// inserts) are logged and skipped.
    pub fn apply_confirmed(&mut self, confirmed: Confirmed) {
        let result = match confirmed {
            Confirmed::Nodes(nodes) => {
                for node in nodes {
                    self.add_node(node).unwrap_or_else(skip);
                }
                Ok(())
            }
            Confirmed::Edges(edges) => {
                for edge in edges {
                    self.add_edge(edge).unwrap_or_else(skip);
                }
                Ok(())
            }
            Confirmed::Created(node) => self.add_node(node),
            Confirmed::Moved { id, position } => self.move_node(id, position),
            Confirmed::Connected(edge) => self.add_edge(edge),
            Confirmed::Deleted(id) => {
                if !self.remove_node(id) {
                    log::debug!("delete confirmed for {id}, already gone");
                }
                Ok(())
            }
            Confirmed::Cleared => {
                self.clear();
                Ok(())
            }
        };
        result.unwrap_or_else(skip);
    }
}

fn skip(e: SceneError) {
    log::debug!("skipping scene update: {e}");
}
