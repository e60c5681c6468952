//! The seam between the scene and whatever displays it.
//!
//! `SyncEngine` calls these in the same step as each scene mutation, so the
//! display never lags the store. The browser build implements it over the
//! SVG DOM; tests use an in-memory recorder.

use crate::svg::SvgElement;
use pn_core::{EdgeKey, NodeId, Position, Vec2, ViewTransform};

pub trait RenderSurface {
    /// Add the body and label elements of a node.
    fn insert_node(&mut self, id: NodeId, body: SvgElement, label: SvgElement);

    /// Move a node's body and label to `position`.
    fn move_node(&mut self, id: NodeId, position: Position);

    fn remove_node(&mut self, id: NodeId);

    fn insert_edge(&mut self, key: EdgeKey, line: SvgElement);

    /// Redraw an edge line with new `(x1, y1, x2, y2)`.
    fn update_edge(&mut self, key: EdgeKey, coords: [f64; 4]);

    fn remove_edge(&mut self, key: EdgeKey);

    /// Drop every node and edge, then restore the arrow marker.
    fn clear(&mut self);

    /// Re-apply the graph group's transform.
    fn set_view(&mut self, view: &ViewTransform);

    /// Client-space origin of the surface; `None` when detached.
    fn origin(&self) -> Option<Vec2>;

    /// Show the current mode name, if the page has somewhere to show it.
    fn show_mode(&mut self, _name: &str) {}
}
