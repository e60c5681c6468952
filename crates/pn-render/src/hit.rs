//! Hit testing: pointer target → node lookup.
//!
//! Every node primitive (body and label) carries a `data-id` annotation,
//! so the clicked element resolves straight to a [`NodeId`]. When the
//! target has no annotation, the topmost node whose drawn shape contains
//! the graph-space point wins: a square for places, the inscribed circle
//! for transitions.

use pn_core::{Node, NodeId, NodeType, Point, SceneStore};

/// Resolve a `data-id` attribute value to a live node.
pub fn node_from_annotation(store: &SceneStore, annotation: Option<&str>) -> Option<NodeId> {
    let raw = annotation.filter(|s| !s.is_empty())?;
    let id = NodeId::intern(raw);
    store.node_by_id(id).map(|node| node.id)
}

fn shape_contains(node: &Node, p: Point, half_extent: f64) -> bool {
    let d = p - Point::from(node.position);
    match node.node_type {
        NodeType::Place => d.x.abs() <= half_extent && d.y.abs() <= half_extent,
        NodeType::Transition => d.hypot() <= half_extent,
    }
}

/// Find the topmost node whose shape (extent `half_extent`) contains `p`.
/// Returns `None` on empty canvas.
pub fn hit_test(store: &SceneStore, p: Point, half_extent: f64) -> Option<NodeId> {
    // Last painted = topmost
    store
        .nodes()
        .rev()
        .find(|node| shape_contains(node, p, half_extent))
        .map(|node| node.id)
}

/// Annotation first, geometry second.
pub fn resolve_target(
    store: &SceneStore,
    annotation: Option<&str>,
    graph_point: Point,
    half_extent: f64,
) -> Option<NodeId> {
    node_from_annotation(store, annotation).or_else(|| hit_test(store, graph_point, half_extent))
}
