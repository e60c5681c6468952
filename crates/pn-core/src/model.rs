//! Petri-net data model as exchanged with the remote graph store.
//!
//! The diagram is bipartite: `Place` and `Transition` nodes joined by
//! directed edges. Field names match the store's JSON so the types
//! deserialize straight from response bodies.

use crate::id::NodeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

// ─── Position ────────────────────────────────────────────────────────────

/// A point in graph space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Round both coordinates to the nearest integer, as sent on `/move`.
    pub fn rounded(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

impl From<Position> for Point {
    fn from(p: Position) -> Self {
        Point::new(p.x, p.y)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Position::new(p.x, p.y)
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The two node kinds of the diagram. Only the drawn shape differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    #[default]
    Place,
    Transition,
}

impl NodeType {
    /// Wire name used in form bodies (`node_type=place`).
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Place => "place",
            NodeType::Transition => "transition",
        }
    }
}

/// A place or transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub node_type: NodeType,
    pub position: Position,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, position: Position) -> Self {
        Self {
            id,
            node_type,
            position,
        }
    }
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// A directed arc between two nodes.
///
/// `start_position` / `end_position` are copies of the endpoint node
/// positions taken for drawing; the store refreshes them when a node moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start_node_id: NodeId,
    pub end_node_id: NodeId,
    pub start_position: Position,
    pub end_position: Position,
}

impl Edge {
    pub fn new(start: &Node, end: &Node) -> Self {
        Self {
            start_node_id: start.id,
            end_node_id: end.id,
            start_position: start.position,
            end_position: end.position,
        }
    }
}
