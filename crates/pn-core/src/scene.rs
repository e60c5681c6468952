//! In-memory reflection of the nodes and edges currently on screen.
//!
//! Backed by a `StableDiGraph` whose node weights are [`Node`]s and whose
//! edge weights are [`Edge`]s. Parallel edges are allowed: inserting the
//! same ordered pair twice keeps both. Removing a node drops every edge
//! that starts or ends at it.

use crate::id::NodeId;
use crate::model::{Edge, Node, Position};
use petgraph::Direction;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Handle to one inserted edge. Only meaningful while the edge is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(EdgeIndex);

/// Keys of the edges touching one node. Most nodes have few arcs.
pub type EdgeKeys = SmallVec<[EdgeKey; 4]>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0} is already in the scene")]
    DuplicateNode(NodeId),
    #[error("node {0} is not in the scene")]
    UnknownNode(NodeId),
}

/// What `remove_node` took out of the scene.
#[derive(Debug, Clone)]
pub struct Removed {
    pub node: Node,
    pub edges: Vec<(EdgeKey, Edge)>,
}

#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    graph: StableDiGraph<Node, Edge>,
    id_index: HashMap<NodeId, NodeIndex>,
    /// Insertion order. Freed graph slots get reused, so slot order is not it.
    paint_order: Vec<NodeIndex>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), SceneError> {
        if self.id_index.contains_key(&node.id) {
            return Err(SceneError::DuplicateNode(node.id));
        }
        let id = node.id;
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        self.paint_order.push(idx);
        Ok(())
    }

    /// Remove a node and cascade to every edge touching it.
    /// Returns `None` if the id is not present.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Removed> {
        let idx = self.id_index.remove(&id)?;
        self.paint_order.retain(|&i| i != idx);
        let keys = self.edge_keys_at(idx);
        let edges = keys
            .into_iter()
            .filter_map(|key| self.graph.remove_edge(key.0).map(|edge| (key, edge)))
            .collect();
        let node = self.graph.remove_node(idx)?;
        Some(Removed { node, edges })
    }

    /// Move a node and refresh the position copies held by its edges.
    /// Returns the keys of the edges that need redrawing.
    pub fn update_node_position(
        &mut self,
        id: NodeId,
        position: Position,
    ) -> Result<EdgeKeys, SceneError> {
        let idx = self.index_of(id).ok_or(SceneError::UnknownNode(id))?;
        self.graph[idx].position = position;

        let keys = self.edge_keys_at(idx);
        for key in &keys {
            let edge = &mut self.graph[key.0];
            if edge.start_node_id == id {
                edge.start_position = position;
            }
            if edge.end_node_id == id {
                edge.end_position = position;
            }
        }
        Ok(keys)
    }

    /// Insert an edge between two present nodes. The position copies are
    /// taken from the stored nodes, not from the incoming value.
    pub fn add_edge(&mut self, mut edge: Edge) -> Result<EdgeKey, SceneError> {
        let start = self
            .index_of(edge.start_node_id)
            .ok_or(SceneError::UnknownNode(edge.start_node_id))?;
        let end = self
            .index_of(edge.end_node_id)
            .ok_or(SceneError::UnknownNode(edge.end_node_id))?;
        edge.start_position = self.graph[start].position;
        edge.end_position = self.graph[end].position;
        Ok(EdgeKey(self.graph.add_edge(start, end, edge)))
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.id_index.clear();
        self.paint_order.clear();
    }

    pub fn node_by_id(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    pub fn edge(&self, key: EdgeKey) -> Option<&Edge> {
        self.graph.edge_weight(key.0)
    }

    /// Every edge that starts or ends at `id`. Empty for unknown ids.
    pub fn edges_touching(&self, id: NodeId) -> Vec<(EdgeKey, &Edge)> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        self.edge_keys_at(idx)
            .into_iter()
            .map(|key| (key, &self.graph[key.0]))
            .collect()
    }

    /// Nodes in insertion order; later ones paint on top.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> + '_ {
        self.paint_order.iter().map(move |&idx| &self.graph[idx])
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> + '_ {
        self.graph
            .edge_indices()
            .map(move |e| (EdgeKey(e), &self.graph[e]))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    /// Outgoing then incoming edge keys; a self-loop is listed once.
    fn edge_keys_at(&self, idx: NodeIndex) -> EdgeKeys {
        let mut keys: EdgeKeys = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| EdgeKey(e.id()))
            .collect();
        for e in self.graph.edges_directed(idx, Direction::Incoming) {
            let key = EdgeKey(e.id());
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeType;
    use pretty_assertions::assert_eq;

    fn node(id: &str, x: f64, y: f64) -> Node {
        Node::new(NodeId::intern(id), NodeType::Place, Position::new(x, y))
    }

    fn edge(from: &str, to: &str) -> Edge {
        Edge {
            start_node_id: NodeId::intern(from),
            end_node_id: NodeId::intern(to),
            start_position: Position::default(),
            end_position: Position::default(),
        }
    }

    fn store_ab() -> SceneStore {
        let mut store = SceneStore::new();
        store.add_node(node("A", 0.0, 0.0)).unwrap();
        store.add_node(node("B", 100.0, 0.0)).unwrap();
        store
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut store = store_ab();
        let err = store.add_node(node("A", 5.0, 5.0)).unwrap_err();
        assert_eq!(err, SceneError::DuplicateNode(NodeId::intern("A")));
        // Original survives.
        assert_eq!(
            store.node_by_id(NodeId::intern("A")).unwrap().position,
            Position::new(0.0, 0.0)
        );
    }

    #[test]
    fn cascade_delete_removes_touching_edges() {
        let mut store = store_ab();
        store.add_edge(edge("A", "B")).unwrap();

        let removed = store.remove_node(NodeId::intern("A")).unwrap();
        assert_eq!(removed.node.id, NodeId::intern("A"));
        assert_eq!(removed.edges.len(), 1);

        assert!(store.node_by_id(NodeId::intern("A")).is_none());
        assert!(store.edges_touching(NodeId::intern("A")).is_empty());
        assert!(store.edges_touching(NodeId::intern("B")).is_empty());
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn removing_unknown_node_is_none() {
        let mut store = store_ab();
        assert!(store.remove_node(NodeId::intern("ghost")).is_none());
        assert_eq!(store.node_count(), 2);
    }

    #[test]
    fn edge_copies_follow_node_moves() {
        let mut store = store_ab();
        let key = store.add_edge(edge("A", "B")).unwrap();
        assert_eq!(store.edge(key).unwrap().end_position, Position::new(100.0, 0.0));

        let touched = store
            .update_node_position(NodeId::intern("B"), Position::new(50.0, 50.0))
            .unwrap();
        assert_eq!(touched.as_slice(), &[key]);
        let e = store.edge(key).unwrap();
        assert_eq!(e.start_position, Position::new(0.0, 0.0));
        assert_eq!(e.end_position, Position::new(50.0, 50.0));
    }

    #[test]
    fn moving_unknown_node_errors() {
        let mut store = store_ab();
        let err = store
            .update_node_position(NodeId::intern("ghost"), Position::default())
            .unwrap_err();
        assert_eq!(err, SceneError::UnknownNode(NodeId::intern("ghost")));
    }

    #[test]
    fn duplicate_edges_are_kept() {
        let mut store = store_ab();
        let first = store.add_edge(edge("A", "B")).unwrap();
        let second = store.add_edge(edge("A", "B")).unwrap();
        assert_ne!(first, second);
        assert_eq!(store.edges_touching(NodeId::intern("A")).len(), 2);
    }

    #[test]
    fn edge_to_missing_node_is_rejected() {
        let mut store = store_ab();
        let err = store.add_edge(edge("A", "Z")).unwrap_err();
        assert_eq!(err, SceneError::UnknownNode(NodeId::intern("Z")));
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn self_loop_is_listed_once() {
        let mut store = store_ab();
        store.add_edge(edge("A", "A")).unwrap();
        assert_eq!(store.edges_touching(NodeId::intern("A")).len(), 1);
        let removed = store.remove_node(NodeId::intern("A")).unwrap();
        assert_eq!(removed.edges.len(), 1);
    }

    #[test]
    fn nodes_keep_insertion_order_across_slot_reuse() {
        let mut store = store_ab();
        store.remove_node(NodeId::intern("A")).unwrap();
        store.add_node(node("C", 0.0, 0.0)).unwrap();
        let ids: Vec<&str> = store.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
    }

    #[test]
    fn clear_empties_everything() {
        let mut store = store_ab();
        store.add_edge(edge("B", "A")).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.edge_count(), 0);
        assert!(store.node_by_id(NodeId::intern("B")).is_none());
        // Ids are free again after a clear.
        store.add_node(node("A", 1.0, 1.0)).unwrap();
    }
}
