//! Remote graph store protocol.
//!
//! Each editing action the store must confirm becomes one [`RemoteRequest`]:
//! a method, a path, and for POSTs a form-encoded body. The transport (the
//! browser's `fetch` in the WASM build) hands back a [`Reply`], which
//! [`decode`] turns into a [`Confirmed`] change for the scene.
//!
//! There is no retry, queue, or sequencing. Replies may land in any order.

use pn_core::{Edge, Node, NodeId, NodeType, Position};

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("store answered with status {0}")]
    Status(u16),
    #[error("undecodable store response: {0}")]
    Decode(String),
    #[error("request did not complete: {0}")]
    Transport(String),
}

impl From<serde_json::Error> for SyncError {
    fn from(e: serde_json::Error) -> Self {
        SyncError::Decode(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// One outbound call to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteRequest {
    LoadNodes,
    LoadEdges,
    Create {
        position: Position,
        node_type: NodeType,
    },
    /// Final drag position, already rounded.
    Move { id: NodeId, x: i64, y: i64 },
    Connect { start: NodeId, end: NodeId },
    Delete { id: NodeId },
    Clear,
}

impl RemoteRequest {
    pub fn method(&self) -> Method {
        match self {
            RemoteRequest::LoadNodes | RemoteRequest::LoadEdges => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            RemoteRequest::LoadNodes => "/nodes",
            RemoteRequest::LoadEdges => "/edges",
            RemoteRequest::Create { .. } => "/create",
            RemoteRequest::Move { .. } => "/move",
            RemoteRequest::Connect { .. } => "/connect",
            RemoteRequest::Delete { .. } => "/delete",
            RemoteRequest::Clear => "/clear",
        }
    }

    /// Form body for POSTs that carry fields. `None` for an empty body.
    pub fn form_body(&self) -> Option<String> {
        let fields: Vec<(&str, String)> = match self {
            RemoteRequest::LoadNodes | RemoteRequest::LoadEdges | RemoteRequest::Clear => {
                return None;
            }
            RemoteRequest::Create {
                position,
                node_type,
            } => vec![
                ("x", position.x.to_string()),
                ("y", position.y.to_string()),
                ("node_type", node_type.as_str().to_string()),
            ],
            RemoteRequest::Move { id, x, y } => vec![
                ("node_id", id.to_string()),
                ("x", x.to_string()),
                ("y", y.to_string()),
            ],
            RemoteRequest::Connect { start, end } => vec![
                ("start_node_id", start.to_string()),
                ("end_node_id", end.to_string()),
            ],
            RemoteRequest::Delete { id } => vec![("node_id", id.to_string())],
        };
        Some(encode_form(&fields))
    }
}

fn encode_form(fields: &[(&str, String)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// What the transport got back.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A store-confirmed change to apply to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmed {
    Nodes(Vec<Node>),
    Edges(Vec<Edge>),
    Created(Node),
    Moved { id: NodeId, position: Position },
    Connected(Edge),
    Deleted(NodeId),
    Cleared,
}

/// Interpret a reply to `request`.
pub fn decode(request: &RemoteRequest, reply: &Reply) -> Result<Confirmed, SyncError> {
    if !reply.is_success() {
        return Err(SyncError::Status(reply.status));
    }
    let confirmed = match request {
        RemoteRequest::LoadNodes => Confirmed::Nodes(serde_json::from_str(&reply.body)?),
        RemoteRequest::LoadEdges => Confirmed::Edges(serde_json::from_str(&reply.body)?),
        RemoteRequest::Create { .. } => Confirmed::Created(serde_json::from_str(&reply.body)?),
        RemoteRequest::Move { id, x, y } => Confirmed::Moved {
            id: *id,
            position: Position::new(*x as f64, *y as f64),
        },
        RemoteRequest::Connect { .. } => Confirmed::Connected(serde_json::from_str(&reply.body)?),
        RemoteRequest::Delete { id } => Confirmed::Deleted(*id),
        RemoteRequest::Clear => Confirmed::Cleared,
    };
    Ok(confirmed)
}
