pub mod config;
pub mod geometry;
pub mod id;
pub mod model;
pub mod scene;
pub mod transform;

pub use config::EditorConfig;
pub use geometry::{EdgeEndpoints, edge_endpoints};
pub use id::NodeId;
pub use model::*;
pub use scene::{EdgeKey, EdgeKeys, Removed, SceneError, SceneStore};
pub use transform::{Direction, ViewTransform, transform_point};

// Re-export kurbo primitives so downstream crates share one geometry type set
pub use kurbo::{Point, Vec2};
