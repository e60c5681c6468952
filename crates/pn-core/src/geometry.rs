//! Edge endpoint geometry.
//!
//! Edges are drawn between node boundaries rather than centers so the
//! arrowhead stays visible outside the node body.

use crate::model::Position;
use kurbo::{Point, Vec2};

/// Drawn start and end of an edge line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEndpoints {
    pub start: Position,
    pub end: Position,
}

/// Pull both ends of the segment `start_center → end_center` inward by
/// `half_extent + margin` along the segment's direction.
///
/// Coincident centers have no direction; `atan2(0, 0) == 0` so both ends
/// move along +x / -x.
pub fn edge_endpoints(
    start_center: Position,
    end_center: Position,
    half_extent: f64,
    margin: f64,
) -> EdgeEndpoints {
    let from = Point::from(start_center);
    let to = Point::from(end_center);
    let angle = (to - from).atan2();
    let offset = Vec2::from_angle(angle) * (half_extent + margin);
    EdgeEndpoints {
        start: (from + offset).into(),
        end: (to - offset).into(),
    }
}
