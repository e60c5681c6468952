//! Viewport transform: screen space ↔ graph space.
//!
//! The graph group is drawn with `scale(zoom)` followed by a translation of
//! `pan / zoom`, which composes to `screen = zoom * graph + pan`. Screen
//! space additionally includes the client-space origin of the SVG surface.

use crate::config::EditorConfig;
use kurbo::{Affine, Point, Vec2};

/// Which way to map a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ScreenToGraph,
    GraphToScreen,
}

/// Pan offset (screen pixels) and zoom factor for the whole session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            zoom: 1.0,
        }
    }
}

impl ViewTransform {
    /// Scale, then translate.
    pub fn affine(&self) -> Affine {
        Affine::scale(self.zoom).then_translate(Vec2::new(self.pan_x, self.pan_y))
    }

    pub fn graph_to_screen(&self, p: Point) -> Point {
        self.affine() * p
    }

    pub fn screen_to_graph(&self, p: Point) -> Point {
        self.affine().inverse() * p
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Apply one wheel event: `zoom += -step * delta_y`, clamped.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, config: &EditorConfig) {
        self.zoom = config.clamp_zoom(self.zoom - config.zoom_step * delta_y);
    }

    /// SVG `transform` attribute for the graph group.
    pub fn svg_transform(&self) -> String {
        format!(
            "scale({z}) translate({tx}, {ty})",
            z = self.zoom,
            tx = self.pan_x / self.zoom,
            ty = self.pan_y / self.zoom
        )
    }
}

/// Map `p` between spaces through the surface origin and `view`.
///
/// `origin` is the surface's client-space offset. `None` means the surface
/// is detached and cannot be resolved, in which case `p` comes back as is.
pub fn transform_point(
    view: &ViewTransform,
    origin: Option<Vec2>,
    p: Point,
    direction: Direction,
) -> Point {
    let Some(origin) = origin else {
        log::trace!("surface transform unresolved, passing {p:?} through");
        return p;
    };
    match direction {
        Direction::GraphToScreen => view.graph_to_screen(p) + origin,
        Direction::ScreenToGraph => view.screen_to_graph(p - origin),
    }
}
