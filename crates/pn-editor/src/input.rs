//! Input abstraction layer.
//!
//! Normalizes mouse and wheel events from the SVG canvas into a single
//! `InputEvent` enum consumed by the editor session. Coordinates are
//! client (screen) pixels.

/// A normalized input event from the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the canvas. Ends a drag like `PointerUp`.
    PointerLeave,

    /// Wheel scroll; only the vertical delta drives zoom.
    Wheel { delta_y: f64 },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }
}
