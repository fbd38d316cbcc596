//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events into a unified `InputEvent`
//! enum consumed by the board.

/// A normalized pointer event in canvas-local coordinates.
///
/// Coordinates are not clamped to the canvas; the surface clips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved (mouse move, touch move, pen move).
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp,
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up() -> Self {
        Self::PointerUp
    }
}
