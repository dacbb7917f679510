// src/interaction.rs

use crate::geometry::Point2;

/// Negated, centered, normalized pointer position. Moving the pointer right
/// shifts the pattern left. `None` for a zero-sized viewport.
///
/// Positions outside the window (drags, touch overscroll) are clamped to the
/// nearest edge, so each component stays in [-0.5, 0.5].
pub fn translation_from_pointer(x: f64, y: f64, width: f64, height: f64) -> Option<Point2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let u = (x / width).clamp(0.0, 1.0);
    let v = (y / height).clamp(0.0, 1.0);
    Some(Point2::new(-(u - 0.5), -(v - 0.5)))
}

/// Pointer-derived translation carried between events.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    translate: Point2,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&self) -> Point2 {
        self.translate
    }

    /// Updates from a pointer event and returns the translation to render.
    /// A zero-sized viewport keeps the previous translation.
    pub fn pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64) -> Point2 {
        if let Some(translate) = translation_from_pointer(x, y, width, height) {
            self.translate = translate;
        }
        self.translate
    }
}
