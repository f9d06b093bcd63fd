//! Axis-aligned rectangles expressed in world units.

use glam::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// World space grows to the right along `x` and downwards along `y`, so the
/// bottom edge of a rectangle sits at `y + h`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Horizontal position of the left edge.
    pub x: f32,
    /// Vertical position of the top edge.
    pub y: f32,
    /// Width of the rectangle. Never negative.
    pub w: f32,
    /// Height of the rectangle. Never negative.
    pub h: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Horizontal position of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Vertical position of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Top-left corner of the rectangle.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Centre point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Returns a copy moved by the provided offset.
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }

    /// Reports whether the two rectangles share interior area.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }

    /// Reports whether `other` lies entirely inside this rectangle, edges included.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Strict overlap test between two rectangles.
///
/// Rectangles that only share an edge do not overlap, which is what lets a
/// player rest exactly on top of a tile without re-triggering a collision.
#[must_use]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
