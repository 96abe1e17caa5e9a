//! Axis-aligned bounding boxes and overlap tests

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of an entity whose position is its center
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(
            center.x - size.x / 2.0,
            center.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Overlap test. Touching edges count as overlap; empty rects never overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        !(self.right() < other.x
            || self.bottom() < other.y
            || self.x > other.right()
            || self.y > other.bottom())
    }
}

/// Check collision between two centered boxes
#[inline]
pub fn boxes_collide(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    Rect::centered(a_pos, a_size).intersects(&Rect::centered(b_pos, b_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(50.0, 50.0);

    #[test]
    fn test_centered_bounds() {
        let r = Rect::centered(Vec2::new(320.0, 480.0), SIZE);
        assert_eq!(r, Rect::new(295.0, 455.0, 50.0, 50.0));
        assert_eq!(r.right(), 345.0);
        assert_eq!(r.bottom(), 505.0);
    }

    #[test]
    fn test_overlap() {
        assert!(boxes_collide(
            Vec2::new(320.0, 480.0),
            SIZE,
            Vec2::new(320.0, 480.0),
            SIZE
        ));
        assert!(boxes_collide(
            Vec2::new(0.0, 0.0),
            SIZE,
            Vec2::new(30.0, -30.0),
            SIZE
        ));
    }

    #[test]
    fn test_touching_edges_overlap() {
        // Right edge of a == left edge of b
        assert!(boxes_collide(
            Vec2::new(0.0, 0.0),
            SIZE,
            Vec2::new(50.0, 0.0),
            SIZE
        ));
    }

    #[test]
    fn test_separated() {
        assert!(!boxes_collide(
            Vec2::new(0.0, 0.0),
            SIZE,
            Vec2::new(50.5, 0.0),
            SIZE
        ));
        assert!(!boxes_collide(
            Vec2::new(0.0, 0.0),
            SIZE,
            Vec2::new(0.0, -51.0),
            SIZE
        ));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let empty = Rect::new(10.0, 10.0, 0.0, 20.0);
        let full = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!empty.intersects(&full));
        assert!(!full.intersects(&empty));
    }
}
