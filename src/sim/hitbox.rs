//! Axis-aligned box geometry for sprites and their hitboxes
//!
//! Screen coordinates: x grows right, y grows down. A box is described by
//! its four edges rather than origin + size so overlap tests read directly.

use glam::Vec2;

use crate::tuning::Insets;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Box of a square sprite whose top-left corner is at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            left: pos.x,
            top: pos.y,
            right: pos.x + size,
            bottom: pos.y + size,
        }
    }

    /// Shrink each side by the matching inset
    pub fn inset(&self, insets: &Insets) -> Self {
        Self {
            left: self.left + insets.left,
            top: self.top + insets.top,
            right: self.right - insets.right,
            bottom: self.bottom - insets.bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strict overlap on both axes (touching edges do not intersect)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// Length of the shared span on each axis, clamped to zero
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        let x = self.right.min(other.right) - self.left.max(other.left);
        let y = self.bottom.min(other.bottom) - self.top.max(other.top);
        Vec2::new(x.max(0.0), y.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_and_inset() {
        let rect = Rect::square(Vec2::new(80.0, 300.0), 100.0);
        assert_eq!(rect.right, 180.0);
        assert_eq!(rect.bottom, 400.0);

        let hitbox = rect.inset(&Insets {
            left: 30.0,
            right: 30.0,
            top: 15.0,
            bottom: 30.0,
        });
        assert_eq!(hitbox.left, 110.0);
        assert_eq!(hitbox.right, 150.0);
        assert_eq!(hitbox.top, 315.0);
        assert_eq!(hitbox.bottom, 370.0);
        assert_eq!(hitbox.width(), 40.0);
        assert_eq!(hitbox.height(), 55.0);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::square(Vec2::ZERO, 10.0);
        let b = Rect::square(Vec2::new(10.0, 0.0), 10.0);
        assert!(!a.intersects(&b));
        assert_eq!(a.overlap(&b).x, 0.0);
    }

    #[test]
    fn test_overlap_is_intersection_length() {
        let a = Rect::square(Vec2::ZERO, 20.0);
        let b = Rect::square(Vec2::new(15.0, 5.0), 20.0);
        assert!(a.intersects(&b));
        let overlap = a.overlap(&b);
        assert_eq!(overlap, Vec2::new(5.0, 15.0));

        // Containment: overlap is the inner box, not the outer extent
        let inner = Rect::square(Vec2::new(5.0, 5.0), 4.0);
        assert_eq!(a.overlap(&inner), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_disjoint_overlap_clamps_to_zero() {
        let a = Rect::square(Vec2::ZERO, 10.0);
        let b = Rect::square(Vec2::new(50.0, 50.0), 10.0);
        assert_eq!(a.overlap(&b), Vec2::ZERO);
    }
}
