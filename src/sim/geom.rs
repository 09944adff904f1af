//! Grid geometry for axis-aligned actors and tiles
//!
//! Every actor and tile occupies one 20x20 cell. Positions are the top-left
//! corner of that square, in pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRID;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// The one-cell footprint at `pos`
    #[inline]
    pub fn cell(pos: Vec2) -> Self {
        Self::new(pos, Vec2::splat(GRID))
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

/// Snap a coordinate onto the nearest grid line if it is within the turning
/// window for `speed`, otherwise return it unchanged.
pub fn snap_to_grid(coord: f32, speed: f32) -> f32 {
    let window = speed / 1.5;
    let line = (coord.round() / GRID).floor() * GRID;
    let dist = coord - line;
    if dist >= GRID - window {
        line + GRID
    } else if dist <= window {
        line
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::cell(Vec2::new(0.0, 0.0));
        let touching = Rect::cell(Vec2::new(20.0, 0.0));
        let inside = Rect::cell(Vec2::new(19.5, 5.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_snap_forward_and_back() {
        // speed 3 gives a window of 2 pixels
        assert_eq!(snap_to_grid(218.5, 3.0), 220.0);
        assert_eq!(snap_to_grid(201.5, 3.0), 200.0);
        assert_eq!(snap_to_grid(210.0, 3.0), 210.0);
        assert_eq!(snap_to_grid(199.6, 3.0), 200.0);
    }
}
