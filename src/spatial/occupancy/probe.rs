//! Distance-to-collision probing.
//!
//! Walks one cell at a time outward from the current leading edge, checking
//! the whole edge span, until a blocked row/column or the world border.
//! Axes are probed independently from the pre-move rectangle.

use crate::core::rect::Rect;
use crate::domain::Velocity;

use super::OccupancyMap;

/// Signed free distance along each axis, in the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Distance {
    pub left: i32,
    pub top: i32,
}

impl OccupancyMap {
    pub fn distance_to_collision(&self, from: &Rect, velocity: Velocity) -> Distance {
        Distance {
            left: self.probe_horizontal(from, velocity.left),
            top: self.probe_vertical(from, velocity.top),
        }
    }

    fn probe_vertical(&self, from: &Rect, dy: i32) -> i32 {
        let mut distance = 0;
        if dy > 0 {
            let mut y = from.bottom();
            while y < self.height as i32 && self.row_clear(from, y) {
                distance += 1;
                y += 1;
            }
        } else if dy < 0 {
            let mut y = from.top.saturating_sub(1);
            while y >= 0 && self.row_clear(from, y) {
                distance -= 1;
                y -= 1;
            }
        }
        distance
    }

    fn probe_horizontal(&self, from: &Rect, dx: i32) -> i32 {
        let mut distance = 0;
        if dx > 0 {
            let mut x = from.right();
            while x < self.width as i32 && self.column_clear(from, x) {
                distance += 1;
                x += 1;
            }
        } else if dx < 0 {
            let mut x = from.left.saturating_sub(1);
            while x >= 0 && self.column_clear(from, x) {
                distance -= 1;
                x -= 1;
            }
        }
        distance
    }

    /// Row `y` is empty across the horizontal span of `from`.
    fn row_clear(&self, from: &Rect, y: i32) -> bool {
        (from.left..from.right())
            .filter(|&x| self.in_bounds(x, y))
            .all(|x| self.get(x, y).map_or(true, |c| c.is_empty()))
    }

    /// Column `x` is empty across the vertical span of `from`.
    fn column_clear(&self, from: &Rect, x: i32) -> bool {
        (from.top..from.bottom())
            .filter(|&y| self.in_bounds(x, y))
            .all(|y| self.get(x, y).map_or(true, |c| c.is_empty()))
    }
}
