//! Integer rectangles in world cells.
//!
//! `left`/`top` are the first covered column/row, `right()`/`bottom()` are exclusive.
//! Arithmetic saturates at the `i32` range; anything that far out is off the map anyway.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Same size and row, moved to column `left`.
    #[inline]
    pub fn with_left(&self, left: i32) -> Self {
        Self { left, ..*self }
    }

    /// Same size and column, moved to row `top`.
    #[inline]
    pub fn with_top(&self, top: i32) -> Self {
        Self { top, ..*self }
    }

    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            ..*self
        }
    }

    /// Open-interval overlap: rectangles that only share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
