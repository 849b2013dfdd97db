use super::*;

impl OccupancyMap {
    // === Dimensions ===
    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn size(&self) -> usize { self.cells.len() }

    // === Index conversion ===
    #[inline]
    pub(super) fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "index: out of bounds ({}, {}) for {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    // === Bounds checking ===
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < self.width as i64 && y >= 0 && (y as i64) < self.height as i64
    }

    /// `rect` lies within the world, edges included. Works for empty rects too.
    pub fn encloses(&self, rect: &Rect) -> bool {
        rect.left >= 0
            && rect.top >= 0
            && rect.right() as i64 <= self.width as i64
            && rect.bottom() as i64 <= self.height as i64
    }

    /// In-bounds part of `rect` as `(x0, y0, x1, y1)`, ends exclusive.
    pub(super) fn clip(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.left.max(0) as i64;
        let y0 = rect.top.max(0) as i64;
        let x1 = (rect.right() as i64).min(self.width as i64);
        let y1 = (rect.bottom() as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}
