use std::fmt::Write;

use super::OccupancyMap;

impl OccupancyMap {
    /// Text dump for fixtures and debugging: one line per row, `X` occupied, `O` empty.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 8) * self.height as usize);
        for y in 0..self.height as i32 {
            let _ = write!(out, "{}: ", y);
            for x in 0..self.width as i32 {
                let empty = self.get(x, y).map_or(true, |c| c.is_empty());
                out.push(if empty { 'O' } else { 'X' });
            }
            out.push('\n');
        }
        out
    }
}
