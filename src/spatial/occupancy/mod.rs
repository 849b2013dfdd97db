//! OccupancyMap - which static body owns each unit cell
//!
//! One cell per world unit, row-major. Only non-animate bodies are stamped;
//! animate bodies are checked against each other by rectangle overlap instead.

use crate::core::rect::Rect;
use crate::domain::BodyId;

mod indexing;
mod probe;
mod trace;

pub use probe::Distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    OccupiedBy(BodyId),
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// What blocked a candidate rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Obstruction {
    Body(BodyId),
    /// The rectangle left the world. Nothing to report to callbacks.
    Boundary,
}

impl Obstruction {
    pub fn body(&self) -> Option<BodyId> {
        match *self {
            Obstruction::Body(id) => Some(id),
            Obstruction::Boundary => None,
        }
    }
}

pub struct OccupancyMap {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl OccupancyMap {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::Empty; size],
        }
    }

    /// Cell at (x, y), `None` outside the world.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(*fast!(self.cells, [self.index(x as u32, y as u32)]))
    }

    /// Write `id` into every in-bounds cell of `rect`.
    pub fn stamp(&mut self, rect: &Rect, id: BodyId) {
        self.fill(rect, |_| Some(Cell::OccupiedBy(id)));
    }

    /// Reset the cells of `rect` that still belong to `id`.
    pub fn clear_owned(&mut self, rect: &Rect, id: BodyId) {
        self.fill(rect, |cell| (cell == Cell::OccupiedBy(id)).then_some(Cell::Empty));
    }

    /// Give every empty cell of `rect` to `owner(x, y)`, if it names one.
    pub fn fill_vacant(&mut self, rect: &Rect, mut owner: impl FnMut(i32, i32) -> Option<BodyId>) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let idx = self.index(x, y);
                if fast!(self.cells, [idx]).is_empty() {
                    if let Some(id) = owner(x as i32, y as i32) {
                        fast!(self.cells, [idx] = Cell::OccupiedBy(id));
                    }
                }
            }
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// First owned cell of `rect`, scanning column by column. A rect with no
    /// owned cells that reaches past the world edge hits `Boundary`; that
    /// includes zero-width or zero-height rects, which cover no cells.
    pub fn first_obstruction(&self, rect: &Rect) -> Option<Obstruction> {
        if let Some((x0, y0, x1, y1)) = self.clip(rect) {
            for x in x0..x1 {
                for y in y0..y1 {
                    if let Cell::OccupiedBy(id) = *fast!(self.cells, [self.index(x, y)]) {
                        return Some(Obstruction::Body(id));
                    }
                }
            }
        }
        if self.encloses(rect) {
            None
        } else {
            Some(Obstruction::Boundary)
        }
    }

    fn fill(&mut self, rect: &Rect, mut f: impl FnMut(Cell) -> Option<Cell>) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let idx = self.index(x, y);
                if let Some(next) = f(*fast!(self.cells, [idx])) {
                    fast!(self.cells, [idx] = next);
                }
            }
        }
    }
}
