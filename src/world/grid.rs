//! Occupancy grid
//!
//! The N×N lattice rooms are placed on. Each cell records the index of the
//! room that owns it, so occupancy and ownership can never disagree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A rectangle of grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl GridRect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    /// Lattice coordinate of the west edge
    #[inline]
    pub fn left(&self) -> usize {
        self.x
    }

    /// Lattice coordinate of the east edge
    #[inline]
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Lattice coordinate of the south edge
    #[inline]
    pub fn bottom(&self) -> usize {
        self.y
    }

    /// Lattice coordinate of the north edge
    #[inline]
    pub fn top(&self) -> usize {
        self.y + self.height
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The four lattice points at the rectangle's corners
    pub fn corners(&self) -> [(usize, usize); 4] {
        [
            (self.left(), self.bottom()),
            (self.right(), self.bottom()),
            (self.left(), self.top()),
            (self.right(), self.top()),
        ]
    }

    /// All cells covered by the rectangle, row by row
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.bottom()..self.top())
            .flat_map(move |y| (self.left()..self.right()).map(move |x| (x, y)))
    }

    pub fn overlaps(&self, other: &GridRect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.bottom() < other.top()
            && other.bottom() < self.top()
    }
}

/// Square occupancy grid
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<usize>>,
}

impl Grid {
    /// Create an empty grid of `size × size` cells
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn xy_to_idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    /// Check if signed coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// Owning room of a cell; `None` for empty or out-of-grid cells
    pub fn room_at(&self, x: i64, y: i64) -> Option<usize> {
        if self.in_bounds(x, y) {
            self.cells[self.xy_to_idx(x as usize, y as usize)]
        } else {
            None
        }
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.room_at(x as i64, y as i64).is_some()
    }

    /// True when the rectangle fits inside the grid and touches no occupied cell
    pub fn is_area_free(&self, rect: &GridRect) -> bool {
        if rect.width == 0 || rect.height == 0 {
            return false;
        }
        if rect.right() > self.size || rect.top() > self.size {
            return false;
        }
        rect.cells().all(|(x, y)| !self.is_occupied(x, y))
    }

    /// Mark every cell of `rect` as owned by `room`.
    ///
    /// Callers must check [`Grid::is_area_free`] first.
    pub fn occupy(&mut self, rect: &GridRect, room: usize) {
        debug_assert!(self.is_area_free(rect), "occupy called on a taken area");
        for (x, y) in rect.cells() {
            let idx = self.xy_to_idx(x, y);
            self.cells[idx] = Some(room);
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate occupied cells as `(x, y, room)`, row by row
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|room| (idx % self.size, idx / self.size, room))
        })
    }
}

impl fmt::Display for Grid {
    /// ASCII layout, north row first: `.` for empty, base-36 room index otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                let glyph = match self.cells[self.xy_to_idx(x, y)] {
                    Some(room) => std::char::from_digit((room % 36) as u32, 36).unwrap_or('#'),
                    None => '.',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
