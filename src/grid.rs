use std::fmt;

use crate::ColorId;
use crate::direction::Heading;

/// Square field of colors. Both axes wrap around, so the grid is a torus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cell buffer, `size * size` long
    cells: Vec<ColorId>,

    /// Edge length
    size: usize,
}

impl Grid {
    /// Create a grid of the given edge size with every cell set to color `0`.
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be at least 1");

        Self {
            cells: vec![0; size * size],
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The center cell, `(size / 2, size / 2)`.
    pub fn center(&self) -> (usize, usize) {
        (self.size / 2, self.size / 2)
    }

    pub fn get(&self, row: usize, col: usize) -> ColorId {
        self.cells[self.at(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, color: ColorId) {
        let i = self.at(row, col);
        self.cells[i] = color;
    }

    /// Rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[ColorId]> {
        self.cells.chunks_exact(self.size)
    }

    /// Largest color currently on the grid.
    pub fn max_color(&self) -> ColorId {
        self.cells.iter().copied().max().unwrap_or_default()
    }

    /// The cell one step from `(row, col)` towards `heading`, wrapping past the edges.
    ///
    /// Each axis wraps on its own: `-1` becomes `size - 1` and `size` becomes `0`.
    pub fn neighbor(&self, row: usize, col: usize, heading: Heading) -> (usize, usize) {
        let (dr, dc) = heading.offset();

        (self.wrap(row, dr), self.wrap(col, dc))
    }

    fn wrap(&self, i: usize, d: isize) -> usize {
        debug_assert!(i < self.size);

        match i.checked_add_signed(d) {
            None => self.size - 1,
            Some(j) if j == self.size => 0,
            Some(j) => j,
        }
    }

    fn at(&self, row: usize, col: usize) -> usize {
        assert!(row < self.size, "row is out of bounds");
        assert!(col < self.size, "col is out of bounds");

        row * self.size + col
    }
}

/// One line per row, one character per cell. Colors past `9` are written as letters.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for &c in row {
                let ch = char::from_digit(c as u32, 36).unwrap_or('?');
                write!(f, "{ch}")?;
            }
        }

        Ok(())
    }
}
