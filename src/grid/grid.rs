//! The fixed-width, downward-growing cell grid.

use super::cell::{Attributes, Cell};

/// Default canvas width for BBS art.
pub const DEFAULT_WIDTH: usize = 80;

/// A two-dimensional array of cells.
///
/// Width is fixed at construction. Height starts at one row and only ever
/// grows, by exactly the rows needed to address a new row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl Grid {
    /// Create a grid with a single blank row. A width of 0 is coerced to 1.
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        Self {
            width,
            rows: vec![vec![Cell::default(); width]],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Grow the grid so that `row` is addressable.
    pub fn ensure_row(&mut self, row: usize) {
        while self.rows.len() <= row {
            self.rows.push(vec![Cell::default(); self.width]);
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Mutable access to one cell, for editors working on a decoded grid.
    pub fn get_mut(&mut self, column: usize, row: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.get_mut(column))
    }

    /// Write a cell, growing the height if needed. Columns outside the width
    /// are ignored.
    pub fn set(&mut self, column: usize, row: usize, cell: Cell) {
        if column >= self.width {
            return;
        }
        self.ensure_row(row);
        self.rows[row][column] = cell;
    }

    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Iterate over every cell as `(column, row, cell)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, cell)| (x, y, cell))
        })
    }

    /// Reset every existing cell to the default; the height is kept.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::default());
        }
    }

    /// Reset columns `start..end` of an existing row to the default.
    pub fn clear_row_range(&mut self, row: usize, start: usize, end: usize) {
        let end = end.min(self.width);
        if let Some(cells) = self.rows.get_mut(row) {
            if start < end {
                cells[start..end].fill(Cell::default());
            }
        }
    }

    /// True when no cell differs from the default.
    pub fn is_blank(&self) -> bool {
        self.cells().all(|(_, _, cell)| *cell == Cell::default())
    }

    /// Write `text` left to right from (`column`, `row`). Glyphs past the
    /// right edge are dropped rather than wrapped.
    pub fn put_text(&mut self, column: usize, row: usize, text: &str, attrs: Attributes) {
        for (x, glyph) in (column..self.width).zip(text.chars()) {
            self.set(x, row, Cell::new(glyph, attrs));
        }
    }

    /// Fill a `width` x `height` rectangle with copies of `cell`, clipped at
    /// the right edge and growing downward as needed.
    pub fn fill_rect(&mut self, column: usize, row: usize, width: usize, height: usize, cell: Cell) {
        if width == 0 || height == 0 {
            return;
        }
        let end = column.saturating_add(width).min(self.width);
        for y in row..row.saturating_add(height) {
            self.ensure_row(y);
            if column < end {
                self.rows[y][column..end].fill(cell);
            }
        }
    }

    /// Copy of the grid without leading and trailing default rows. The width
    /// is kept; an entirely blank grid trims to a single row.
    pub fn trim(&self) -> Grid {
        let is_content = |row: &Vec<Cell>| row.iter().any(|cell| *cell != Cell::default());
        let first = self.rows.iter().position(is_content);
        let last = self.rows.iter().rposition(is_content);
        match (first, last) {
            (Some(first), Some(last)) => Grid {
                width: self.width,
                rows: self.rows[first..=last].to_vec(),
            },
            _ => Grid::new(self.width),
        }
    }
}
