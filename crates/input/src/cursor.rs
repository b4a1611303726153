//! Keyboard-driven tile selection.

/// Position on the grid, wrapping at the edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    rows: u8,
    cols: u8,
    row: u8,
    col: u8,
}

impl GridCursor {
    pub fn new(rows: u8, cols: u8) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            row: 0,
            col: 0,
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Flat row-major index of the selected tile
    pub fn index(&self) -> u16 {
        self.row as u16 * self.cols as u16 + self.col as u16
    }

    /// Jump to a flat index; out-of-range indices are ignored
    pub fn select(&mut self, index: u16) {
        let (row, col) = (index / self.cols as u16, index % self.cols as u16);
        if row < self.rows as u16 {
            self.row = row as u8;
            self.col = col as u8;
        }
    }

    /// Move by (d_row, d_col), wrapping around the edges
    pub fn step(&mut self, d_row: i8, d_col: i8) {
        self.row = (self.row as i16 + d_row as i16).rem_euclid(self.rows as i16) as u8;
        self.col = (self.col as i16 + d_col as i16).rem_euclid(self.cols as i16) as u8;
    }

    /// Adopt new grid dimensions, clamping the selection
    pub fn resize(&mut self, rows: u8, cols: u8) {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self.row = self.row.min(self.rows - 1);
        self.col = self.col.min(self.cols - 1);
    }
}
