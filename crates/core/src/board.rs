//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (10x20 by default) where each cell is
//! empty or holds the kind of the piece that filled it. Storage is a flat
//! row-major vector; dimensions are fixed at construction.
//!
//! Coordinates: (x, y) where x counts columns left to right and y counts rows
//! top to bottom. Pieces may hang above row 0 (negative y) while spawning.

use log::trace;

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM};

/// The game board - flat row-major storage plus per-row pending-clear marks
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
    /// Rows waiting out the line-clear animation.
    pending: Vec<bool>,
}

impl Board {
    /// Create a new empty 10x20 board
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create an empty board of the given size.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or larger than [`MAX_BOARD_DIM`].
    pub fn with_size(width: u8, height: u8) -> Self {
        assert!(
            (1..=MAX_BOARD_DIM).contains(&width) && (1..=MAX_BOARD_DIM).contains(&height),
            "board dimensions {}x{} out of range",
            width,
            height
        );
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            pending: vec![false; height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells.
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Collision test for a whole piece.
    ///
    /// Fails if any mino is left of column 0, right of the last column, or
    /// below the last row, or if it lands on a filled cell. Minos above row 0
    /// are allowed (spawn buffer) as long as their column is in range.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.blocks().iter().all(|&(x, y)| {
            if x < 0 || x >= self.width as i8 || y >= self.height as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Write the piece's kind into every cell it covers on the board.
    ///
    /// Minos above row 0 are dropped. Returns true if every mino was written.
    pub fn place(&mut self, piece: &Piece) -> bool {
        let mut all_visible = true;
        for (x, y) in piece.blocks() {
            if y < 0 {
                all_visible = false;
                continue;
            }
            let written = self.set(x, y, Some(piece.kind));
            debug_assert!(
                written,
                "placing {:?} outside the board at ({}, {})",
                piece.kind, x, y
            );
        }
        all_visible
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Indices of full rows, top to bottom, excluding rows already pending.
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| !self.pending[y] && self.is_row_full(y))
            .collect()
    }

    /// Mark rows as pending clear so they are not detected again.
    pub fn mark_pending(&mut self, rows: &[usize]) {
        for &y in rows {
            assert!(y < self.height as usize, "row {} out of range", y);
            self.pending[y] = true;
        }
    }

    pub fn is_pending(&self, y: usize) -> bool {
        self.pending.get(y).copied().unwrap_or(false)
    }

    /// Rows currently marked pending, top to bottom.
    pub fn pending_rows(&self) -> Vec<usize> {
        (0..self.height as usize).filter(|&y| self.pending[y]).collect()
    }

    /// Remove the given rows and compact everything above them downwards.
    ///
    /// Empty rows are inserted at the top, one per removed row, and the
    /// remaining rows keep their relative order. Duplicate indices count once.
    /// All pending marks are dropped. Returns the number of rows removed.
    ///
    /// # Panics
    ///
    /// Panics if a row index is outside the board.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        if rows.is_empty() {
            return 0;
        }

        let height = self.height as usize;
        let width = self.width as usize;
        let mut remove = vec![false; height];
        for &y in rows {
            assert!(y < height, "cannot clear row {} of a {}-row board", y, height);
            remove[y] = true;
        }

        // Two pointers: read scans bottom to top, write trails behind it.
        let mut write_y = height;
        for read_y in (0..height).rev() {
            if remove[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }
        self.pending.fill(false);

        trace!("cleared {} rows", write_y);
        write_y
    }

    /// True if any cell in row 0 is filled.
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(0).iter().any(|cell| cell.is_some())
    }

    /// How many rows the piece can fall before it would collide.
    ///
    /// `None` if the piece is not in a valid position to begin with.
    pub fn drop_distance(&self, piece: &Piece) -> Option<i8> {
        if !self.is_valid_position(piece) {
            return None;
        }
        let mut distance = 0;
        while self.is_valid_position(&piece.moved(0, distance + 1)) {
            distance += 1;
        }
        Some(distance)
    }

    /// Where the piece would come to rest if hard-dropped now.
    pub fn ghost(&self, piece: &Piece) -> Option<Piece> {
        self.drop_distance(piece).map(|d| piece.moved(0, d))
    }

    /// Height of a column: rows from the bottom up to its topmost filled cell.
    pub fn column_height(&self, x: usize) -> u8 {
        if x >= self.width as usize {
            return 0;
        }
        (0..self.height as usize)
            .find(|&y| self.cells[y * self.width as usize + x].is_some())
            .map_or(0, |top| self.height - top as u8)
    }

    pub fn column_heights(&self) -> Vec<u8> {
        (0..self.width as usize).map(|x| self.column_height(x)).collect()
    }

    /// Empty cells with at least one filled cell above them in the same column.
    pub fn holes(&self) -> u32 {
        let width = self.width as usize;
        let mut holes = 0;
        for x in 0..width {
            let mut covered = false;
            for y in 0..self.height as usize {
                match self.cells[y * width + x] {
                    Some(_) => covered = true,
                    None if covered => holes += 1,
                    None => {}
                }
            }
        }
        holes
    }

    /// Sum of absolute height differences between adjacent columns.
    pub fn bumpiness(&self) -> u32 {
        (1..self.width as usize)
            .map(|x| self.column_height(x - 1).abs_diff(self.column_height(x)) as u32)
            .sum()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.pending.fill(false);
    }

    /// Fill a whole row with one kind (scripted setups and tests).
    pub fn fill_row(&mut self, y: usize, cell: Cell) {
        let width = self.width as usize;
        assert!(y < self.height as usize, "row {} out of range", y);
        self.cells[y * width..(y + 1) * width].fill(cell);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
