use std::fmt::{self, Write as _};

use super::{palette::Color, piece::Piece};

/// The persistent occupancy grid.
///
/// Each cell is `0` (empty) or the 1-based palette index of the piece that
/// locked there. Only locked pieces live in the board; the falling piece is
/// tracked separately and composited for rendering by
/// [`RenderBoard`](super::render_board::RenderBoard).
///
/// Dimensions are fixed at construction.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Color, Piece, ShapeKind};
///
/// let mut board = Board::new(20, 10);
/// let piece = Piece::new(ShapeKind::T, Color::Scarlet).spawned(board.cols());
/// assert!(!board.is_colliding(&piece));
///
/// board.fill_piece(&piece);
/// assert_eq!(board.filled_count(), 4);
/// assert!(board.is_colliding(&piece));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Board {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Builds a board from raw cell values, one string per row.
    ///
    /// `.` is an empty cell and `1`-`5` a palette index. Mostly useful for
    /// setting up positions in tests.
    ///
    /// # Panics
    ///
    /// Panics if rows have different lengths or contain other characters.
    #[must_use]
    pub fn from_rows(rows: &[&str]) -> Self {
        let cols = rows.first().map_or(0, |row| row.len());
        let mut board = Self::new(rows.len(), cols);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "row {y} has a different width");
            for (x, ch) in row.chars().enumerate() {
                let value = match ch {
                    '.' => 0,
                    '1'..='5' => ch as u8 - b'0',
                    _ => panic!("invalid cell {ch:?} at ({x}, {y})"),
                };
                board.cells[y * cols + x] = value;
            }
        }
        board
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|x| *x < self.cols)?;
        let y = usize::try_from(y).ok().filter(|y| *y < self.rows)?;
        Some(y * self.cols + x)
    }

    /// Returns the raw cell value, or `None` outside the grid.
    #[must_use]
    pub fn raw_cell(&self, x: i32, y: i32) -> Option<u8> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// Returns the color locked at `(x, y)`, or `None` for empty or
    /// out-of-grid cells.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Color> {
        self.raw_cell(x, y).and_then(Color::from_index)
    }

    /// Writes `color` (or clears the cell for `None`).
    ///
    /// Out-of-grid coordinates are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, color: Option<Color>) {
        if let Some(i) = self.index_of(x, y) {
            self.cells[i] = color.map_or(0, |c| c.index().get());
        }
    }

    /// Returns whether `(x, y)` is outside the grid or already filled.
    #[must_use]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.raw_cell(x, y).is_none_or(|cell| cell != 0)
    }

    /// Returns whether any occupied cell of `piece` leaves the grid or
    /// overlaps a filled cell.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece
            .occupied_positions()
            .into_iter()
            .any(|(x, y)| self.is_blocked(x, y))
    }

    /// Writes the piece's cells into the grid with its color index.
    ///
    /// This is called when a piece locks. Cells outside the grid are dropped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_positions() {
            debug_assert!(self.index_of(x, y).is_some(), "locking outside the grid");
            self.set_cell(x, y, Some(piece.color()));
        }
    }

    /// Returns an iterator over rows of raw cell values, top to bottom.
    pub fn row_cells(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.cols.max(1))
    }

    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.cells[y * self.cols..][..self.cols]
            .iter()
            .all(|&cell| cell != 0)
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Removes complete rows and returns how many were cleared.
    ///
    /// Rows are scanned top to bottom. Each complete row is zeroed and every
    /// row above it shifts down by one, leaving row 0 empty. Rows shifted into
    /// the scanned region were already checked, so several complete rows are
    /// all removed in one pass.
    pub fn clear_lines(&mut self) -> usize {
        let cols = self.cols;
        let mut count = 0;
        for y in 0..self.rows {
            if !self.is_row_complete(y) {
                continue;
            }
            self.cells.copy_within(..y * cols, cols);
            self.cells[..cols].fill(0);
            count += 1;
        }
        count
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_cells() {
            for &cell in row {
                if cell == 0 {
                    f.write_char('.')?;
                } else {
                    write!(f, "{cell}")?;
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
