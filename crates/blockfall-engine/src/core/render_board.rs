use super::{board::Board, palette::Color, piece::Piece};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    Ghost(Color),
    Filled(Color),
}

impl RenderCell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == RenderCell::Empty
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            RenderCell::Empty => None,
            RenderCell::Ghost(color) | RenderCell::Filled(color) => Some(color),
        }
    }
}

/// A snapshot of the board for drawing: locked cells plus whatever pieces
/// have been composited on top.
///
/// Unlike [`Board`], this grid is never used for collision checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBoard {
    cols: usize,
    cells: Vec<RenderCell>,
}

impl RenderBoard {
    #[must_use]
    pub fn new(board: &Board) -> Self {
        let cells = board
            .row_cells()
            .flatten()
            .map(|&cell| Color::from_index(cell).map_or(RenderCell::Empty, RenderCell::Filled))
            .collect();
        Self {
            cols: board.cols(),
            cells,
        }
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len() / self.cols.max(1)
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> RenderCell {
        if x >= self.cols {
            return RenderCell::Empty;
        }
        self.cells
            .get(y * self.cols + x)
            .copied()
            .unwrap_or_default()
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[RenderCell]> {
        self.cells.chunks_exact(self.cols.max(1))
    }

    /// Draws `piece` with its own color.
    pub fn fill_piece(&mut self, piece: &Piece) {
        self.fill_piece_as(piece, RenderCell::Filled(piece.color()));
    }

    /// Draws the occupied cells of `piece` as `cell`. Cells outside the grid
    /// are skipped.
    pub fn fill_piece_as(&mut self, piece: &Piece, cell: RenderCell) {
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < self.cols
                && let Some(slot) = self.cells.get_mut(y * self.cols + x)
            {
                *slot = cell;
            }
        }
    }

    /// Returns every filled cell as `(x, y, color)` in row-major order.
    ///
    /// Ghost cells are not included.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| match cell {
            RenderCell::Filled(color) => Some((i % self.cols, i / self.cols, *color)),
            RenderCell::Empty | RenderCell::Ghost(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{piece::PiecePosition, shape::ShapeKind};

    use super::*;

    #[test]
    fn test_new_copies_locked_cells() {
        let board = Board::from_rows(&["..3", "1.."]);
        let render = RenderBoard::new(&board);
        assert_eq!((render.rows(), render.cols()), (2, 3));
        assert_eq!(render.cell(2, 0), RenderCell::Filled(Color::CyberYellow));
        assert_eq!(render.cell(0, 1), RenderCell::Filled(Color::DenimBlue));
        assert!(render.cell(1, 1).is_empty());
        assert!(render.cell(7, 0).is_empty());
    }

    #[test]
    fn test_filled_cells_are_row_major() {
        let board = Board::from_rows(&["..3", "1.2"]);
        let render = RenderBoard::new(&board);
        assert_eq!(
            render.filled_cells().collect::<Vec<_>>(),
            vec![
                (2, 0, Color::CyberYellow),
                (0, 1, Color::DenimBlue),
                (2, 1, Color::LimeGreen),
            ]
        );
    }

    #[test]
    fn test_fill_piece_composites_without_touching_board() {
        let board = Board::new(4, 5);
        let piece =
            Piece::new(ShapeKind::Square, Color::Scarlet).with_position(PiecePosition::new(0, 0));
        let mut render = RenderBoard::new(&board);
        render.fill_piece(&piece);

        assert_eq!(board.filled_count(), 0);
        assert_eq!(
            render.filled_cells().collect::<Vec<_>>(),
            vec![
                (1, 1, Color::Scarlet),
                (2, 1, Color::Scarlet),
                (1, 2, Color::Scarlet),
                (2, 2, Color::Scarlet),
            ]
        );
    }

    #[test]
    fn test_ghost_cells_are_not_filled() {
        let board = Board::new(4, 5);
        let piece =
            Piece::new(ShapeKind::I, Color::LimeGreen).with_position(PiecePosition::new(2, 0));
        let mut render = RenderBoard::new(&board);
        render.fill_piece_as(&piece, RenderCell::Ghost(piece.color()));

        assert_eq!(render.filled_cells().count(), 0);
        assert_eq!(render.cell(2, 3), RenderCell::Ghost(Color::LimeGreen));
        assert_eq!(render.cell(2, 3).color(), Some(Color::LimeGreen));
    }

    #[test]
    fn test_fill_piece_skips_cells_outside_grid() {
        let board = Board::new(2, 2);
        let piece =
            Piece::new(ShapeKind::I, Color::DenimBlue).with_position(PiecePosition::new(-1, 0));
        let mut render = RenderBoard::new(&board);
        render.fill_piece(&piece);
        assert_eq!(render.filled_cells().count(), 0);
    }
}
