use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    palette::Color,
    shape::{BoundingBox, ShapeKind, ShapeMatrix},
};

/// Number of cells every piece occupies.
pub const PIECE_CELLS: usize = 4;

/// A falling piece: a shape matrix, its color and its board position.
///
/// The piece owns a copy of its catalog matrix, so [`Piece::rotate_clockwise`]
/// mutates only this instance. Movement methods return translated copies and
/// never check legality; [`Board::is_colliding`](super::board::Board::is_colliding)
/// decides that.
///
/// # Coordinate System
///
/// - `position` is the board cell of the matrix's top-left corner
/// - X increases rightward (columns), Y increases downward (rows)
/// - `position.x` may be negative when the matrix has empty leading columns
///
/// # Example
///
/// ```
/// use blockfall_engine::{Color, Piece, ShapeKind};
///
/// let mut piece = Piece::new(ShapeKind::I, Color::Scarlet);
/// assert_eq!((piece.bounds().width, piece.bounds().height), (1, 4));
///
/// piece.rotate_clockwise();
/// assert_eq!((piece.bounds().width, piece.bounds().height), (4, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    matrix: ShapeMatrix,
    bounds: BoundingBox,
    color: Color,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece at the board origin in its catalog orientation.
    #[must_use]
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        let def = kind.definition();
        Self {
            kind,
            matrix: def.matrix,
            bounds: def.bounds,
            color,
            position: PiecePosition::default(),
        }
    }

    /// Returns the piece moved to its spawn position on a board `cols` wide.
    ///
    /// The occupied region starts at column `cols / 2` on the top row.
    #[must_use]
    pub fn spawned(self, cols: usize) -> Self {
        let x = to_coord(cols / 2) - to_coord(self.bounds.x_offset);
        Self {
            position: PiecePosition::new(x, 0),
            ..self
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn with_position(self, position: PiecePosition) -> Self {
        Self { position, ..self }
    }

    /// Returns the board coordinates of the occupied cells.
    #[must_use]
    pub fn occupied_positions(&self) -> ArrayVec<(i32, i32), PIECE_CELLS> {
        self.matrix
            .occupied_cells()
            .map(|(dx, dy)| {
                (
                    self.position.x + to_coord(dx),
                    self.position.y + to_coord(dy),
                )
            })
            .collect()
    }

    /// Board column of the leftmost occupied cell.
    #[must_use]
    pub fn left_edge(&self) -> i32 {
        self.position.x + to_coord(self.bounds.x_offset)
    }

    /// Board column just past the rightmost occupied cell.
    #[must_use]
    pub fn right_edge(&self) -> i32 {
        self.left_edge() + to_coord(self.bounds.width)
    }

    /// Board row just past the lowest occupied cell.
    #[must_use]
    pub fn bottom_edge(&self) -> i32 {
        self.position.y + to_coord(self.bounds.y_offset + self.bounds.height)
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.translated(0, 1)
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: PiecePosition::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    /// Turns the piece 90° clockwise in place.
    ///
    /// The bounding box is recomputed from the rotated matrix, which swaps its
    /// width and height. No collision check is made.
    pub fn rotate_clockwise(&mut self) {
        self.matrix = self.matrix.rotated_clockwise();
        let bounds = BoundingBox::of(&self.matrix);
        debug_assert_eq!(
            (bounds.width, bounds.height),
            (self.bounds.height, self.bounds.width)
        );
        self.bounds = bounds;
    }

    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let mut piece = *self;
        piece.rotate_clockwise();
        piece
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn to_coord(n: usize) -> i32 {
    n as i32
}

/// Board position of a piece's matrix origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    pub x: i32,
    pub y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
