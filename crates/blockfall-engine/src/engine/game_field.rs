use log::debug;

use crate::{
    PieceCollisionError, SpawnCollisionError,
    core::{board::Board, piece::Piece},
};

use super::piece_generator::PieceGenerator;

/// The board, the falling piece and the next piece of one game.
///
/// Every move goes through [`Self::set_falling_piece`], which rejects a
/// candidate that leaves the grid or overlaps locked cells. A rejected move
/// leaves the falling piece unchanged.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    next_piece: Piece,
    generator: PieceGenerator,
}

impl GameField {
    /// Creates an empty `rows × cols` field and draws the first two pieces.
    ///
    /// The falling piece is placed at its spawn position without a collision
    /// check; on an empty board of at least the minimum size it always fits.
    #[must_use]
    pub fn new(rows: usize, cols: usize, mut generator: PieceGenerator) -> Self {
        let falling_piece = generator.next_piece().spawned(cols);
        let next_piece = generator.next_piece();
        Self {
            board: Board::new(rows, cols),
            falling_piece,
            next_piece,
            generator,
        }
    }

    /// Clears the board and draws two fresh pieces, continuing the same
    /// random sequence.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.rows(), self.board.cols());
        self.falling_piece = self.generator.next_piece().spawned(self.board.cols());
        self.next_piece = self.generator.next_piece();
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    /// Returns the piece that spawns after the current one locks.
    ///
    /// It sits at the origin until it is promoted.
    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        &self.next_piece
    }

    #[must_use]
    pub fn generator(&self) -> &PieceGenerator {
        &self.generator
    }

    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(&piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.left())
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.right())
    }

    pub fn try_move_down(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.down())
    }

    /// Rotates the falling piece clockwise if the rotated piece fits where
    /// it is. There are no wall kicks.
    pub fn try_rotate_clockwise(&mut self) -> Result<(), PieceCollisionError> {
        self.set_falling_piece(self.falling_piece.rotated_clockwise())
    }

    /// Returns the falling piece moved down as far as it can go.
    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        let mut dropped = self.falling_piece;
        loop {
            let candidate = dropped.down();
            if self.board.is_colliding(&candidate) {
                return dropped;
            }
            dropped = candidate;
        }
    }

    /// Locks the falling piece, clears complete lines and spawns the next
    /// piece.
    ///
    /// Returns the number of cleared lines and whether the new piece fits.
    /// On a spawn collision the new piece becomes the falling piece but is
    /// not written into the board.
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), SpawnCollisionError>) {
        self.board.fill_piece(&self.falling_piece);
        let cleared_lines = self.board.clear_lines();
        debug!(
            "locked {} at ({}, {}), cleared {cleared_lines} lines",
            self.falling_piece.kind().as_char(),
            self.falling_piece.position().x,
            self.falling_piece.position().y,
        );

        let next_piece = std::mem::replace(&mut self.next_piece, self.generator.next_piece());
        self.falling_piece = next_piece.spawned(self.board.cols());
        if self.board.is_colliding(&self.falling_piece) {
            debug!("spawn blocked for {}", self.falling_piece.kind().as_char());
            return (cleared_lines, Err(SpawnCollisionError));
        }

        (cleared_lines, Ok(()))
    }
}
