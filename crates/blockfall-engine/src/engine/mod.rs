//! Game rules and state management.
//!
//! This module builds the game on top of the [`core`](crate::core) data
//! structures:
//!
//! - [`GameField`] - Board, falling piece and next piece; move legality and locking
//! - [`GameSession`] - One game from menu to game over: timer, input and state machine
//! - [`GameStats`] - Score, level and line statistics
//! - [`PieceGenerator`] - Uniform random shape and color selection
//! - [`PieceSeed`] - Seed for a reproducible piece sequence
//!
//! # Game Flow
//!
//! 1. [`GameSession::start`] clears the board and spawns the first piece
//! 2. Every [`GameSession::tick_interval`] the front end calls [`GameSession::tick`],
//!    which moves the piece down one row
//! 3. Input moves or rotates the piece; illegal moves are ignored
//! 4. When the piece cannot move down it locks, full rows are cleared and the
//!    score, line count and level are updated
//! 5. The next piece spawns; if it overlaps the board the game is over
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameField, PieceGenerator};
//!
//! let mut field = GameField::new(20, 10, PieceGenerator::new());
//!
//! field.try_move_left().ok();
//! field.try_rotate_clockwise().ok();
//! while field.try_move_down().is_ok() {}
//!
//! let (lines_cleared, result) = field.complete_piece_drop();
//! assert_eq!(lines_cleared, 0);
//! assert!(result.is_ok());
//! ```

pub use self::{game_field::*, game_session::*, game_stats::*, piece_generator::*};

mod game_field;
mod game_session;
mod game_stats;
mod piece_generator;
