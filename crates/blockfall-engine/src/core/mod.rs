//! Core data structures: shapes, pieces, the board and its render view.
//!
//! Everything here is plain data with no timing or randomness. The
//! [`engine`](crate::engine) module builds the game rules on top of it.

pub use self::{board::*, palette::*, piece::*, render_board::*, shape::*};

pub(crate) mod board;
pub(crate) mod palette;
pub(crate) mod piece;
pub(crate) mod render_board;
pub(crate) mod shape;
