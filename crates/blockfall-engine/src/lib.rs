pub use self::{config::*, core::*, engine::*, leaderboard::*};

pub mod config;
pub mod core;
pub mod engine;
pub mod leaderboard;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("new piece collides with the board at its spawn position")]
pub struct SpawnCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("cannot {action} in the {state} state")]
pub struct StateTransitionError {
    action: &'static str,
    state: SessionState,
}

impl StateTransitionError {
    pub(crate) fn new(action: &'static str, state: SessionState) -> Self {
        Self { action, state }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("tick interval must be a positive number of milliseconds")]
pub struct InvalidIntervalError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum InvalidConfigError {
    #[display("board must be at least {min_cols}x{min_rows} cells, got {cols}x{rows}")]
    BoardTooSmall {
        rows: usize,
        cols: usize,
        min_rows: usize,
        min_cols: usize,
    },
    #[display("board must be at most {max} cells wide and tall, got {cols}x{rows}")]
    BoardTooLarge { rows: usize, cols: usize, max: usize },
    #[display("{name} must be a positive number of milliseconds")]
    ZeroInterval { name: &'static str },
}
