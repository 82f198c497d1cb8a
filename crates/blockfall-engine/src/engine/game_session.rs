use std::time::Duration;

use log::{debug, trace};

use crate::{
    InvalidConfigError, InvalidIntervalError, StateTransitionError,
    config::{EngineConfig, TickConfig},
    core::{
        board::Board,
        piece::Piece,
        render_board::{RenderBoard, RenderCell},
    },
};

use super::{
    game_field::GameField,
    game_stats::{DropResult, GameStats},
    piece_generator::{PieceGenerator, PieceSeed},
};

/// Shortest interval [`GameSession::tick_interval`] reports.
///
/// The fall interval reaches zero at high levels; a timer still needs a
/// positive period.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum SessionState {
    #[display("main menu")]
    MainMenu,
    #[display("playing")]
    Playing,
    #[display("paused")]
    Paused,
    #[display("game over")]
    GameOver,
}

/// What one [`GameSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The session is not playing; nothing happened.
    Idle,
    /// The falling piece moved down one row.
    Fell,
    /// The falling piece locked and the next piece spawned.
    Locked(DropResult),
    /// The falling piece locked and the next piece did not fit.
    GameOver(DropResult),
}

/// One player's game from menu to game over.
///
/// The session owns every piece of mutable game state. A front end drives it
/// with two kinds of calls:
///
/// - a timer calls [`Self::tick`] every [`Self::tick_interval`], rescheduling
///   whenever that value changes and cancelling when it is `None`
/// - input handlers call [`Self::move_left`], [`Self::move_right`],
///   [`Self::rotate_clockwise`] and [`Self::soft_drop`]
///
/// Input is ignored unless the session is [`SessionState::Playing`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{EngineConfig, GameSession, SessionState};
///
/// let mut session = GameSession::new(EngineConfig::default()).unwrap();
/// assert_eq!(session.state(), SessionState::MainMenu);
/// assert!(session.tick_interval().is_none());
///
/// session.start().unwrap();
/// session.move_left();
/// session.rotate_clockwise();
/// while !session.tick().is_locked() {}
///
/// assert_eq!(session.stats().completed_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    field: GameField,
    stats: GameStats,
    state: SessionState,
    soft_drop: bool,
    play_time: Duration,
}

impl GameSession {
    /// Creates a session in the main menu with a random piece sequence.
    pub fn new(config: EngineConfig) -> Result<Self, InvalidConfigError> {
        Self::with_generator(config, PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a reproducible piece sequence.
    pub fn with_seed(config: EngineConfig, seed: PieceSeed) -> Result<Self, InvalidConfigError> {
        Self::with_generator(config, PieceGenerator::with_seed(seed))
    }

    fn with_generator(
        config: EngineConfig,
        generator: PieceGenerator,
    ) -> Result<Self, InvalidConfigError> {
        config.validate()?;
        debug!(
            "new session {}x{} with seed {}",
            config.cols,
            config.rows,
            generator.seed()
        );
        Ok(Self {
            field: GameField::new(config.rows, config.cols, generator),
            config,
            stats: GameStats::new(),
            state: SessionState::MainMenu,
            soft_drop: false,
            play_time: Duration::ZERO,
        })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.field.generator().seed()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> &Piece {
        self.field.next_piece()
    }

    #[must_use]
    pub fn simulate_drop_position(&self) -> Piece {
        self.field.simulate_drop_position()
    }

    #[must_use]
    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    /// Returns the time spent playing: the sum of the intervals of every tick
    /// that ran while [`SessionState::Playing`].
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    fn transition(&mut self, to: SessionState) {
        debug!("session state {} -> {to}", self.state);
        self.state = to;
    }

    fn reset(&mut self) {
        self.field.reset();
        self.stats = GameStats::new();
        self.soft_drop = false;
        self.play_time = Duration::ZERO;
    }

    /// Starts a game from the main menu.
    pub fn start(&mut self) -> Result<(), StateTransitionError> {
        if !self.state.is_main_menu() {
            return Err(StateTransitionError::new("start", self.state));
        }
        self.reset();
        self.transition(SessionState::Playing);
        Ok(())
    }

    /// Abandons the current game, if any, and starts a new one.
    pub fn restart(&mut self) {
        self.reset();
        self.transition(SessionState::Playing);
    }

    pub fn pause(&mut self) -> Result<(), StateTransitionError> {
        if !self.state.is_playing() {
            return Err(StateTransitionError::new("pause", self.state));
        }
        self.soft_drop = false;
        self.transition(SessionState::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), StateTransitionError> {
        if !self.state.is_paused() {
            return Err(StateTransitionError::new("resume", self.state));
        }
        self.transition(SessionState::Playing);
        Ok(())
    }

    /// Pauses a playing session or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Result<(), StateTransitionError> {
        match self.state {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.resume(),
            SessionState::MainMenu | SessionState::GameOver => {
                Err(StateTransitionError::new("toggle pause", self.state))
            }
        }
    }

    /// Ends the current game early. The score stands.
    pub fn quit(&mut self) -> Result<(), StateTransitionError> {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return Err(StateTransitionError::new("quit", self.state));
        }
        self.soft_drop = false;
        self.transition(SessionState::GameOver);
        Ok(())
    }

    pub fn return_to_menu(&mut self) -> Result<(), StateTransitionError> {
        if !self.state.is_game_over() {
            return Err(StateTransitionError::new("return to menu", self.state));
        }
        self.transition(SessionState::MainMenu);
        Ok(())
    }

    /// Returns the level fall interval, which may be zero.
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.config.fall_interval(self.stats.level())
    }

    /// Returns how long the timer should wait before the next tick, or `None`
    /// if the timer should not run.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        if !self.state.is_playing() {
            return None;
        }
        let interval = if self.soft_drop {
            self.config.soft_drop_interval()
        } else {
            self.fall_interval()
        };
        Some(interval.max(MIN_TICK_INTERVAL))
    }

    /// Sets the level-0 fall interval.
    pub fn set_interval(&mut self, tick: TickConfig) -> Result<(), InvalidIntervalError> {
        if tick.interval_ms == 0 {
            return Err(InvalidIntervalError);
        }
        self.config.base_interval_ms = tick.interval_ms;
        Ok(())
    }

    /// Advances the game by one timer tick.
    ///
    /// The falling piece moves down one row. If it cannot, it locks: complete
    /// rows are cleared, statistics are updated and the next piece spawns. A
    /// blocked spawn ends the game.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(interval) = self.tick_interval() else {
            return TickOutcome::Idle;
        };
        self.play_time += interval;
        trace!("tick after {interval:?}");

        if self.field.try_move_down().is_ok() {
            return TickOutcome::Fell;
        }

        let (cleared_lines, spawn) = self.field.complete_piece_drop();
        let result = self.stats.complete_piece_drop(cleared_lines);
        self.soft_drop = false;

        if spawn.is_err() {
            self.transition(SessionState::GameOver);
            return TickOutcome::GameOver(result);
        }
        TickOutcome::Locked(result)
    }

    /// Moves the falling piece one column left. Returns whether it moved.
    pub fn move_left(&mut self) -> bool {
        self.state.is_playing() && self.field.try_move_left().is_ok()
    }

    /// Moves the falling piece one column right. Returns whether it moved.
    pub fn move_right(&mut self) -> bool {
        self.state.is_playing() && self.field.try_move_right().is_ok()
    }

    /// Rotates the falling piece clockwise. Returns whether it turned.
    pub fn rotate_clockwise(&mut self) -> bool {
        self.state.is_playing() && self.field.try_rotate_clockwise().is_ok()
    }

    /// Holds or releases soft drop. Returns whether the setting changed,
    /// which also changes [`Self::tick_interval`].
    pub fn soft_drop(&mut self, enable: bool) -> bool {
        if !self.state.is_playing() || self.soft_drop == enable {
            return false;
        }
        self.soft_drop = enable;
        true
    }

    /// Composites the board with the falling piece and its landing preview.
    ///
    /// Outside a game (main menu, game over) only the locked cells are drawn.
    #[must_use]
    pub fn render_board(&self) -> RenderBoard {
        let mut render = RenderBoard::new(self.field.board());
        if matches!(self.state, SessionState::Playing | SessionState::Paused) {
            let piece = self.field.falling_piece();
            if self.config.show_ghost {
                let ghost = self.field.simulate_drop_position();
                render.fill_piece_as(&ghost, RenderCell::Ghost(ghost.color()));
            }
            render.fill_piece(piece);
        }
        render
    }
}

#[cfg(test)]
mod tests {
    use crate::{Color, PiecePosition, ShapeKind, engine::game_stats::score_for_lines};

    use super::*;

    fn session() -> GameSession {
        GameSession::with_seed(EngineConfig::default(), PieceSeed::from_bytes([42; 16])).unwrap()
    }

    fn playing() -> GameSession {
        let mut session = session();
        session.start().unwrap();
        session
    }

    fn drop_to_lock(session: &mut GameSession) -> TickOutcome {
        loop {
            let outcome = session.tick();
            if !outcome.is_fell() {
                return outcome;
            }
        }
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            rows: 2,
            ..EngineConfig::default()
        };
        assert!(GameSession::new(config).is_err());
    }

    #[test]
    fn test_state_machine() {
        let mut session = session();
        assert!(session.state().is_main_menu());
        assert!(session.pause().is_err());
        assert!(session.return_to_menu().is_err());

        session.start().unwrap();
        assert!(session.state().is_playing());
        assert!(session.start().is_err());

        session.pause().unwrap();
        assert!(session.state().is_paused());
        assert!(session.pause().is_err());
        session.toggle_pause().unwrap();
        assert!(session.state().is_playing());

        session.quit().unwrap();
        assert!(session.state().is_game_over());
        assert!(session.resume().is_err());

        session.return_to_menu().unwrap();
        assert!(session.state().is_main_menu());

        session.restart();
        assert!(session.state().is_playing());
    }

    #[test]
    fn test_invalid_transition_leaves_state() {
        let mut session = session();
        let err = session.resume().unwrap_err();
        assert_eq!(err.state(), SessionState::MainMenu);
        assert_eq!(err.to_string(), "cannot resume in the main menu state");
        assert!(session.state().is_main_menu());
    }

    #[test]
    fn test_input_ignored_unless_playing() {
        let mut session = session();
        let before = *session.falling_piece();
        assert!(!session.move_left());
        assert!(!session.rotate_clockwise());
        assert!(!session.soft_drop(true));
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(*session.falling_piece(), before);

        session.start().unwrap();
        session.pause().unwrap();
        let before = *session.falling_piece();
        assert!(!session.move_right());
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(*session.falling_piece(), before);
        assert_eq!(session.play_time(), Duration::ZERO);
    }

    #[test]
    fn test_tick_interval() {
        let mut session = session();
        assert_eq!(session.tick_interval(), None);

        session.start().unwrap();
        assert_eq!(session.tick_interval(), Some(Duration::from_millis(1000)));

        assert!(session.soft_drop(true));
        assert!(!session.soft_drop(true));
        assert_eq!(session.tick_interval(), Some(Duration::from_millis(100)));
        assert!(session.soft_drop(false));
        assert_eq!(session.tick_interval(), Some(Duration::from_millis(1000)));

        session.quit().unwrap();
        assert_eq!(session.tick_interval(), None);
    }

    #[test]
    fn test_zero_fall_interval_is_clamped_for_timer() {
        let mut session = GameSession::with_seed(
            EngineConfig {
                base_interval_ms: 50,
                ..EngineConfig::default()
            },
            PieceSeed::from_bytes([1; 16]),
        )
        .unwrap();
        session.start().unwrap();
        session.stats.complete_piece_drop(5);
        assert_eq!(session.fall_interval(), Duration::ZERO);
        assert_eq!(session.tick_interval(), Some(MIN_TICK_INTERVAL));
    }

    #[test]
    fn test_set_interval() {
        let mut session = playing();
        assert!(session.set_interval(TickConfig { interval_ms: 0 }).is_err());
        session
            .set_interval(TickConfig { interval_ms: 500 })
            .unwrap();
        assert_eq!(session.tick_interval(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_t_piece_locks_on_bottom_row() {
        let mut session = playing();
        let t = Piece::new(ShapeKind::T, Color::Scarlet).spawned(10);
        session.field.set_falling_piece(t).unwrap();

        let outcome = drop_to_lock(&mut session);
        assert!(outcome.is_locked());
        assert_eq!(session.board().filled_count(), 4);
        // T occupies the bottom two rows: three across, one below the middle.
        assert_eq!(session.board().cell(5, 18), Some(Color::Scarlet));
        assert_eq!(session.board().cell(6, 18), Some(Color::Scarlet));
        assert_eq!(session.board().cell(7, 18), Some(Color::Scarlet));
        assert_eq!(session.board().cell(6, 19), Some(Color::Scarlet));
        assert_eq!(session.stats().completed_pieces(), 1);
        assert_eq!(session.falling_piece().position().y, 0);
    }

    #[test]
    fn test_line_clear_scores_and_levels() {
        let mut session = playing();
        // Four rows full except the first column.
        for y in 16..20 {
            for x in 1..10 {
                session
                    .field
                    .board_mut()
                    .set_cell(x, y, Some(Color::LimeGreen));
            }
        }
        let bar =
            Piece::new(ShapeKind::I, Color::DenimBlue).with_position(PiecePosition::new(0, 0));
        session.field.set_falling_piece(bar).unwrap();

        let TickOutcome::Locked(result) = drop_to_lock(&mut session) else {
            panic!("expected a lock");
        };
        assert_eq!(result.cleared_lines, 4);
        assert_eq!(result.score_delta, score_for_lines(4, 0));
        assert!(!result.leveled_up);
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.stats().score(), 1200);
        assert_eq!(session.stats().total_cleared_lines(), 4);
    }

    #[test]
    fn test_soft_drop_released_on_lock() {
        let mut session = playing();
        session.soft_drop(true);
        let outcome = drop_to_lock(&mut session);
        assert!(outcome.is_locked());
        assert!(!session.is_soft_dropping());
        assert_eq!(session.tick_interval(), Some(Duration::from_millis(1000)));
    }

    #[test]
    fn test_play_time_sums_tick_intervals() {
        let mut session = playing();
        session.tick();
        session.soft_drop(true);
        session.tick();
        assert_eq!(session.play_time(), Duration::from_millis(1100));
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut session = playing();
        // Every shape's leftmost column spawns on x = 5 within the top four rows.
        for y in 0..4 {
            session.field.board_mut().set_cell(5, y, Some(Color::Scarlet));
        }
        let bar =
            Piece::new(ShapeKind::I, Color::DenimBlue).with_position(PiecePosition::new(0, 8));
        session.field.set_falling_piece(bar).unwrap();

        let outcome = drop_to_lock(&mut session);
        assert!(outcome.is_game_over());
        assert!(session.state().is_game_over());
        assert_eq!(session.tick_interval(), None);
        // Only the locked bar was added; the blocked spawn was not.
        assert_eq!(session.board().filled_count(), 8);
        assert!(!session.move_left());
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_restart_resets_game() {
        let mut session = playing();
        drop_to_lock(&mut session);
        session.restart();
        assert_eq!(session.board().filled_count(), 0);
        assert_eq!(session.stats(), &GameStats::new());
        assert_eq!(session.play_time(), Duration::ZERO);
    }

    #[test]
    fn test_render_board_composites_piece_and_ghost() {
        let mut session = session();
        assert_eq!(session.render_board().filled_cells().count(), 0);

        session.start().unwrap();
        let render = session.render_board();
        let piece = session.falling_piece();
        let cells = piece.occupied_positions();
        assert_eq!(render.filled_cells().count(), 4);
        for (x, y, color) in render.filled_cells() {
            assert_eq!(color, piece.color());
            let position = (i32::try_from(x).unwrap(), i32::try_from(y).unwrap());
            assert!(cells.contains(&position));
        }
        let ghost = session.simulate_drop_position();
        for (x, y) in ghost.occupied_positions() {
            let cell = render.cell(usize::try_from(x).unwrap(), usize::try_from(y).unwrap());
            assert_eq!(cell, RenderCell::Ghost(piece.color()));
        }
        // The board itself holds no falling cells.
        assert_eq!(session.board().filled_count(), 0);
    }

    #[test]
    fn test_render_board_without_ghost() {
        let mut session = GameSession::with_seed(
            EngineConfig {
                show_ghost: false,
                ..EngineConfig::default()
            },
            PieceSeed::from_bytes([9; 16]),
        )
        .unwrap();
        session.start().unwrap();
        let render = session.render_board();
        assert!(
            render
                .rows_iter()
                .flatten()
                .all(|cell| !matches!(cell, RenderCell::Ghost(_)))
        );
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = playing();
        let mut b = playing();
        for _ in 0..200 {
            a.move_left();
            b.move_left();
            assert_eq!(a.tick(), b.tick());
        }
        assert_eq!(a.board(), b.board());
    }
}
