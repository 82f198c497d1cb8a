use log::debug;

/// Base points for clearing 1, 2, 3 and 4 lines in one lock.
///
/// The awarded score is the base multiplied by `level + 1`.
pub const SCORE_TABLE: [u64; 4] = [40, 100, 300, 1200];

/// Returns the points for clearing `cleared_lines` lines at `level`.
///
/// Zero lines scores nothing. More than four lines (impossible with the
/// standard shapes) scores as four.
#[must_use]
pub fn score_for_lines(cleared_lines: usize, level: usize) -> u64 {
    if cleared_lines == 0 {
        return 0;
    }
    let base = SCORE_TABLE[cleared_lines.min(SCORE_TABLE.len()) - 1];
    let multiplier = u64::try_from(level).map_or(u64::MAX, |level| level.saturating_add(1));
    base.saturating_mul(multiplier)
}

/// What a single lock changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropResult {
    pub cleared_lines: usize,
    pub score_delta: u64,
    pub leveled_up: bool,
}

/// Score, level and line statistics of one game.
///
/// # Scoring
///
/// Each lock with `n > 0` cleared lines adds
/// `SCORE_TABLE[min(n, 4) - 1] * (level + 1)` using the level *before* the
/// lock. Then, if the total line count has reached `level * 5 + 5`, the level
/// goes up by exactly one, even if the lock crossed more than one threshold.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// let result = stats.complete_piece_drop(4);
/// assert_eq!(result.score_delta, 1200);
/// assert!(!result.leveled_up);
///
/// // 5 lines in total reaches the first threshold.
/// let result = stats.complete_piece_drop(1);
/// assert_eq!(result.score_delta, 40);
/// assert!(result.leveled_up);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter(), &[0, 1, 0, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have locked.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns how many locks cleared 0, 1, 2, 3 and 4 lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Line total at which the current level ends.
    #[must_use]
    pub const fn next_level_threshold(&self) -> usize {
        self.level * 5 + 5
    }

    /// Records a locked piece that cleared `cleared_lines` lines.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> DropResult {
        self.completed_pieces += 1;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;

        if cleared_lines == 0 {
            return DropResult::default();
        }

        let score_delta = score_for_lines(cleared_lines, self.level);
        self.score += score_delta;
        self.total_cleared_lines += cleared_lines;

        let leveled_up = self.total_cleared_lines >= self.next_level_threshold();
        if leveled_up {
            self.level += 1;
            debug!(
                "level up to {} after {} lines",
                self.level, self.total_cleared_lines
            );
        }

        DropResult {
            cleared_lines,
            score_delta,
            leveled_up,
        }
    }
}
