//! High score ordering and submission rules.
//!
//! The engine only decides what the leaderboard looks like; storing it is up
//! to the front end. The serialized form is a JSON array of
//! `{ "player": ..., "score": ... }` objects, best first.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

/// Storage key the leaderboard is saved under.
pub const LEADERBOARD_KEY: &str = "blockfall-high-scores";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player: String,
    pub score: u64,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn new(player: impl Into<String>, score: u64) -> Self {
        Self {
            player: player.into(),
            score,
        }
    }

    /// Descending by score, then ascending by player name ignoring case.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        other.score.cmp(&self.score).then_with(|| {
            self.player
                .to_lowercase()
                .cmp(&other.player.to_lowercase())
        })
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SubmitError {
    #[display("player name is empty")]
    EmptyName,
    #[display("a score of zero is not recorded")]
    ZeroScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SubmitOutcome {
    /// The player had no entry; one was added at `rank` (0-based).
    Added { rank: usize },
    /// The player's entry was raised from `previous` and moved to `rank`.
    Improved { rank: usize, previous: u64 },
    /// The player already had `best`, which is at least the submitted score.
    Kept { rank: usize, best: u64 },
}

impl SubmitOutcome {
    #[must_use]
    pub fn rank(self) -> usize {
        match self {
            SubmitOutcome::Added { rank }
            | SubmitOutcome::Improved { rank, .. }
            | SubmitOutcome::Kept { rank, .. } => rank,
        }
    }
}

/// High scores, best first, with at most one entry per player.
///
/// Players are matched by exact name. Entries with equal scores are ordered
/// by name ignoring case.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Leaderboard, LeaderboardEntry};
///
/// let mut board = Leaderboard::from(vec![
///     LeaderboardEntry::new("A", 100),
///     LeaderboardEntry::new("B", 100),
/// ]);
/// board.submit("AA", 100).unwrap();
///
/// let names = board.entries().iter().map(|e| e.player.as_str()).collect::<Vec<_>>();
/// assert_eq!(names, ["A", "AA", "B"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LeaderboardEntry>", into = "Vec<LeaderboardEntry>")]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl From<Vec<LeaderboardEntry>> for Leaderboard {
    /// Sorts `entries` into leaderboard order.
    fn from(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(LeaderboardEntry::rank_cmp);
        Self { entries }
    }
}

impl From<Leaderboard> for Vec<LeaderboardEntry> {
    fn from(board: Leaderboard) -> Self {
        board.entries
    }
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the 0-based rank of `player`'s entry.
    #[must_use]
    pub fn rank_of(&self, player: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.player == player)
    }

    /// Records `score` for `player`.
    ///
    /// Leading and trailing whitespace is trimmed from the name. A player who
    /// already has an entry keeps the better of the two scores.
    pub fn submit(&mut self, player: &str, score: u64) -> Result<SubmitOutcome, SubmitError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(SubmitError::EmptyName);
        }
        if score == 0 {
            return Err(SubmitError::ZeroScore);
        }

        let outcome = match self.rank_of(player) {
            Some(rank) if self.entries[rank].score >= score => SubmitOutcome::Kept {
                rank,
                best: self.entries[rank].score,
            },
            Some(rank) => {
                let previous = self.entries.remove(rank).score;
                SubmitOutcome::Improved {
                    rank: self.insert(LeaderboardEntry::new(player, score)),
                    previous,
                }
            }
            None => SubmitOutcome::Added {
                rank: self.insert(LeaderboardEntry::new(player, score)),
            },
        };
        debug!("leaderboard submit {player}: {score} -> {outcome:?}");
        Ok(outcome)
    }

    fn insert(&mut self, entry: LeaderboardEntry) -> usize {
        let rank = self
            .entries
            .partition_point(|e| e.rank_cmp(&entry).is_le());
        self.entries.insert(rank, entry);
        rank
    }
}
