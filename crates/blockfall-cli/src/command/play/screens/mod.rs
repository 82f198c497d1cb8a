pub use self::{game::GameScreen, leaderboard::LeaderboardScreen};

mod game;
mod leaderboard;
