use std::{
    io,
    path::{Path, PathBuf},
};

use blockfall_engine::{LEADERBOARD_KEY, Leaderboard};
use log::{debug, info};

use crate::util;

/// Leaderboard persisted as `<data-dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(format!("{LEADERBOARD_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved leaderboard.
    ///
    /// A missing file is an empty leaderboard; an unreadable or malformed one
    /// is an error.
    pub fn load(&self) -> anyhow::Result<Leaderboard> {
        match util::read_json_file::<Leaderboard, _>("leaderboard", &self.path) {
            Ok(leaderboard) => {
                debug!(
                    "loaded {} leaderboard entries from {}",
                    leaderboard.len(),
                    self.path.display()
                );
                Ok(leaderboard)
            }
            Err(e) if is_not_found(&e) => {
                debug!("no leaderboard at {}", self.path.display());
                Ok(Leaderboard::new())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, leaderboard: &Leaderboard) -> anyhow::Result<()> {
        util::write_json_file("leaderboard", &self.path, leaderboard)?;
        info!(
            "saved {} leaderboard entries to {}",
            leaderboard.len(),
            self.path.display()
        );
        Ok(())
    }
}

fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
}
