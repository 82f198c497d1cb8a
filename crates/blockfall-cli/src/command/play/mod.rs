use std::path::{Path, PathBuf};

use anyhow::Context;
use blockfall_engine::{EngineConfig, GameSession, PieceSeed};
use log::info;

use crate::{
    command::play::screens::GameScreen,
    storage::LeaderboardStore,
    tui::{Runtime, ScreenStack},
    util,
};

mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Board height in rows [default: 20]
    #[clap(long)]
    pub(crate) rows: Option<usize>,
    /// Board width in columns [default: 10]
    #[clap(long)]
    pub(crate) cols: Option<usize>,
    /// Piece sequence seed as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Engine configuration file (JSON); command line flags take precedence
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Hide the landing preview of the falling piece
    #[clap(long)]
    pub(crate) no_ghost: bool,
}

impl PlayArg {
    fn engine_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<EngineConfig, _>("engine config", path)?,
            None => EngineConfig::default(),
        };
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if self.no_ghost {
            config.show_ghost = false;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &PlayArg, data_dir: &Path) -> anyhow::Result<()> {
    let config = arg.engine_config()?;
    let session = match arg.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    }
    .context("Invalid game configuration")?;
    info!("piece seed: {}", session.seed());

    let store = LeaderboardStore::new(data_dir);
    let leaderboard = store.load()?;
    info!("leaderboard file: {}", store.path().display());

    let mut screens = ScreenStack::new(Box::new(GameScreen::new(session, store, leaderboard)));
    Runtime::new()
        .run(&mut screens)
        .context("Terminal I/O failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, time::SystemTime};

    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let config = PlayArg::default().engine_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("blockfall-config-{nanos}.json"));
        fs::write(&path, r#"{ "rows": 30, "cols": 12, "base_interval_ms": 800 }"#).unwrap();

        let arg = PlayArg {
            cols: Some(8),
            config: Some(path.clone()),
            no_ghost: true,
            ..PlayArg::default()
        };
        let config = arg.engine_config().unwrap();
        fs::remove_file(path).unwrap();

        assert_eq!(config.rows, 30);
        assert_eq!(config.cols, 8);
        assert_eq!(config.base_interval_ms, 800);
        assert!(!config.show_ghost);
        assert_eq!(config.level_step_ms, EngineConfig::default().level_step_ms);
    }

    #[test]
    fn test_unknown_config_field_is_error() {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("blockfall-bad-config-{nanos}.json"));
        fs::write(&path, r#"{ "width": 12 }"#).unwrap();

        let arg = PlayArg {
            config: Some(path.clone()),
            ..PlayArg::default()
        };
        let result = arg.engine_config();
        fs::remove_file(path).unwrap();
        assert!(result.is_err());
    }
}
