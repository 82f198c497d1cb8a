use std::{
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context;
use blockfall_engine::Leaderboard;

use crate::storage::LeaderboardStore;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Show at most this many entries
    #[clap(long)]
    limit: Option<usize>,
    /// Print the stored JSON instead of a table
    #[clap(long)]
    json: bool,
}

pub(crate) fn run(arg: &ScoresArg, data_dir: &Path) -> anyhow::Result<()> {
    let store = LeaderboardStore::new(data_dir);
    let leaderboard = store.load()?;

    let mut stdout = io::stdout().lock();
    if arg.json {
        serde_json::to_writer_pretty(&mut stdout, &leaderboard)
            .context("Failed to write leaderboard JSON")?;
        writeln!(stdout)?;
    } else {
        write_table(&mut stdout, &leaderboard, arg.limit)?;
    }
    stdout.flush()?;
    Ok(())
}

fn write_table<W>(out: &mut W, leaderboard: &Leaderboard, limit: Option<usize>) -> io::Result<()>
where
    W: io::Write,
{
    if leaderboard.is_empty() {
        return writeln!(out, "No high scores yet");
    }

    let shown = limit.map_or(leaderboard.len(), |n| n.min(leaderboard.len()));
    let entries = &leaderboard.entries()[..shown];
    let name_width = entries
        .iter()
        .map(|e| e.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("PLAYER".len());
    writeln!(out, "RANK  {:<name_width$}  {:>10}", "PLAYER", "SCORE")?;
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<name_width$}  {:>10}",
            rank + 1,
            entry.player,
            entry.score
        )?;
    }
    Ok(())
}
