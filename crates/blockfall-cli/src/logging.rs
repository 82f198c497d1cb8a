//! File logging.
//!
//! The terminal belongs to the UI, so log records only go to a file, and
//! only when one is requested.

use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} {m}{n}";

/// Sends log records at `level` and above to the file at `path`.
pub fn init(level: LevelFilter, path: &Path) -> anyhow::Result<()> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .context("Invalid logging configuration")?;
    log4rs::init_config(config).context("Failed to install logger")?;
    Ok(())
}
