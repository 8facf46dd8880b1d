//! File logging.
//!
//! The terminal is in raw mode on the alternate screen while the game runs, so
//! log records go to a file instead of stderr.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, LevelFilter};
use simplelog::{ConfigBuilder, WriteLogger};

use crate::core::EventSink;
use crate::types::GameEvent;

/// Install a [`WriteLogger`] that truncates and writes to `path`.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();
    WriteLogger::init(level, config, file).context("logger already installed")?;
    Ok(())
}

/// Event sink that writes every game event to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, event: &GameEvent) {
        info!("event: {:?} ({})", event, event.describe());
    }
}
