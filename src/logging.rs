//! File logging.
//!
//! The terminal is owned by the board while the app runs, so log records go
//! to a file only.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;

/// Install a file logger at `level` writing to `path` (truncated on start).
pub fn init_logging(path: &Path, level: LevelFilter) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create log directory {}", dir.display()))?;
        }
    }

    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;

    simplelog::WriteLogger::init(level, config, file).context("initialize logger")?;
    Ok(())
}
