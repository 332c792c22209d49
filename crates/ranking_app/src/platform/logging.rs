//! Logger wiring for the terminal app.
//!
//! Interactive sessions log to `./ranking.log` by default so the terminal stays readable.

use std::path::PathBuf;

use clap::ValueEnum;
use ranking_logging::log::LevelFilter;
use ranking_logging::{LogDestination, DEFAULT_LOG_FILE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl LogTarget {
    fn destination(self) -> LogDestination {
        match self {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::default_file(),
            LogTarget::Both => LogDestination::Both(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

pub fn initialize(target: LogTarget, level: LevelFilter) {
    if !ranking_logging::initialize(target.destination(), level) {
        eprintln!("Warning: logging is disabled for this session");
    }
}
