//! Logger setup for the viewer binary.
//!
//! The TUI owns stdout and stderr while it runs, so records go to
//! [`LOG_FILE`] unless another [`LogDestination`] is chosen.

use std::fs::File;
use std::str::FromStr;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILE: &str = "./snapshot_viewer.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Truncate and write [`LOG_FILE`] in the working directory.
    File,
    /// stderr; only useful when the TUI is not drawing.
    Terminal,
    Both,
    Off,
}

impl FromStr for LogDestination {
    type Err = String;

    /// Accepts `file`, `terminal`, `both` or `off`, ignoring case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "terminal" => Ok(Self::Terminal),
            "both" => Ok(Self::Both),
            "off" => Ok(Self::Off),
            other => Err(format!("unknown log destination {other:?}")),
        }
    }
}

impl LogDestination {
    fn wants_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }

    fn wants_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }
}

/// Installs the global logger. A file that cannot be created is reported
/// on stderr and skipped; nothing here aborts startup.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    let config = record_format();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.wants_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.wants_file() {
        match File::create(LOG_FILE) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("snapshot_viewer: cannot create {LOG_FILE}: {err}"),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

/// RFC 3339 timestamps; module targets only on errors.
fn record_format() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
