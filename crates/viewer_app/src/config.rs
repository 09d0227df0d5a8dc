use std::time::Duration;

use log::LevelFilter;

use crate::platform::logging::LogDestination;

/// Environment variable overriding the log level.
pub const LOG_LEVEL_ENV: &str = "SNAPSHOT_VIEWER_LOG";
/// Environment variable choosing where logs go: `file`, `terminal`, `both` or `off`.
pub const LOG_DESTINATION_ENV: &str = "SNAPSHOT_VIEWER_LOG_TO";

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Upper bound on how long the loop waits for input before polling the loader.
    pub tick_interval: Duration,
    /// Rows moved per arrow key or wheel notch.
    pub scroll_step: usize,
    pub log_level: LevelFilter,
    pub log_destination: LogDestination,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(75),
            scroll_step: 3,
            log_level: LevelFilter::Info,
            log_destination: LogDestination::File,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::default()
            .with_log_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref())
            .with_log_destination(std::env::var(LOG_DESTINATION_ENV).ok().as_deref())
    }

    fn with_log_level(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => self.log_level = level,
                Err(_) => eprintln!("Ignoring {LOG_LEVEL_ENV}={raw:?}: not a log level"),
            }
        }
        self
    }

    fn with_log_destination(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            match raw.parse::<LogDestination>() {
                Ok(destination) => self.log_destination = destination,
                Err(err) => eprintln!("Ignoring {LOG_DESTINATION_ENV}: {err}"),
            }
        }
        self
    }
}
