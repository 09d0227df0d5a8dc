#![deny(missing_docs)]
//! Logging front for the snapshot viewer crates.
//!
//! Every crate logs through the `viewer_*` macros below. They expand to the
//! [`log`] facade re-exported from here, so callers need no direct `log`
//! dependency to emit records; the binary decides where records end up.

#[doc(hidden)]
pub use log as __log;

/// Emits a trace record (per-event detail such as visibility transitions).
#[macro_export]
macro_rules! viewer_trace {
    ($($arg:tt)*) => { $crate::__log::trace!($($arg)*) };
}

/// Emits a debug record.
#[macro_export]
macro_rules! viewer_debug {
    ($($arg:tt)*) => { $crate::__log::debug!($($arg)*) };
}

/// Emits an info record (load lifecycle, startup and shutdown).
#[macro_export]
macro_rules! viewer_info {
    ($($arg:tt)*) => { $crate::__log::info!($($arg)*) };
}

/// Emits a warning: recoverable oddities in a snapshot bundle.
#[macro_export]
macro_rules! viewer_warn {
    ($($arg:tt)*) => { $crate::__log::warn!($($arg)*) };
}

/// Emits an error record.
#[macro_export]
macro_rules! viewer_error {
    ($($arg:tt)*) => { $crate::__log::error!($($arg)*) };
}

/// Level used by [`initialize_for_tests`].
pub fn test_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Routes records to stderr for the current test binary.
///
/// Only the first call installs a logger; later calls, including ones from
/// other tests in the same binary, leave it in place.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        test_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}
