#![deny(missing_docs)]
//! Logging front end for the recipe workspace.
//!
//! The `recipe_*` macros forward to the `log` facade through this crate, so callers need no
//! direct `log` dependency. The level is taken from `RECIPE_LOG` when set.

use std::str::FromStr;

#[doc(hidden)]
pub use log as __log;

/// Environment variable overriding the build-profile default level (`error` .. `trace`, `off`).
pub const LEVEL_ENV: &str = "RECIPE_LOG";

/// Logs a trace-level message.
#[macro_export]
macro_rules! recipe_trace {
    ($($arg:tt)*) => {
        $crate::__log::trace!($($arg)*)
    };
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! recipe_debug {
    ($($arg:tt)*) => {
        $crate::__log::debug!($($arg)*)
    };
}

/// Logs an info-level message.
#[macro_export]
macro_rules! recipe_info {
    ($($arg:tt)*) => {
        $crate::__log::info!($($arg)*)
    };
}

/// Logs a warn-level message.
#[macro_export]
macro_rules! recipe_warn {
    ($($arg:tt)*) => {
        $crate::__log::warn!($($arg)*)
    };
}

/// Logs an error-level message.
#[macro_export]
macro_rules! recipe_error {
    ($($arg:tt)*) => {
        $crate::__log::error!($($arg)*)
    };
}

/// Level used when `RECIPE_LOG` is unset: `Debug` in debug builds, `Info` in release builds.
pub fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    }
}

/// Level from `RECIPE_LOG`, falling back to [`default_level`] when unset or unparsable.
pub fn configured_level() -> log::LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| parse_level(&raw))
        .unwrap_or_else(default_level)
}

fn parse_level(raw: &str) -> Option<log::LevelFilter> {
    log::LevelFilter::from_str(raw.trim()).ok()
}

/// Installs a terminal logger for tests.
///
/// No-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        configured_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}
