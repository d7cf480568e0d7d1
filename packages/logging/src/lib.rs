#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub use log;
use thiserror::Error;

pub const LOG_ENV_VAR: &str = "PORTFOLIO_LOG";

#[cfg(debug_assertions)]
pub const DEFAULT_LOG_LEVEL: &str = "portfolio=trace";
#[cfg(not(debug_assertions))]
pub const DEFAULT_LOG_LEVEL: &str = "portfolio=info";

#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|x| !x.trim().is_empty())
}

/// `PORTFOLIO_LOG`, then `RUST_LOG`, then `fallback`, then the build
/// profile's default.
#[must_use]
pub fn resolve_filter(fallback: Option<&str>) -> String {
    env_value(LOG_ENV_VAR)
        .or_else(|| env_value("RUST_LOG"))
        .or_else(|| fallback.map(ToString::to_string))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// Installs the global logger.
///
/// # Errors
///
/// * If a global logger has already been installed
pub fn init(fallback: Option<&str>) -> Result<(), InitError> {
    let filter = resolve_filter(fallback);

    env_logger::Builder::new()
        .parse_filters(&filter)
        .format_timestamp_millis()
        .try_init()?;

    log::debug!("init: filter={filter}");

    Ok(())
}

#[cfg(feature = "macros")]
#[macro_export]
macro_rules! debug_or_trace {
    (($($debug:tt)+), ($($trace:tt)+)) => {
        if $crate::log::log_enabled!($crate::log::Level::Trace) {
            $crate::log::trace!($($trace)*);
        } else {
            $crate::log::debug!($($debug)*);
        }
    }
}
