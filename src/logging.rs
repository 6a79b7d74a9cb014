//! Logger setup for native builds.

use crate::config::LogLevel;

/// Initialise `env_logger` with `level` as the default filter.
///
/// `RUST_LOG` still overrides the configured level. Calling this twice is
/// harmless; the second call is ignored.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LogLevel) {
    let default_filter = level.to_level_filter().to_string().to_lowercase();
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialised");
    }
}
