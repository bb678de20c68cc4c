//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with the default `info` filter
pub fn init() {
    init_with_level(None);
}

/// Initialize the logging system with an optional default filter
///
/// `RUST_LOG` always takes precedence over `level`. Calling this more than once
/// is harmless; later calls leave the installed logger untouched.
pub fn init_with_level(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("info"));
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::trace!("Logger already initialized");
    }
}
