//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace, LevelFilter};

/// Initialize the logging system from `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize logging with an explicit default level
///
/// `RUST_LOG` still overrides the level when set.
pub fn init_with_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Parse a textual level ("error", "warn", "info", "debug", "trace", "off")
///
/// Unknown names fall back to `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using info", level);
        LevelFilter::Info
    })
}
