//! Logging utilities for bookdesk.
//!
//! One standardized way to set up `tracing` for every binary in the workspace,
//! plus the helper the crates use to report failures consistently.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize from a configured level name such as `config.log_level`.
/// Unknown names mean INFO. Returns the level applied.
///
/// ```
/// use bookdesk_common::logging;
///
/// let level = logging::init_from_name("debug");
/// assert_eq!(level, tracing::Level::DEBUG);
/// ```
pub fn init_from_name(level: &str) -> Level {
    let level = parse_level(level);
    init_with_level(level);
    level
}

/// Initialize the tracing subscriber for the `bookdesk*` targets at `level`.
///
/// `RUST_LOG` directives still apply for every other target.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("bookdesk={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    // try_init: a global subscriber may already be set (tests, embedding)
    let result = tracing_subscriber::registry()
        .with(fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_thread_names(true))
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// `"debug"`, `"WARN"`, ... Anything unparsable is INFO.
pub fn parse_level(level: &str) -> Level {
    level.trim().parse().unwrap_or(Level::INFO)
}

/// `error!("{context}: {error}")`
pub fn log_error<E: std::fmt::Display>(error: E, context: &str) {
    error!("{}: {}", context, error);
}
