//! Tracing setup: structured logging with span definitions and event helpers.

pub mod events;
pub mod spans;

use chronolog_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "CHRONOLOG_LOG";

/// Filter from `CHRONOLOG_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects `CHRONOLOG_LOG`; defaults to `info`.
/// Panics if a global subscriber is already installed.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .init();
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .init();
}

/// Initialize tracing from configuration. `CHRONOLOG_LOG` still overrides
/// the configured level.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_from_config(config: &ObservabilityConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_level))
        .with_target(true);

    if config.json_output {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
