//! Span definitions for the build and evaluate phases.

/// Create a span around compiling one cache entry.
#[macro_export]
macro_rules! compile_span {
    ($identifier:expr, $base_timestamp:expr) => {
        tracing::info_span!(
            "chronolog.compile",
            identifier = %$identifier,
            base_timestamp = $base_timestamp
        )
    };
}

/// Create a span around one evaluate call.
#[macro_export]
macro_rules! evaluate_span {
    ($queries:expr, $events:expr) => {
        tracing::info_span!("chronolog.evaluate", queries = $queries, events = $events)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const COMPILE: &str = "chronolog.compile";
    pub const EVALUATE: &str = "chronolog.evaluate";
}
