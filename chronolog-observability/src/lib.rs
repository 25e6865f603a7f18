//! # chronolog-observability
//!
//! Structured tracing for the precompilation cache: subscriber setup driven
//! by `ObservabilityConfig` or `CHRONOLOG_LOG`, event helpers for compile and
//! evaluate milestones, and span macros.

pub mod tracing_setup;

pub use tracing_setup::{init_from_config, init_tracing, init_tracing_with_filter};
