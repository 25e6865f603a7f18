//! # chronolog-core
//!
//! Foundation crate for the chronolog precompilation cache.
//! Defines the shared term model, template and engine traits, errors,
//! config, and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ChronologConfig;
pub use errors::{ChronologError, ChronologResult, EngineError, EngineResult, TemplateError};
pub use models::{Evaluation, FactInstance, NodeId, QueryInstance, QueryResults, Term, WeightVector};
