mod chronolog_error;
mod engine_error;
mod template_error;

pub use chronolog_error::ChronologError;
pub use engine_error::EngineError;
pub use template_error::TemplateError;

/// Result alias used across the workspace.
pub type ChronologResult<T> = Result<T, ChronologError>;

/// Result alias for inference engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
