use super::{EngineError, TemplateError};

/// Top-level error for the precompilation cache.
#[derive(Debug, thiserror::Error)]
pub enum ChronologError {
    #[error("query '{identifier}' has not been precompiled")]
    NotPrecompiled { identifier: String },

    #[error("feedback requested but query '{identifier}' has no feedback capability")]
    FeedbackUnsupported { identifier: String },

    #[error("timestamp {timestamp} shifted by {shift} is out of range")]
    TimestampOverflow { timestamp: i64, shift: i64 },

    #[error("failed to load program from {path}: {reason}")]
    ProgramLoad { path: String, reason: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("engine error: {0}")]
    EngineError(#[from] EngineError),

    #[error("template error: {0}")]
    TemplateError(#[from] TemplateError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
