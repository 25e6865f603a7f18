pub mod defaults;
mod engine_config;
mod observability_config;
mod precomp_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use engine_config::{EngineConfig, EngineKind};
pub use observability_config::ObservabilityConfig;
pub use precomp_config::PrecompConfig;

use crate::errors::{ChronologError, ChronologResult};

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChronologConfig {
    pub engine: EngineConfig,
    pub precomp: PrecompConfig,
    pub observability: ObservabilityConfig,
}

impl ChronologConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> ChronologResult<Self> {
        toml::from_str(text).map_err(|e| ChronologError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ChronologResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ChronologError::ConfigError {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }
}
