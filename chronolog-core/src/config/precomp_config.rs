use serde::{Deserialize, Serialize};

use super::defaults;

/// Precompilation cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompConfig {
    /// Compile entries for distinct queries on the rayon pool.
    pub parallel_compile: bool,
    /// Emit a warning for each fact that has no node in a compiled entry.
    pub warn_unbound_facts: bool,
}

impl Default for PrecompConfig {
    fn default() -> Self {
        Self {
            parallel_compile: defaults::DEFAULT_PARALLEL_COMPILE,
            warn_unbound_facts: defaults::DEFAULT_WARN_UNBOUND_FACTS,
        }
    }
}
