use serde::{Deserialize, Serialize};

use super::defaults;

/// Which inference engine compiles and evaluates programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Reduced ordered BDD knowledge compilation with weighted model counting.
    #[default]
    Bdd,
    /// Exhaustive possible-world enumeration. Small programs only.
    Enumeration,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Bdd => "bdd",
            EngineKind::Enumeration => "enumeration",
        }
    }
}

/// Inference engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine used for every entry of a cache.
    pub kind: EngineKind,
    /// Upper bound on relevant probabilistic facts for the enumeration engine.
    pub max_enumeration_facts: usize,
    /// Ground atoms the grounder may derive before giving up.
    pub atom_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind: EngineKind::default(),
            max_enumeration_facts: defaults::DEFAULT_MAX_ENUMERATION_FACTS,
            atom_limit: defaults::DEFAULT_ATOM_LIMIT,
        }
    }
}
