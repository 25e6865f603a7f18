// Single source of truth for all default values.

// --- Engine ---
pub const DEFAULT_MAX_ENUMERATION_FACTS: usize = 20;
pub const DEFAULT_ATOM_LIMIT: usize = crate::constants::MAX_GROUND_ATOMS;

// --- Precompilation ---
pub const DEFAULT_PARALLEL_COMPILE: bool = true;
pub const DEFAULT_WARN_UNBOUND_FACTS: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_OUTPUT: bool = false;
