/// chronolog version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Probability rendered into mock fact instances at compile time.
pub const MOCK_PROBABILITY: f64 = 0.0;

/// Separator between a fact's probability annotation and its atom.
pub const PROBABILITY_SEPARATOR: &str = "::";

/// Separator used when extra query arguments are folded into an identifier.
pub const IDENTIFIER_ARG_SEPARATOR: &str = "_";

/// Maximum number of ground atoms the grounder will derive before giving up.
pub const MAX_GROUND_ATOMS: usize = 100_000;

/// Template placeholders.
pub const PLACEHOLDER_IDENTIFIER: &str = "identifier";
pub const PLACEHOLDER_TIMESTAMP: &str = "timestamp";
pub const PLACEHOLDER_PROBABILITY: &str = "probability";
