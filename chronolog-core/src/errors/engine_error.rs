/// Inference engine errors: parsing, grounding, compilation, evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unsafe variable {variable} in clause: {clause}")]
    UnsafeVariable { variable: String, clause: String },

    #[error("fact is not ground: {fact}")]
    NonGroundFact { fact: String },

    #[error("cyclic dependency through {atom}")]
    CyclicProgram { atom: String },

    #[error("invalid probability {value} for {fact}")]
    InvalidProbability { value: String, fact: String },

    #[error("grounding exceeded {limit} atoms")]
    GroundingLimitExceeded { limit: usize },

    #[error("too many probabilistic facts for enumeration: {count} (max {max})")]
    TooManyFacts { count: usize, max: usize },

    #[error("weight vector has {actual} entries, circuit expects {expected}")]
    WeightMismatch { expected: usize, actual: usize },

    #[error("unknown node {node}")]
    UnknownNode { node: usize },
}
