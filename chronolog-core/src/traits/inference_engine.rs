use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::errors::EngineResult;
use crate::models::{Evaluation, NodeId, WeightVector};

/// Compiles program text into a reusable weighted circuit.
pub trait IInferenceEngine: Send + Sync {
    /// Compile a complete program (facts, rules, queries).
    fn compile(&self, program: &str) -> EngineResult<Box<dyn ICompiledCircuit>>;

    /// Human-readable engine name.
    fn name(&self) -> &str;
}

/// An immutable compiled circuit. Weights are supplied per evaluation.
pub trait ICompiledCircuit: Send + Sync + Debug {
    /// Probabilistic facts present in the circuit, keyed by their
    /// whitespace-free display text (e.g. `heads1(0)`).
    fn named_nodes(&self) -> &BTreeMap<String, NodeId>;

    /// A fresh copy of the weights the circuit was compiled with.
    fn weights(&self) -> WeightVector;

    /// Evaluate every query under the given weights.
    fn evaluate(&self, weights: &WeightVector) -> EngineResult<Evaluation>;

    /// Number of internal nodes, for diagnostics.
    fn size(&self) -> usize;
}
