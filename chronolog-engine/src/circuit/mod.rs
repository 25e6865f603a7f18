//! Compiled circuits implementing `ICompiledCircuit`.

mod bdd_circuit;
mod enumeration;

pub use bdd_circuit::BddCircuit;
pub use enumeration::EnumerationCircuit;

use std::collections::BTreeMap;

use chronolog_core::errors::{EngineError, EngineResult};
use chronolog_core::{NodeId, WeightVector};

use crate::grounding::GroundProgram;

fn named_nodes(ground: &GroundProgram) -> BTreeMap<String, NodeId> {
    ground
        .named_choices()
        .into_iter()
        .map(|(name, index)| (name, NodeId(index)))
        .collect()
}

/// Weight vectors must cover every node with a probability.
fn check_weights(weights: &WeightVector, expected: usize) -> EngineResult<()> {
    if weights.len() != expected {
        return Err(EngineError::WeightMismatch {
            expected,
            actual: weights.len(),
        });
    }
    if let Some((i, w)) = weights
        .as_slice()
        .iter()
        .enumerate()
        .find(|(_, w)| !(0.0..=1.0).contains(*w))
    {
        return Err(EngineError::InvalidProbability {
            value: w.to_string(),
            fact: format!("node {i}"),
        });
    }
    Ok(())
}
