use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};

/// Handle of a weight-carrying node inside a compiled circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Per-call weights for every node of a circuit.
///
/// Obtained as a copy of a circuit's compiled baseline and handed back to
/// `evaluate`; the circuit itself is never mutated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightVector {
    weights: Vec<f64>,
}

impl WeightVector {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            weights: vec![0.0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.weights.get(node.0).copied()
    }

    /// Overwrite the weight of one node.
    pub fn set(&mut self, node: NodeId, probability: f64) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(EngineError::InvalidProbability {
                value: probability.to_string(),
                fact: format!("node {}", node.0),
            });
        }
        let slot = self
            .weights
            .get_mut(node.0)
            .ok_or(EngineError::UnknownNode { node: node.0 })?;
        *slot = probability;
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}
