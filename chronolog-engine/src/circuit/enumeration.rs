use std::collections::BTreeMap;

use chronolog_core::errors::{EngineError, EngineResult};
use chronolog_core::traits::ICompiledCircuit;
use chronolog_core::{Evaluation, NodeId, WeightVector};

use super::{check_weights, named_nodes};
use crate::grounding::GroundProgram;

/// Reference evaluator: sums the weight of every possible world.
///
/// Exponential in the number of probabilistic facts; used to cross-check
/// the BDD compiler on small programs.
#[derive(Debug, Clone)]
pub struct EnumerationCircuit {
    ground: GroundProgram,
    named: BTreeMap<String, NodeId>,
}

impl EnumerationCircuit {
    pub fn compile(ground: GroundProgram, max_facts: usize) -> EngineResult<Self> {
        // World masks are u64.
        let max = max_facts.min(63);
        if ground.choices.len() > max {
            return Err(EngineError::TooManyFacts {
                count: ground.choices.len(),
                max,
            });
        }
        let named = named_nodes(&ground);
        Ok(Self { ground, named })
    }

    fn truth_values(&self, world: u64) -> Vec<bool> {
        let mut values: Vec<bool> = Vec::with_capacity(self.ground.atoms.len());
        for def in &self.ground.atoms {
            let chosen = def.choices.iter().any(|&c| world & (1 << c) != 0);
            let derived = def
                .bodies
                .iter()
                .any(|body| body.iter().all(|lit| values[lit.atom] == lit.positive));
            values.push(def.certain || chosen || derived);
        }
        values
    }
}

impl ICompiledCircuit for EnumerationCircuit {
    fn named_nodes(&self) -> &BTreeMap<String, NodeId> {
        &self.named
    }

    fn weights(&self) -> WeightVector {
        WeightVector::new(self.ground.baseline_weights())
    }

    fn evaluate(&self, weights: &WeightVector) -> EngineResult<Evaluation> {
        let n = self.ground.choices.len();
        check_weights(weights, n)?;
        let w = weights.as_slice();

        let mut totals = vec![0.0; self.ground.queries.len()];
        for world in 0..(1u64 << n) {
            let mass: f64 = (0..n)
                .map(|i| if world & (1 << i) != 0 { w[i] } else { 1.0 - w[i] })
                .product();
            if mass == 0.0 {
                continue;
            }
            let values = self.truth_values(world);
            for (total, (_, index)) in totals.iter_mut().zip(&self.ground.queries) {
                if index.is_some_and(|i| values[i]) {
                    *total += mass;
                }
            }
        }

        Ok(self
            .ground
            .queries
            .iter()
            .zip(totals)
            .map(|((term, _), p)| (term.clone(), p))
            .collect())
    }

    fn size(&self) -> usize {
        self.ground.atoms.len()
    }
}
