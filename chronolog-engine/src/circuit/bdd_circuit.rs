use std::collections::BTreeMap;

use chronolog_core::errors::EngineResult;
use chronolog_core::traits::ICompiledCircuit;
use chronolog_core::{Evaluation, NodeId, Term, WeightVector};

use super::{check_weights, named_nodes};
use crate::bdd::{Bdd, BddRef, FALSE, TRUE};
use crate::grounding::GroundProgram;

/// A ground program compiled to one BDD per query under Clark's completion.
#[derive(Debug, Clone)]
pub struct BddCircuit {
    bdd: Bdd,
    queries: Vec<(Term, BddRef)>,
    named: BTreeMap<String, NodeId>,
    baseline: Vec<f64>,
}

impl BddCircuit {
    pub fn compile(ground: &GroundProgram) -> Self {
        let mut bdd = Bdd::new();
        let mut compiled: Vec<BddRef> = Vec::with_capacity(ground.atoms.len());

        // Atoms are topologically ordered, so every body reference is
        // already compiled.
        for def in &ground.atoms {
            let mut f = if def.certain { TRUE } else { FALSE };
            for &choice in &def.choices {
                let v = bdd.var(choice);
                f = bdd.or(f, v);
            }
            for body in &def.bodies {
                let mut conj = TRUE;
                for lit in body {
                    let atom = compiled[lit.atom];
                    let term = if lit.positive { atom } else { bdd.not(atom) };
                    conj = bdd.and(conj, term);
                }
                f = bdd.or(f, conj);
            }
            compiled.push(f);
        }

        let queries = ground
            .queries
            .iter()
            .map(|(term, index)| (term.clone(), index.map_or(FALSE, |i| compiled[i])))
            .collect();

        Self {
            bdd,
            queries,
            named: named_nodes(ground),
            baseline: ground.baseline_weights(),
        }
    }
}

impl ICompiledCircuit for BddCircuit {
    fn named_nodes(&self) -> &BTreeMap<String, NodeId> {
        &self.named
    }

    fn weights(&self) -> WeightVector {
        WeightVector::new(self.baseline.clone())
    }

    fn evaluate(&self, weights: &WeightVector) -> EngineResult<Evaluation> {
        check_weights(weights, self.baseline.len())?;
        Ok(self
            .queries
            .iter()
            .map(|(term, root)| (term.clone(), self.bdd.probability(*root, weights.as_slice())))
            .collect())
    }

    fn size(&self) -> usize {
        self.bdd.len()
    }
}
