//! One compiled query family.

use std::collections::HashMap;

use chronolog_core::config::PrecompConfig;
use chronolog_core::errors::ChronologResult;
use chronolog_core::traits::{ICompiledCircuit, IInferenceEngine};
use chronolog_core::{Evaluation, FactInstance, QueryInstance, WeightVector};
use chronolog_observability::compile_span;
use chronolog_observability::tracing_setup::events;

use crate::binding::{bind_nodes, TrackedFact};

/// A circuit compiled for one query family at its base timestamp, plus the
/// nodes of every declared fact it contains. Immutable once built.
#[derive(Debug)]
pub struct PrecompiledEntry {
    identifier: String,
    circuit: Box<dyn ICompiledCircuit>,
    tracked: Vec<TrackedFact>,
    base_timestamp: i64,
    unbound_facts: Vec<String>,
    program_hash: String,
}

impl PrecompiledEntry {
    /// Compile `program` extended with the mock of every declaration and the
    /// query rendered at its own timestamp.
    pub fn compile(
        query: &QueryInstance,
        declarations: &[FactInstance],
        program: &str,
        engine: &dyn IInferenceEngine,
        config: &PrecompConfig,
    ) -> ChronologResult<Self> {
        let identifier = query.identifier();
        let base_timestamp = query.timestamp();
        let span = compile_span!(identifier, base_timestamp);
        let _guard = span.enter();

        let text = assemble_program(program, declarations, query);
        let program_hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        let circuit = engine.compile(&text)?;

        let binding = bind_nodes(declarations, circuit.named_nodes());
        if config.warn_unbound_facts {
            for fact in &binding.unbound {
                events::fact_unbound(&identifier, fact);
            }
        }
        events::entry_compiled(
            &identifier,
            base_timestamp,
            binding.tracked.len(),
            circuit.size(),
        );

        Ok(Self {
            identifier,
            circuit,
            tracked: binding.tracked,
            base_timestamp,
            unbound_facts: binding.unbound,
            program_hash,
        })
    }

    /// A fresh weight vector in which every tracked node holds the
    /// probability of its rebased event, or 0 when no event matches.
    /// Returns the vector and the number of matched nodes.
    pub fn assign_weights(
        &self,
        rebased: &HashMap<String, f64>,
    ) -> ChronologResult<(WeightVector, usize)> {
        let mut weights = self.circuit.weights();
        let mut matched = 0;
        for fact in &self.tracked {
            let probability = match rebased.get(&fact.key) {
                Some(&p) => {
                    matched += 1;
                    p
                }
                None => 0.0,
            };
            weights.set(fact.node, probability)?;
        }
        Ok((weights, matched))
    }

    /// Results in compile-time coordinates.
    pub fn evaluate(&self, weights: &WeightVector) -> ChronologResult<Evaluation> {
        Ok(self.circuit.evaluate(weights)?)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn base_timestamp(&self) -> i64 {
        self.base_timestamp
    }

    pub fn tracked_facts(&self) -> &[TrackedFact] {
        &self.tracked
    }

    pub fn unbound_facts(&self) -> &[String] {
        &self.unbound_facts
    }

    /// blake3 hex digest of the assembled program text.
    pub fn program_hash(&self) -> &str {
        &self.program_hash
    }

    pub fn circuit_size(&self) -> usize {
        self.circuit.size()
    }
}

fn assemble_program(program: &str, declarations: &[FactInstance], query: &QueryInstance) -> String {
    let mut text = String::with_capacity(program.len() + 32 * (declarations.len() + 1));
    text.push_str(program);
    text.push('\n');
    for declaration in declarations {
        text.push_str(&declaration.instantiate_mock());
        text.push('\n');
    }
    text.push_str(&query.render());
    text.push('\n');
    text
}
