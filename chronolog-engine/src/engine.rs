//! `IInferenceEngine` implementations and engine selection.

use chronolog_core::config::{EngineConfig, EngineKind};
use chronolog_core::constants::MAX_GROUND_ATOMS;
use chronolog_core::errors::EngineResult;
use chronolog_core::traits::{ICompiledCircuit, IInferenceEngine};
use tracing::debug;

use crate::circuit::{BddCircuit, EnumerationCircuit};
use crate::grounding::{self, GroundProgram};
use crate::parser::parse_program;

fn parse_and_ground(program: &str, atom_limit: usize) -> EngineResult<GroundProgram> {
    let parsed = parse_program(program)?;
    grounding::ground(&parsed, atom_limit)
}

/// Knowledge compilation to reduced ordered BDDs.
#[derive(Debug, Clone)]
pub struct BddEngine {
    atom_limit: usize,
}

impl BddEngine {
    pub fn new() -> Self {
        Self {
            atom_limit: MAX_GROUND_ATOMS,
        }
    }

    pub fn with_atom_limit(atom_limit: usize) -> Self {
        Self { atom_limit }
    }
}

impl Default for BddEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IInferenceEngine for BddEngine {
    fn compile(&self, program: &str) -> EngineResult<Box<dyn ICompiledCircuit>> {
        let ground = parse_and_ground(program, self.atom_limit)?;
        let circuit = BddCircuit::compile(&ground);
        debug!(
            engine = self.name(),
            nodes = circuit.size(),
            facts = ground.choices.len(),
            "program compiled"
        );
        Ok(Box::new(circuit))
    }

    fn name(&self) -> &str {
        EngineKind::Bdd.as_str()
    }
}

/// Possible-world enumeration over the relevant ground program.
#[derive(Debug, Clone)]
pub struct EnumerationEngine {
    max_facts: usize,
    atom_limit: usize,
}

impl EnumerationEngine {
    pub fn new(max_facts: usize) -> Self {
        Self {
            max_facts,
            atom_limit: MAX_GROUND_ATOMS,
        }
    }

    pub fn with_atom_limit(mut self, atom_limit: usize) -> Self {
        self.atom_limit = atom_limit;
        self
    }
}

impl IInferenceEngine for EnumerationEngine {
    fn compile(&self, program: &str) -> EngineResult<Box<dyn ICompiledCircuit>> {
        let ground = parse_and_ground(program, self.atom_limit)?;
        let circuit = EnumerationCircuit::compile(ground, self.max_facts)?;
        debug!(engine = self.name(), atoms = circuit.size(), "program compiled");
        Ok(Box::new(circuit))
    }

    fn name(&self) -> &str {
        EngineKind::Enumeration.as_str()
    }
}

/// Build the engine selected by `config`.
pub fn engine_for(config: &EngineConfig) -> Box<dyn IInferenceEngine> {
    match config.kind {
        EngineKind::Bdd => Box::new(BddEngine::with_atom_limit(config.atom_limit)),
        EngineKind::Enumeration => Box::new(
            EnumerationEngine::new(config.max_enumeration_facts).with_atom_limit(config.atom_limit),
        ),
    }
}
