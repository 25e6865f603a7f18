//! # chronolog-engine
//!
//! Probabilistic logic inference behind the `IInferenceEngine` boundary.
//!
//! Pipeline: pest parser → relevant grounding (petgraph ordering, cycle
//! rejection) → circuit. Two circuits are available:
//!
//! | Engine | Circuit | Cost per evaluation |
//! |--------|---------|---------------------|
//! | `bdd` | reduced ordered BDD per query | linear in diagram size |
//! | `enumeration` | relevant ground program | exponential in facts |
//!
//! Circuits are immutable; weights are passed to every `evaluate` call.

pub mod bdd;
pub mod circuit;
pub mod engine;
pub mod grounding;
pub mod parser;
pub mod program;

pub use circuit::{BddCircuit, EnumerationCircuit};
pub use engine::{engine_for, BddEngine, EnumerationEngine};
pub use grounding::GroundProgram;
pub use parser::parse_program;
pub use program::{Clause, Literal, Program};
