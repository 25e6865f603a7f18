mod inference_engine;
mod templates;

pub use inference_engine::{ICompiledCircuit, IInferenceEngine};
pub use templates::{IFactTemplate, IFeedbackDeriver, IQueryTemplate};
