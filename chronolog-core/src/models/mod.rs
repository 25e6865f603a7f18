mod fact_instance;
mod query_instance;
mod query_results;
mod term;
mod weights;

use std::collections::BTreeMap;

pub use fact_instance::FactInstance;
pub use query_instance::QueryInstance;
pub use query_results::QueryResults;
pub use term::Term;
pub use weights::{NodeId, WeightVector};

/// Raw circuit output: query term → probability, in compile-time coordinates.
pub type Evaluation = BTreeMap<Term, f64>;
