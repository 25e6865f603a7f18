use std::fmt::Debug;

use crate::errors::ChronologResult;
use crate::models::{Evaluation, FactInstance, Term};

/// A family of timestamp-indexed probabilistic facts sharing one identifier.
pub trait IFactTemplate: Send + Sync + Debug {
    /// Stable family key.
    fn identifier(&self) -> &str;

    /// Render one self-contained fact declaration. Must be pure.
    fn render(&self, timestamp: i64, probability: f64) -> String;
}

/// A family of timestamp-indexed queries sharing one identifier.
pub trait IQueryTemplate: Send + Sync + Debug {
    /// Stable family key, including any fixed extra arguments.
    fn identifier(&self) -> String;

    /// Render the query declaration for `timestamp`.
    fn render_query(&self, timestamp: i64) -> String;

    /// Map a result in compile-time coordinates to query-time coordinates by
    /// adding `shift` to its timestamp, leaving other arguments untouched.
    fn translate_result(&self, result: &Term, shift: i64) -> ChronologResult<Term>;

    /// Optional feedback capability. `None` means feedback is unsupported.
    fn feedback(&self) -> Option<&dyn IFeedbackDeriver> {
        None
    }
}

/// Turns a query's raw results into input events for later queries.
pub trait IFeedbackDeriver: Send + Sync + Debug {
    /// `raw` is in compile-time coordinates; `shift` is the query's time shift.
    fn derive(&self, raw: &Evaluation, shift: i64) -> ChronologResult<Vec<FactInstance>>;
}
