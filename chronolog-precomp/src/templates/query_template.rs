use chronolog_core::constants::IDENTIFIER_ARG_SEPARATOR;
use chronolog_core::errors::{ChronologResult, TemplateError};
use chronolog_core::traits::{IFeedbackDeriver, IQueryTemplate};
use chronolog_core::Term;

use super::ResultFeedback;
use crate::shift::shift_timestamp_arg;

/// A query family `functor(t, args..)` with fixed extra arguments.
#[derive(Debug, Clone)]
pub struct FormatQueryTemplate {
    functor: String,
    args: Vec<Term>,
    timestamp_arg: usize,
    feedback: Option<ResultFeedback>,
}

impl FormatQueryTemplate {
    pub fn new(functor: impl Into<String>) -> Result<Self, TemplateError> {
        let functor = functor.into();
        if functor.trim().is_empty() {
            return Err(TemplateError::EmptyIdentifier);
        }
        Ok(Self {
            functor,
            args: Vec::new(),
            timestamp_arg: 0,
            feedback: None,
        })
    }

    /// Fixed arguments, in order, around the timestamp.
    pub fn with_args(mut self, args: Vec<Term>) -> Self {
        self.args = args;
        self
    }

    /// Position of the timestamp among the arguments. Positions past the end
    /// place it last.
    pub fn with_timestamp_arg(mut self, position: usize) -> Self {
        self.timestamp_arg = position;
        self
    }

    pub fn with_feedback(mut self, feedback: ResultFeedback) -> Self {
        self.feedback = Some(feedback);
        self
    }

    fn timestamp_position(&self) -> usize {
        self.timestamp_arg.min(self.args.len())
    }

    /// The ground query atom at `timestamp`.
    pub fn query_term(&self, timestamp: i64) -> Term {
        let mut args = self.args.clone();
        args.insert(self.timestamp_position(), Term::Int(timestamp));
        Term::compound(self.functor.clone(), args)
    }
}

impl IQueryTemplate for FormatQueryTemplate {
    fn identifier(&self) -> String {
        std::iter::once(self.functor.clone())
            .chain(self.args.iter().map(Term::to_string))
            .collect::<Vec<_>>()
            .join(IDENTIFIER_ARG_SEPARATOR)
    }

    fn render_query(&self, timestamp: i64) -> String {
        format!("query({}).", self.query_term(timestamp))
    }

    fn translate_result(&self, result: &Term, shift: i64) -> ChronologResult<Term> {
        shift_timestamp_arg(result, self.timestamp_position(), shift)
    }

    fn feedback(&self) -> Option<&dyn IFeedbackDeriver> {
        self.feedback.as_ref().map(|f| f as &dyn IFeedbackDeriver)
    }
}
