use std::sync::Arc;

use chronolog_core::errors::ChronologResult;
use chronolog_core::traits::{IFactTemplate, IFeedbackDeriver};
use chronolog_core::{Evaluation, FactInstance, Term};

use crate::shift::shifted;

/// Turns every result `r(t0, ..) = p` into an event of `target` at
/// `t0 + shift + offset` with probability `p`.
#[derive(Debug, Clone)]
pub struct ResultFeedback {
    target: Arc<dyn IFactTemplate>,
    offset: i64,
    timestamp_arg: usize,
}

impl ResultFeedback {
    pub fn new(target: Arc<dyn IFactTemplate>, offset: i64) -> Self {
        Self {
            target,
            offset,
            timestamp_arg: 0,
        }
    }

    /// Read the result timestamp from argument `position` instead of the first.
    pub fn with_timestamp_arg(mut self, position: usize) -> Self {
        self.timestamp_arg = position;
        self
    }

    pub fn target(&self) -> &Arc<dyn IFactTemplate> {
        &self.target
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl IFeedbackDeriver for ResultFeedback {
    /// Results without an integer timestamp produce no event.
    fn derive(&self, raw: &Evaluation, shift: i64) -> ChronologResult<Vec<FactInstance>> {
        let mut derived = Vec::with_capacity(raw.len());
        for (term, &probability) in raw {
            let Some(t0) = term.args().get(self.timestamp_arg).and_then(Term::as_int) else {
                continue;
            };
            let timestamp = shifted(shifted(t0, shift)?, self.offset)?;
            derived.push(FactInstance::new(self.target.clone(), timestamp, probability)?);
        }
        Ok(derived)
    }
}
