use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

use super::Term;
use crate::errors::ChronologResult;

/// Accumulated results of an evaluation batch, in query-time coordinates.
///
/// Later inserts for an identical term overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResults {
    results: BTreeMap<Term, f64>,
}

impl QueryResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, term: Term, probability: f64) -> Option<f64> {
        self.results.insert(term, probability)
    }

    pub fn get(&self, term: &Term) -> Option<f64> {
        self.results.get(term).copied()
    }

    /// Look up a result by its display text, e.g. `"twoHeads(3)"`.
    /// Whitespace in `text` is ignored.
    pub fn probability_of(&self, text: &str) -> Option<f64> {
        let wanted: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        self.results
            .iter()
            .find(|(term, _)| term.to_string() == wanted)
            .map(|(_, p)| *p)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Term, &f64)> {
        self.results.iter()
    }

    /// JSON object keyed by term text, e.g. `{"twoHeads(0)":0.28}`.
    pub fn to_json(&self) -> ChronologResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn into_inner(self) -> BTreeMap<Term, f64> {
        self.results
    }
}

impl IntoIterator for QueryResults {
    type Item = (Term, f64);
    type IntoIter = std::collections::btree_map::IntoIter<Term, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl Extend<(Term, f64)> for QueryResults {
    fn extend<I: IntoIterator<Item = (Term, f64)>>(&mut self, iter: I) {
        self.results.extend(iter);
    }
}

// Keys serialize as their display text so results are plain JSON objects.
impl Serialize for QueryResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.results.iter().map(|(k, v)| (k.to_string(), v)))
    }
}
