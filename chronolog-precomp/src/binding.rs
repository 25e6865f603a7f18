//! Binding declared facts to named circuit nodes.
//!
//! Node names are the engine's whitespace-free rendering of a ground atom,
//! so a mock declaration such as `0::heads1( 0 ).` is reduced to `heads1(0)`
//! before lookup.

use std::collections::{BTreeMap, HashSet};

use chronolog_core::constants::PROBABILITY_SEPARATOR;
use chronolog_core::{FactInstance, NodeId};

/// Remove every whitespace character.
pub fn normalize(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The node name a mock declaration should resolve to: the normalized text
/// after the probability separator, without the terminating `.`.
pub fn node_name(mock_text: &str) -> String {
    let normalized = normalize(mock_text);
    let atom = match normalized.split_once(PROBABILITY_SEPARATOR) {
        Some((_, atom)) => atom,
        None => normalized.as_str(),
    };
    atom.strip_suffix('.').unwrap_or(atom).to_string()
}

/// A declared fact whose weight is controlled on every evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFact {
    /// Mock rendering as declared.
    pub mock_text: String,
    /// `mock_text` without whitespace; rebased events are matched against it.
    pub key: String,
    pub node: NodeId,
}

/// Result of binding a set of declarations against a circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeBinding {
    pub tracked: Vec<TrackedFact>,
    /// Mock texts with no node in the circuit.
    pub unbound: Vec<String>,
}

/// Resolve each declaration's mock to a named node. Declarations rendering
/// to the same text are bound once.
pub fn bind_nodes(declarations: &[FactInstance], named: &BTreeMap<String, NodeId>) -> NodeBinding {
    let mut binding = NodeBinding::default();
    let mut seen = HashSet::new();

    for declaration in declarations {
        let mock_text = declaration.instantiate_mock();
        let key = normalize(&mock_text);
        if !seen.insert(key.clone()) {
            continue;
        }
        match named.get(&node_name(&mock_text)) {
            Some(&node) => binding.tracked.push(TrackedFact {
                mock_text,
                key,
                node,
            }),
            None => binding.unbound.push(mock_text),
        }
    }
    binding
}
