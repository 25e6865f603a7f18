//! Property tests: the BDD compiler agrees with possible-world enumeration.

use proptest::prelude::*;

use chronolog_core::traits::IInferenceEngine;
use chronolog_engine::{BddEngine, EnumerationEngine};

/// Fact probabilities and rule bodies. Rule `i` defines `d{i}`; a literal
/// `(k, positive)` refers to fact `k` or to an earlier rule, so the program
/// is acyclic by construction.
fn program_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<Vec<(usize, bool)>>)> {
    (2_usize..6).prop_flat_map(|n_facts| {
        (
            prop::collection::vec(0.0_f64..=1.0, n_facts),
            prop::collection::vec(
                prop::collection::vec((0_usize..100, any::<bool>()), 1..4),
                1..6,
            ),
        )
    })
}

fn render(facts: &[f64], rules: &[Vec<(usize, bool)>]) -> String {
    let mut out = String::new();
    for (i, p) in facts.iter().enumerate() {
        out.push_str(&format!("{p}::f{i}.\n"));
    }
    for (i, body) in rules.iter().enumerate() {
        let literals: Vec<String> = body
            .iter()
            .map(|&(k, positive)| {
                let k = k % (facts.len() + i);
                let atom = if k < facts.len() {
                    format!("f{k}")
                } else {
                    format!("d{}", k - facts.len())
                };
                if positive {
                    atom
                } else {
                    format!("\\+{atom}")
                }
            })
            .collect();
        out.push_str(&format!("d{i} :- {}.\n", literals.join(", ")));
    }
    for i in 0..rules.len() {
        out.push_str(&format!("query(d{i}).\n"));
    }
    out
}

proptest! {
    #[test]
    fn bdd_matches_enumeration((facts, rules) in program_strategy()) {
        let program = render(&facts, &rules);
        let bdd = BddEngine::new().compile(&program).unwrap();
        let reference = EnumerationEngine::new(16).compile(&program).unwrap();

        prop_assert_eq!(bdd.named_nodes(), reference.named_nodes());

        let a = bdd.evaluate(&bdd.weights()).unwrap();
        let b = reference.evaluate(&reference.weights()).unwrap();
        prop_assert_eq!(a.len(), b.len());
        for (term, p) in &a {
            prop_assert!((p - b[term]).abs() < 1e-9, "{}: {} vs {}", term, p, b[term]);
        }
    }

    #[test]
    fn probabilities_stay_in_unit_interval(
        (facts, rules) in program_strategy(),
        override_weight in 0.0_f64..=1.0,
    ) {
        let program = render(&facts, &rules);
        let circuit = BddEngine::new().compile(&program).unwrap();
        let mut weights = circuit.weights();
        for node in circuit.named_nodes().values() {
            weights.set(*node, override_weight).unwrap();
        }
        for p in circuit.evaluate(&weights).unwrap().values() {
            prop_assert!((-1e-12..=1.0 + 1e-12).contains(p));
        }
    }
}
