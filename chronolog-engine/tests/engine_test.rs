//! Integration tests for the inference engines.

use chronolog_core::config::{EngineConfig, EngineKind};
use chronolog_core::errors::EngineError;
use chronolog_core::traits::IInferenceEngine;
use chronolog_core::{NodeId, Term};
use chronolog_engine::{engine_for, BddEngine, EnumerationEngine};

const COINS: &str = r#"
    0.4::heads1(0).
    0.7::heads2(0).

    twoHeads(T) :- heads1(T), heads2(T).
    someHeads(T) :- heads1(T) ; heads2(T).
    aHead(T, 1) :- heads1(T), \+heads2(T).
    aHead(T, 2) :- heads2(T), \+heads1(T).
"#;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn t(functor: &str, args: &[i64]) -> Term {
    Term::compound(functor, args.iter().map(|a| Term::Int(*a)).collect())
}

fn with_queries(queries: &[&str]) -> String {
    let mut program = COINS.to_string();
    for q in queries {
        program.push_str(&format!("\nquery({q})."));
    }
    program
}

#[test]
fn bdd_computes_coin_probabilities() {
    let circuit = BddEngine::new()
        .compile(&with_queries(&["twoHeads(0)", "someHeads(0)", "aHead(0, 1)", "aHead(0, 2)"]))
        .unwrap();
    let result = circuit.evaluate(&circuit.weights()).unwrap();

    assert!(close(result[&t("twoHeads", &[0])], 0.28));
    assert!(close(result[&t("someHeads", &[0])], 0.82));
    assert!(close(result[&t("aHead", &[0, 1])], 0.4 * 0.3));
    assert!(close(result[&t("aHead", &[0, 2])], 0.7 * 0.6));
}

#[test]
fn named_nodes_cover_relevant_facts_only() {
    let program = format!("{}\n0.9::unrelated(0).\nquery(twoHeads(0)).", COINS);
    let circuit = BddEngine::new().compile(&program).unwrap();
    let names: Vec<&String> = circuit.named_nodes().keys().collect();
    assert_eq!(names, vec!["heads1(0)", "heads2(0)"]);
}

#[test]
fn evaluation_uses_supplied_weights_without_mutating_circuit() {
    let circuit = BddEngine::new().compile(&with_queries(&["twoHeads(0)"])).unwrap();
    let nodes = circuit.named_nodes().clone();

    let mut weights = circuit.weights();
    weights.set(nodes["heads1(0)"], 1.0).unwrap();
    weights.set(nodes["heads2(0)"], 0.5).unwrap();
    let shifted = circuit.evaluate(&weights).unwrap();
    assert!(close(shifted[&t("twoHeads", &[0])], 0.5));

    // The baseline is untouched.
    let baseline = circuit.evaluate(&circuit.weights()).unwrap();
    assert!(close(baseline[&t("twoHeads", &[0])], 0.28));
}

#[test]
fn weight_vector_of_wrong_length_is_rejected() {
    let circuit = BddEngine::new().compile(&with_queries(&["twoHeads(0)"])).unwrap();
    let err = circuit
        .evaluate(&chronolog_core::WeightVector::zeros(5))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::WeightMismatch {
            expected: 2,
            actual: 5
        }
    );
}

#[test]
fn underivable_query_evaluates_to_zero() {
    let circuit = BddEngine::new().compile(&with_queries(&["twoHeads(7)"])).unwrap();
    let result = circuit.evaluate(&circuit.weights()).unwrap();
    assert_eq!(result[&t("twoHeads", &[7])], 0.0);
    assert!(circuit.named_nodes().is_empty());
}

#[test]
fn zero_probability_facts_stay_addressable() {
    let program = "0.0::heads1(3). 0.0::heads2(3).\n\
                   twoHeads(T) :- heads1(T), heads2(T).\n\
                   query(twoHeads(3)).";
    let circuit = BddEngine::new().compile(program).unwrap();
    assert_eq!(circuit.named_nodes().len(), 2);
    let result = circuit.evaluate(&circuit.weights()).unwrap();
    assert_eq!(result[&t("twoHeads", &[3])], 0.0);

    let mut weights = circuit.weights();
    for node in circuit.named_nodes().values() {
        weights.set(*node, 0.5).unwrap();
    }
    let result = circuit.evaluate(&weights).unwrap();
    assert!(close(result[&t("twoHeads", &[3])], 0.25));
}

#[test]
fn repeated_declarations_combine_as_independent_causes() {
    let program = "0.5::a. 0.0::a. query(a).";
    let circuit = BddEngine::new().compile(program).unwrap();
    // The name refers to the last declaration.
    assert_eq!(circuit.named_nodes()["a"], NodeId(1));

    let mut weights = circuit.weights();
    weights.set(NodeId(1), 0.5).unwrap();
    let result = circuit.evaluate(&weights).unwrap();
    assert!(close(result[&Term::atom("a")], 0.75));
}

#[test]
fn enumeration_agrees_with_bdd_on_coins() {
    let program = with_queries(&["twoHeads(0)", "someHeads(0)", "aHead(T, 1)"]);
    let bdd = BddEngine::new().compile(&program).unwrap();
    let enumeration = EnumerationEngine::new(10).compile(&program).unwrap();

    let a = bdd.evaluate(&bdd.weights()).unwrap();
    let b = enumeration.evaluate(&enumeration.weights()).unwrap();
    assert_eq!(a.len(), b.len());
    for (term, p) in &a {
        assert!(close(*p, b[term]), "{term}: {p} vs {}", b[term]);
    }
}

#[test]
fn enumeration_refuses_large_programs() {
    let program = with_queries(&["someHeads(0)"]);
    let err = EnumerationEngine::new(1).compile(&program).unwrap_err();
    assert!(matches!(err, EngineError::TooManyFacts { count: 2, max: 1 }));
}

#[test]
fn compile_errors_propagate() {
    let engine = BddEngine::new();
    assert!(matches!(
        engine.compile("twoHeads(T) :- ").unwrap_err(),
        EngineError::Parse { .. }
    ));
    assert!(matches!(
        engine.compile("0.5::a. p :- q. q :- p. p :- a. query(p).").unwrap_err(),
        EngineError::CyclicProgram { .. }
    ));
}

#[test]
fn compilation_is_deterministic() {
    let program = with_queries(&["someHeads(0)", "aHead(0, 2)"]);
    let first = BddEngine::new().compile(&program).unwrap();
    let second = BddEngine::new().compile(&program).unwrap();
    assert_eq!(first.named_nodes(), second.named_nodes());
    assert_eq!(
        first.evaluate(&first.weights()).unwrap(),
        second.evaluate(&second.weights()).unwrap()
    );
}

#[test]
fn configured_atom_limit_reaches_both_engines() {
    let runaway = "n(0). n(s(X)) :- n(X). query(n(0)).";
    for kind in [EngineKind::Bdd, EngineKind::Enumeration] {
        let config = EngineConfig {
            kind,
            atom_limit: 50,
            ..EngineConfig::default()
        };
        let err = engine_for(&config).compile(runaway).unwrap_err();
        assert!(
            matches!(err, EngineError::GroundingLimitExceeded { limit: 50 }),
            "{kind:?}: {err:?}"
        );
    }
}
