//! Property tests for time-shift correctness and determinism.

use std::sync::Arc;

use proptest::prelude::*;

use chronolog_core::config::EngineKind;
use chronolog_core::traits::{IFactTemplate, IQueryTemplate};
use chronolog_core::{FactInstance, QueryInstance, QueryResults};
use chronolog_precomp::shift::shift_timestamp_arg;
use chronolog_precomp::{FormatFactTemplate, FormatQueryTemplate, PrecompilationCache};

const COINS: &str = r#"
    twoHeads(T) :- heads1(T), heads2(T).
    someHeads(T) :- heads1(T) ; heads2(T).
    aHead(T, 1) :- heads1(T), \+heads2(T).
"#;

struct Setup {
    facts: [Arc<dyn IFactTemplate>; 2],
    queries: [Arc<dyn IQueryTemplate>; 3],
}

impl Setup {
    fn new() -> Self {
        let fact = |id: &str| -> Arc<dyn IFactTemplate> { Arc::new(FormatFactTemplate::new(id).unwrap()) };
        let query = |functor: &str, args: Vec<chronolog_core::Term>| -> Arc<dyn IQueryTemplate> {
            Arc::new(FormatQueryTemplate::new(functor).unwrap().with_args(args))
        };
        Self {
            facts: [fact("heads1"), fact("heads2")],
            queries: [
                query("twoHeads", vec![]),
                query("someHeads", vec![]),
                query("aHead", vec![chronolog_core::Term::Int(1)]),
            ],
        }
    }

    fn cache(&self, base: i64) -> PrecompilationCache {
        let declarations: Vec<FactInstance> = self
            .facts
            .iter()
            .map(|f| FactInstance::declaration(f.clone(), base))
            .collect();
        PrecompilationCache::build(&declarations, &self.at(base), COINS, EngineKind::Bdd).unwrap()
    }

    fn at(&self, t: i64) -> Vec<QueryInstance> {
        self.queries.iter().map(|q| QueryInstance::new(q.clone(), t)).collect()
    }

    /// Events `(coin, offset, p)` placed relative to `t`.
    fn events(&self, t: i64, spec: &[(usize, i64, f64)]) -> Vec<FactInstance> {
        spec.iter()
            .map(|&(coin, offset, p)| FactInstance::new(self.facts[coin % 2].clone(), t + offset, p).unwrap())
            .collect()
    }
}

fn shifted(results: &QueryResults, delta: i64) -> QueryResults {
    let mut out = QueryResults::new();
    for (term, p) in results.iter() {
        out.insert(shift_timestamp_arg(term, 0, delta).unwrap(), *p);
    }
    out
}

fn event_spec() -> impl Strategy<Value = Vec<(usize, i64, f64)>> {
    prop::collection::vec((0_usize..2, -2_i64..3, 0.0_f64..=1.0), 0..8)
}

proptest! {
    #[test]
    fn shifting_inputs_shifts_results(
        base in -20_i64..20,
        t in -50_i64..50,
        delta in -50_i64..50,
        spec in event_spec(),
    ) {
        let setup = Setup::new();
        let cache = setup.cache(base);

        let original = cache.evaluate(&setup.at(t), &setup.events(t, &spec), false).unwrap();
        let moved = cache
            .evaluate(&setup.at(t + delta), &setup.events(t + delta, &spec), false)
            .unwrap();

        prop_assert_eq!(shifted(&original, delta), moved);
    }

    #[test]
    fn evaluation_is_deterministic(base in -5_i64..5, t in -10_i64..10, spec in event_spec()) {
        let setup = Setup::new();
        let events = setup.events(t, &spec);

        let first = setup.cache(base).evaluate(&setup.at(t), &events, false).unwrap();
        let second = setup.cache(base).evaluate(&setup.at(t), &events, false).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn results_match_fresh_compilation(t in -10_i64..10, spec in event_spec()) {
        let setup = Setup::new();
        let events = setup.events(t, &spec);

        let reused = setup.cache(0).evaluate(&setup.at(t), &events, false).unwrap();
        let fresh = setup.cache(t).evaluate(&setup.at(t), &events, false).unwrap();
        prop_assert_eq!(reused, fresh);
    }
}
