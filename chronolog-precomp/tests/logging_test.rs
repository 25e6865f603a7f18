//! Warnings emitted while building a cache, observed through a capturing
//! subscriber.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use chronolog_core::config::ChronologConfig;
use chronolog_core::traits::{IFactTemplate, IQueryTemplate};
use chronolog_core::{FactInstance, QueryInstance, Term};
use chronolog_precomp::{FormatFactTemplate, FormatQueryTemplate, PrecompilationCache};

const COINS: &str = r#"
    twoHeads(T) :- heads1(T), heads2(T).
    aHead(T, 1) :- heads1(T), \+heads2(T).
"#;

// =============================================================================
// Capture
// =============================================================================

/// `(level, event name)` of every event carrying an `event` field.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<(Level, String)>>>);

impl Captured {
    fn named(&self, name: &str) -> Vec<Level> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, n)| n == name)
            .map(|(level, _)| *level)
            .collect()
    }
}

struct EventName(Option<String>);

impl Visit for EventName {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "event" && self.0.is_none() {
            self.0 = Some(format!("{value:?}").trim_matches('"').to_string());
        }
    }
}

impl<S: Subscriber> Layer<S> for Captured {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut name = EventName(None);
        event.record(&mut name);
        if let Some(name) = name.0 {
            self.0.lock().unwrap().push((*event.metadata().level(), name));
        }
    }
}

fn captured_build(
    facts: &[FactInstance],
    queries: &[QueryInstance],
    config: &ChronologConfig,
) -> Captured {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    tracing::subscriber::with_default(subscriber, || {
        PrecompilationCache::build_with_config(facts, queries, COINS, config).unwrap();
    });
    captured
}

// =============================================================================
// Helpers
// =============================================================================

fn fact(identifier: &str) -> Arc<dyn IFactTemplate> {
    Arc::new(FormatFactTemplate::new(identifier).unwrap())
}

fn two_heads() -> Arc<dyn IQueryTemplate> {
    Arc::new(FormatQueryTemplate::new("twoHeads").unwrap())
}

fn declarations_with_rain() -> Vec<FactInstance> {
    vec![
        FactInstance::declaration(fact("heads1"), 0),
        FactInstance::declaration(fact("heads2"), 0),
        FactInstance::declaration(fact("rain"), 0),
    ]
}

/// Compilation stays on the calling thread so the scoped subscriber sees it.
fn sequential(warn_unbound_facts: bool) -> ChronologConfig {
    let mut config = ChronologConfig::default();
    config.precomp.parallel_compile = false;
    config.precomp.warn_unbound_facts = warn_unbound_facts;
    config
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn unbound_declaration_warns_once() {
    let queries = [QueryInstance::new(two_heads(), 0)];
    let captured = captured_build(&declarations_with_rain(), &queries, &sequential(true));

    assert_eq!(captured.named("fact_unbound"), vec![Level::WARN]);
    assert_eq!(captured.named("entry_compiled"), vec![Level::INFO]);
}

#[test]
fn unbound_warning_can_be_disabled() {
    let queries = [QueryInstance::new(two_heads(), 0)];
    let captured = captured_build(&declarations_with_rain(), &queries, &sequential(false));

    assert!(captured.named("fact_unbound").is_empty());
    assert_eq!(captured.named("entry_compiled").len(), 1);
}

#[test]
fn colliding_query_identifiers_warn() {
    let first: Arc<dyn IQueryTemplate> = Arc::new(
        FormatQueryTemplate::new("aHead")
            .unwrap()
            .with_args(vec![Term::Int(1)]),
    );
    let moved: Arc<dyn IQueryTemplate> = Arc::new(
        FormatQueryTemplate::new("aHead")
            .unwrap()
            .with_args(vec![Term::Int(1)])
            .with_timestamp_arg(1),
    );
    let declarations = vec![
        FactInstance::declaration(fact("heads1"), 0),
        FactInstance::declaration(fact("heads2"), 0),
    ];
    let queries = [QueryInstance::new(first, 0), QueryInstance::new(moved, 0)];
    let captured = captured_build(&declarations, &queries, &sequential(true));

    assert_eq!(captured.named("query_skipped"), vec![Level::WARN]);
    assert_eq!(captured.named("entry_compiled").len(), 1);
}
