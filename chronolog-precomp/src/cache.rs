//! The precompilation cache.
//!
//! Building compiles one entry per distinct query identifier. Evaluation
//! answers any timestamp of a compiled family without recompiling: events
//! are moved into the entry's frame, every tracked node is given a fresh
//! weight, and results are shifted back.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use chronolog_core::config::{ChronologConfig, EngineConfig, EngineKind, PrecompConfig};
use chronolog_core::errors::{ChronologError, ChronologResult};
use chronolog_core::traits::IInferenceEngine;
use chronolog_core::{FactInstance, QueryInstance, QueryResults};
use chronolog_engine::engine_for;
use chronolog_observability::evaluate_span;
use chronolog_observability::tracing_setup::events as trace_events;
use rayon::prelude::*;
use tracing::info;

use crate::entry::PrecompiledEntry;
use crate::shift::{rebase_events, time_shift};

/// Compiled query families keyed by identifier.
#[derive(Debug, Default)]
pub struct PrecompilationCache {
    entries: BTreeMap<String, PrecompiledEntry>,
}

impl PrecompilationCache {
    /// Build with the given engine and default settings otherwise.
    pub fn build(
        facts: &[FactInstance],
        queries: &[QueryInstance],
        program: &str,
        engine: EngineKind,
    ) -> ChronologResult<Self> {
        let config = ChronologConfig {
            engine: EngineConfig {
                kind: engine,
                ..EngineConfig::default()
            },
            ..ChronologConfig::default()
        };
        Self::build_with_config(facts, queries, program, &config)
    }

    pub fn build_with_config(
        facts: &[FactInstance],
        queries: &[QueryInstance],
        program: &str,
        config: &ChronologConfig,
    ) -> ChronologResult<Self> {
        let engine = engine_for(&config.engine);
        Self::compile_all(facts, queries, program, engine.as_ref(), &config.precomp)
    }

    /// Build with a caller-supplied engine.
    pub fn build_with_engine(
        facts: &[FactInstance],
        queries: &[QueryInstance],
        program: &str,
        engine: &dyn IInferenceEngine,
    ) -> ChronologResult<Self> {
        Self::compile_all(facts, queries, program, engine, &PrecompConfig::default())
    }

    /// Build from a program stored on disk.
    pub fn build_from_file(
        facts: &[FactInstance],
        queries: &[QueryInstance],
        path: impl AsRef<Path>,
        config: &ChronologConfig,
    ) -> ChronologResult<Self> {
        let path = path.as_ref();
        let program = std::fs::read_to_string(path).map_err(|e| ChronologError::ProgramLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::build_with_config(facts, queries, &program, config)
    }

    fn compile_all(
        facts: &[FactInstance],
        queries: &[QueryInstance],
        program: &str,
        engine: &dyn IInferenceEngine,
        config: &PrecompConfig,
    ) -> ChronologResult<Self> {
        let mut seen = HashSet::new();
        let distinct: Vec<&QueryInstance> = queries
            .iter()
            .filter(|q| {
                let fresh = seen.insert(q.identifier());
                if !fresh {
                    trace_events::query_skipped(&q.identifier(), q.timestamp());
                }
                fresh
            })
            .collect();

        let compile = |q: &&QueryInstance| PrecompiledEntry::compile(q, facts, program, engine, config);
        let compiled: Vec<ChronologResult<PrecompiledEntry>> = if config.parallel_compile {
            distinct.par_iter().map(compile).collect()
        } else {
            distinct.iter().map(compile).collect()
        };

        let mut entries = BTreeMap::new();
        for entry in compiled {
            let entry = entry?;
            entries.insert(entry.identifier().to_string(), entry);
        }

        info!(
            engine = engine.name(),
            entries = entries.len(),
            facts = facts.len(),
            "precompilation cache built"
        );
        Ok(Self { entries })
    }

    /// Answer `queries` in order against the compiled entries.
    ///
    /// Every query must have an entry, and when `feedback` is set every query
    /// must support it; both are checked before anything is evaluated.
    /// With feedback, events derived from each query's results are visible
    /// to the queries after it.
    pub fn evaluate(
        &self,
        queries: &[QueryInstance],
        events: &[FactInstance],
        feedback: bool,
    ) -> ChronologResult<QueryResults> {
        let span = evaluate_span!(queries.len(), events.len());
        let _guard = span.enter();

        let mut plan = Vec::with_capacity(queries.len());
        for query in queries {
            let identifier = query.identifier();
            let entry = self
                .entries
                .get(&identifier)
                .ok_or_else(|| ChronologError::NotPrecompiled {
                    identifier: identifier.clone(),
                })?;
            let deriver = if feedback {
                let deriver = query
                    .template()
                    .feedback()
                    .ok_or_else(|| ChronologError::FeedbackUnsupported {
                        identifier: identifier.clone(),
                    })?;
                Some(deriver)
            } else {
                None
            };
            plan.push((query, identifier, entry, deriver));
        }

        let mut available = events.to_vec();
        let mut results = QueryResults::new();

        for (query, identifier, entry, deriver) in plan {
            let shift = time_shift(query.timestamp(), entry.base_timestamp())?;
            let rebased = rebase_events(&available, shift);
            let (weights, matched) = entry.assign_weights(&rebased)?;
            let raw = entry.evaluate(&weights)?;

            for (term, &probability) in &raw {
                results.insert(query.template().translate_result(term, shift)?, probability);
            }
            trace_events::query_evaluated(&identifier, shift, matched, raw.len());

            if let Some(deriver) = deriver {
                let derived = deriver.derive(&raw, shift)?;
                trace_events::feedback_appended(&identifier, derived.len());
                available.extend(derived);
            }
        }

        trace_events::evaluation_completed(queries.len(), results.len(), feedback);
        Ok(results)
    }

    /// Compiled identifiers, sorted.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entry(&self, identifier: &str) -> Option<&PrecompiledEntry> {
        self.entries.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
