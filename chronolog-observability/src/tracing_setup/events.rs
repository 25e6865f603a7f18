//! Structured log events for compile and evaluate milestones.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log the compilation of one cache entry.
pub fn entry_compiled(identifier: &str, base_timestamp: i64, tracked: usize, circuit_size: usize) {
    tracing::info!(
        event = "entry_compiled",
        identifier = %identifier,
        base_timestamp = base_timestamp,
        tracked = tracked,
        circuit_size = circuit_size,
        "entry compiled"
    );
}

/// Log a declared fact that has no node in the compiled circuit. Events for
/// it will have no effect on the entry.
pub fn fact_unbound(identifier: &str, fact: &str) {
    tracing::warn!(
        event = "fact_unbound",
        identifier = %identifier,
        fact = %fact,
        "fact not bound to any circuit node"
    );
}

/// Log a query declaration skipped because an earlier one has the same
/// identifier. The family is compiled only at the first one's timestamp.
pub fn query_skipped(identifier: &str, timestamp: i64) {
    tracing::warn!(
        event = "query_skipped",
        identifier = %identifier,
        timestamp = timestamp,
        "duplicate query identifier skipped"
    );
}

/// Log the evaluation of one query instance.
pub fn query_evaluated(identifier: &str, shift: i64, matched: usize, results: usize) {
    tracing::debug!(
        event = "query_evaluated",
        identifier = %identifier,
        shift = shift,
        matched = matched,
        results = results,
        "query evaluated"
    );
}

/// Log feedback events appended after a query.
pub fn feedback_appended(identifier: &str, count: usize) {
    tracing::debug!(
        event = "feedback_appended",
        identifier = %identifier,
        count = count,
        "feedback events appended"
    );
}

/// Log completion of an evaluate call.
pub fn evaluation_completed(queries: usize, results: usize, feedback: bool) {
    tracing::info!(
        event = "evaluation_completed",
        queries = queries,
        results = results,
        feedback = feedback,
        "evaluation completed"
    );
}
