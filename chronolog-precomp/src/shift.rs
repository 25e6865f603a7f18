//! Timestamp translation between query time and an entry's compile frame.

use std::collections::HashMap;

use chronolog_core::errors::{ChronologError, ChronologResult};
use chronolog_core::{FactInstance, Term};
use tracing::debug;

use crate::binding::normalize;

/// Steps between a query instance and the entry compiled for its family.
pub fn time_shift(query_timestamp: i64, base_timestamp: i64) -> ChronologResult<i64> {
    query_timestamp
        .checked_sub(base_timestamp)
        .ok_or(ChronologError::TimestampOverflow {
            timestamp: query_timestamp,
            shift: base_timestamp.saturating_neg(),
        })
}

/// Add `shift` to `timestamp`.
pub fn shifted(timestamp: i64, shift: i64) -> ChronologResult<i64> {
    timestamp
        .checked_add(shift)
        .ok_or(ChronologError::TimestampOverflow { timestamp, shift })
}

/// Move every event `shift` steps back and key it by its whitespace-free
/// mock rendering. The first event producing a given key wins.
///
/// An event whose moved timestamp does not fit in an `i64` cannot match any
/// compiled fact and is left out.
pub fn rebase_events(events: &[FactInstance], shift: i64) -> HashMap<String, f64> {
    let mut rebased = HashMap::with_capacity(events.len());
    for event in events {
        let Some(mock) = event.rebased_mock(shift) else {
            debug!(
                identifier = event.identifier(),
                timestamp = event.timestamp(),
                shift,
                "event outside the compiled frame"
            );
            continue;
        };
        rebased
            .entry(normalize(&mock))
            .or_insert_with(|| event.probability());
    }
    rebased
}

/// Add `shift` to the integer argument at `position`. Terms whose argument
/// there is missing or not an integer come back unchanged.
pub fn shift_timestamp_arg(term: &Term, position: usize, shift: i64) -> ChronologResult<Term> {
    match term.args().get(position).and_then(Term::as_int) {
        Some(timestamp) => Ok(term.with_arg(position, Term::Int(shifted(timestamp, shift)?))),
        None => Ok(term.clone()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chronolog_core::traits::IFactTemplate;

    use super::*;
    use crate::templates::FormatFactTemplate;

    fn heads(id: &str) -> Arc<dyn IFactTemplate> {
        Arc::new(FormatFactTemplate::new(id).unwrap())
    }

    #[test]
    fn shift_is_query_minus_base() {
        assert_eq!(time_shift(5, 0).unwrap(), 5);
        assert_eq!(time_shift(-2, 3).unwrap(), -5);
    }

    #[test]
    fn extreme_timestamps_report_overflow() {
        assert!(matches!(
            time_shift(i64::MIN, 5),
            Err(ChronologError::TimestampOverflow { timestamp: i64::MIN, shift: -5 })
        ));
        assert_eq!(time_shift(i64::MAX, 5).unwrap(), i64::MAX - 5);

        let term = Term::compound("twoHeads", vec![Term::Int(1)]);
        assert!(matches!(
            shift_timestamp_arg(&term, 0, i64::MAX),
            Err(ChronologError::TimestampOverflow { timestamp: 1, .. })
        ));
    }

    #[test]
    fn events_outside_the_frame_are_left_out() {
        let h1 = heads("heads1");
        let events = vec![
            FactInstance::new(h1.clone(), -10, 0.3).unwrap(),
            FactInstance::new(h1, i64::MAX, 0.6).unwrap(),
        ];
        let rebased = rebase_events(&events, i64::MAX - 5);
        assert_eq!(rebased.len(), 1);
        assert_eq!(rebased["0::heads1(5)."], 0.6);
    }

    #[test]
    fn rebasing_keeps_first_event_per_key() {
        let h1 = heads("heads1");
        let events = vec![
            FactInstance::new(h1.clone(), 3, 0.4).unwrap(),
            FactInstance::new(h1.clone(), 3, 0.9).unwrap(),
            FactInstance::new(h1, 4, 0.1).unwrap(),
        ];
        let rebased = rebase_events(&events, 3);
        assert_eq!(rebased.len(), 2);
        assert_eq!(rebased["0::heads1(0)."], 0.4);
        assert_eq!(rebased["0::heads1(1)."], 0.1);
    }

    #[test]
    fn timestamp_argument_shifts_in_place() {
        let term = Term::compound("aHead", vec![Term::Int(0), Term::Int(1)]);
        assert_eq!(shift_timestamp_arg(&term, 0, 4).unwrap().to_string(), "aHead(4,1)");
        assert_eq!(shift_timestamp_arg(&term, 1, 4).unwrap().to_string(), "aHead(0,5)");
        assert_eq!(shift_timestamp_arg(&term, 2, 4).unwrap(), term);
        assert_eq!(
            shift_timestamp_arg(&Term::atom("done"), 0, 4).unwrap(),
            Term::atom("done")
        );
    }
}
