//! Key-driven selection scheduling: SJF, SRTF and Priority.
//!
//! All four disciplines share one event-driven loop. They differ only in
//! the dispatching rule that ranks the ready set and in whether a newly
//! arrived process may preempt the running one.
//!
//! # Algorithm
//!
//! 1. Admit every process whose arrival is at or before the clock.
//! 2. If preemptive and a ready process strictly outranks the running one,
//!    close the running interval and return it to the ready set.
//! 3. If the processor is free, dispatch the best ready process, or jump
//!    the clock to the next arrival when nothing is ready.
//! 4. Advance the clock to the running process's completion or, when
//!    preemptive, to the next arrival if that comes first.
//!
//! # Complexity
//! O(n) events, O(n) selection per event: O(n²) overall.

use std::collections::VecDeque;

use log::{debug, trace};

use super::{Algorithm, SimulationOutcome};
use crate::dispatching::rules::{self, PriorityOrder};
use crate::dispatching::RuleEngine;
use crate::models::{ProcessRecord, ProcessSpec, Timeline};
use crate::validation::{ensure_valid, ValidationError};

/// Runs Shortest Job First (non-preemptive).
///
/// Ties on burst go to the lowest pid.
pub fn sjf(processes: &[ProcessSpec]) -> Result<SimulationOutcome, ValidationError> {
    let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
    run_selection(processes, &engine, false, Algorithm::Sjf)
}

/// Runs Shortest Remaining Time First (preemptive SJF).
///
/// A running process is preempted only by a ready process with strictly
/// less remaining service.
///
/// # Example
/// ```
/// use u_cpusched::models::ProcessSpec;
/// use u_cpusched::scheduler::srtf;
///
/// let processes = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 2, 2)];
/// let outcome = srtf(&processes).unwrap();
/// assert_eq!(outcome.timeline.as_tuples(), vec![(1, 0, 2), (2, 2, 4), (1, 4, 7)]);
/// ```
pub fn srtf(processes: &[ProcessSpec]) -> Result<SimulationOutcome, ValidationError> {
    let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);
    run_selection(processes, &engine, true, Algorithm::Srtf)
}

/// Runs non-preemptive priority scheduling.
pub fn priority(
    processes: &[ProcessSpec],
    order: PriorityOrder,
) -> Result<SimulationOutcome, ValidationError> {
    let engine = RuleEngine::new().with_rule(rules::Priority::new(order));
    run_selection(processes, &engine, false, Algorithm::Priority)
}

/// Runs preemptive priority scheduling.
///
/// A running process is preempted only by a ready process with strictly
/// higher priority under `order`.
pub fn priority_preemptive(
    processes: &[ProcessSpec],
    order: PriorityOrder,
) -> Result<SimulationOutcome, ValidationError> {
    let engine = RuleEngine::new().with_rule(rules::Priority::new(order));
    run_selection(processes, &engine, true, Algorithm::PriorityPreemptive)
}

/// Shared selection loop.
///
/// Public so callers can plug in their own rule combinations; the
/// `algorithm` tag is only recorded in the outcome.
pub fn run_selection(
    processes: &[ProcessSpec],
    engine: &RuleEngine,
    preemptive: bool,
    algorithm: Algorithm,
) -> Result<SimulationOutcome, ValidationError> {
    ensure_valid(processes)?;

    let mut records: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::from_spec).collect();

    let mut by_arrival: Vec<usize> = (0..records.len()).collect();
    RuleEngine::new()
        .with_rule(rules::Fifo)
        .sort_indices(&records, &mut by_arrival);
    let mut pending: VecDeque<usize> = by_arrival.into();
    debug!("{algorithm}: ranking by {}", engine.describe());

    let mut ready: Vec<usize> = Vec::new();
    let mut finished: Vec<usize> = Vec::with_capacity(records.len());
    // (record index, start of the current interval)
    let mut running: Option<(usize, i64)> = None;
    let mut timeline = Timeline::new();
    let mut time: i64 = 0;

    loop {
        while let Some(&next) = pending.front() {
            if records[next].arrival > time {
                break;
            }
            trace!("{algorithm}: P{} ready at {}", records[next].pid, time);
            ready.push(next);
            pending.pop_front();
        }

        if preemptive {
            if let (Some((current, started)), Some(pos)) = (running, engine.select(&records, &ready)) {
                let challenger = ready[pos];
                if engine.preempts(&records[challenger], &records[current]) {
                    debug!(
                        "{algorithm}: P{} preempts P{} at {}",
                        records[challenger].pid, records[current].pid, time
                    );
                    timeline.push(records[current].pid, started, time);
                    ready.push(current);
                    running = None;
                }
            }
        }

        let (current, started) = match running {
            Some(slot) => slot,
            None => match engine.select(&records, &ready) {
                Some(pos) => {
                    let idx = ready.swap_remove(pos);
                    records[idx].mark_dispatched(time);
                    debug!("{algorithm}: dispatch P{} at {}", records[idx].pid, time);
                    running = Some((idx, time));
                    (idx, time)
                }
                None => match pending.front() {
                    Some(&next) => {
                        trace!("{algorithm}: idle {}..{}", time, records[next].arrival);
                        time = records[next].arrival;
                        continue;
                    }
                    None => break,
                },
            },
        };

        let finish_at = time + records[current].remaining_burst;
        let next_event = if preemptive {
            pending
                .front()
                .map(|&i| records[i].arrival)
                .filter(|&arrival| arrival < finish_at)
                .unwrap_or(finish_at)
        } else {
            finish_at
        };

        records[current].execute(next_event - time);
        time = next_event;

        if records[current].is_finished() {
            records[current].complete(time);
            timeline.push(records[current].pid, started, time);
            debug!("{algorithm}: P{} completes at {}", records[current].pid, time);
            finished.push(current);
            running = None;
        }
    }

    let mut slots: Vec<Option<ProcessRecord>> = records.into_iter().map(Some).collect();
    let completed = finished
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    Ok(SimulationOutcome::new(algorithm, completed, timeline))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{verify_outcome, ValidationErrorKind};

    fn classic() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new(1, 0, 8),
            ProcessSpec::new(2, 1, 4),
            ProcessSpec::new(3, 2, 9),
            ProcessSpec::new(4, 3, 5),
        ]
    }

    fn waits(outcome: &SimulationOutcome, pid: u32) -> i64 {
        outcome.record_for(pid).unwrap().waiting_time.unwrap()
    }

    // ======================== SJF ========================

    #[test]
    fn test_sjf_non_preemptive() {
        let outcome = sjf(&classic()).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 8), (2, 8, 12), (4, 12, 17), (3, 17, 26)]
        );
        assert_eq!(outcome.completion_order(), vec![1, 2, 4, 3]);
        assert_eq!(waits(&outcome, 1), 0);
        assert_eq!(waits(&outcome, 2), 7);
        assert_eq!(waits(&outcome, 4), 9);
        assert_eq!(waits(&outcome, 3), 15);
        assert!(verify_outcome(&classic(), &outcome).is_ok());
    }

    #[test]
    fn test_sjf_tie_lowest_pid() {
        let processes = vec![ProcessSpec::new(2, 0, 3), ProcessSpec::new(1, 0, 3)];
        let outcome = sjf(&processes).unwrap();
        assert_eq!(outcome.timeline.as_tuples(), vec![(1, 0, 3), (2, 3, 6)]);
    }

    #[test]
    fn test_sjf_idle_until_first_arrival() {
        let processes = vec![ProcessSpec::new(1, 5, 2), ProcessSpec::new(2, 10, 1)];
        let outcome = sjf(&processes).unwrap();
        assert_eq!(outcome.timeline.as_tuples(), vec![(1, 5, 7), (2, 10, 11)]);
        assert_eq!(outcome.timeline.idle_time(5), 3);
    }

    // ======================== SRTF ========================

    #[test]
    fn test_srtf_classic() {
        let outcome = srtf(&classic()).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 1), (2, 1, 5), (4, 5, 10), (1, 10, 17), (3, 17, 26)]
        );
        assert_eq!(waits(&outcome, 1), 9);
        assert_eq!(waits(&outcome, 2), 0);
        assert_eq!(waits(&outcome, 3), 15);
        assert_eq!(waits(&outcome, 4), 2);
        assert_eq!(outcome.context_switches, 4);
        assert!(verify_outcome(&classic(), &outcome).is_ok());
    }

    #[test]
    fn test_srtf_splits_at_arrival_instant() {
        let processes = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 2, 2)];
        let outcome = srtf(&processes).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 7)]
        );
    }

    #[test]
    fn test_srtf_response_fixed_at_first_dispatch() {
        let processes = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 2, 2)];
        let outcome = srtf(&processes).unwrap();
        let p1 = outcome.record_for(1).unwrap();
        assert_eq!(p1.start_time, Some(0));
        assert_eq!(p1.response_time, Some(0));
        assert_eq!(p1.waiting_time, Some(2));
    }

    #[test]
    fn test_srtf_equal_remaining_does_not_preempt() {
        let processes = vec![ProcessSpec::new(2, 0, 5), ProcessSpec::new(1, 2, 3)];
        let outcome = srtf(&processes).unwrap();
        assert_eq!(outcome.timeline.as_tuples(), vec![(2, 0, 5), (1, 5, 8)]);
    }

    #[test]
    fn test_srtf_non_preempting_arrival_keeps_interval() {
        let processes = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 2, 10)];
        let outcome = srtf(&processes).unwrap();
        assert_eq!(outcome.timeline.as_tuples(), vec![(1, 0, 5), (2, 5, 15)]);
        assert_eq!(outcome.context_switches, 1);
    }

    // ======================== Priority ========================

    fn prioritized() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new(1, 0, 4).with_priority(3),
            ProcessSpec::new(2, 1, 3).with_priority(1),
            ProcessSpec::new(3, 2, 2).with_priority(2),
        ]
    }

    #[test]
    fn test_priority_non_preemptive_ascending() {
        let outcome = priority(&prioritized(), PriorityOrder::LowerFirst).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 4), (2, 4, 7), (3, 7, 9)]
        );
        assert!(verify_outcome(&prioritized(), &outcome).is_ok());
    }

    #[test]
    fn test_priority_non_preemptive_descending() {
        let outcome = priority(&prioritized(), PriorityOrder::HigherFirst).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 4), (3, 4, 6), (2, 6, 9)]
        );
    }

    #[test]
    fn test_priority_preemptive() {
        let outcome = priority_preemptive(&prioritized(), PriorityOrder::LowerFirst).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 1), (2, 1, 4), (3, 4, 6), (1, 6, 9)]
        );
        let p1 = outcome.record_for(1).unwrap();
        assert_eq!(p1.response_time, Some(0));
        assert_eq!(p1.waiting_time, Some(5));
        assert_eq!(outcome.context_switches, 3);
        assert!(verify_outcome(&prioritized(), &outcome).is_ok());
    }

    #[test]
    fn test_priority_preemptive_descending() {
        // Higher value wins: P1 (3) is never preempted.
        let outcome = priority_preemptive(&prioritized(), PriorityOrder::HigherFirst).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 4), (3, 4, 6), (2, 6, 9)]
        );
    }

    #[test]
    fn test_priority_tie_lowest_pid() {
        let processes = vec![
            ProcessSpec::new(5, 0, 1).with_priority(1),
            ProcessSpec::new(3, 0, 1).with_priority(1),
            ProcessSpec::new(4, 0, 1).with_priority(1),
        ];
        let outcome = priority(&processes, PriorityOrder::LowerFirst).unwrap();
        assert_eq!(outcome.completion_order(), vec![3, 4, 5]);
    }

    #[test]
    fn test_custom_rule_tie_breaker() {
        // FIFO tie-breaker: equal bursts go by arrival, not pid.
        let processes = vec![
            ProcessSpec::new(1, 0, 6),
            ProcessSpec::new(3, 1, 2),
            ProcessSpec::new(2, 2, 2),
        ];
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(rules::Fifo);
        let outcome = run_selection(&processes, &engine, false, Algorithm::Sjf).unwrap();
        assert_eq!(outcome.completion_order(), vec![1, 3, 2]);

        let by_pid = sjf(&processes).unwrap();
        assert_eq!(by_pid.completion_order(), vec![1, 2, 3]);
    }

    #[test]
    fn test_selection_rejects_invalid() {
        let err = srtf(&[ProcessSpec::new(1, 0, -4)]).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveBurst);
    }

    #[test]
    fn test_selection_idempotent() {
        let processes = classic();
        assert_eq!(srtf(&processes).unwrap(), srtf(&processes).unwrap());
        assert_eq!(
            priority_preemptive(&prioritized(), PriorityOrder::LowerFirst).unwrap(),
            priority_preemptive(&prioritized(), PriorityOrder::LowerFirst).unwrap()
        );
    }
}
