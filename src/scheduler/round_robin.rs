//! Round Robin.
//!
//! # Algorithm
//!
//! 1. Admit arrived processes to a FIFO ready queue in `(arrival, pid)` order.
//! 2. Run the head for `min(quantum, remaining)` units.
//! 3. Admit every process that arrived during the slice, including at its
//!    final instant.
//! 4. Re-enqueue the just-run process at the tail if it has work left.
//!
//! Step 3 before step 4 means newcomers go ahead of the returning process.
//!
//! # Complexity
//! O(n + B / q) slices for total burst B and quantum q.

use std::collections::VecDeque;

use log::{debug, trace};

use super::{Algorithm, SimulationOutcome};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{ProcessRecord, ProcessSpec, Timeline};
use crate::validation::{ensure_valid, validate_quantum, ValidationError};

/// Runs Round Robin with the given time quantum.
///
/// Back-to-back slices of the same process (nothing else ready) form a
/// single execution interval.
///
/// # Example
/// ```
/// use u_cpusched::models::ProcessSpec;
/// use u_cpusched::scheduler::round_robin;
///
/// let processes = vec![ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 1, 5)];
/// let outcome = round_robin(&processes, 2).unwrap();
/// assert_eq!(
///     outcome.timeline.as_tuples(),
///     vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 9)]
/// );
/// ```
pub fn round_robin(
    processes: &[ProcessSpec],
    time_quantum: i64,
) -> Result<SimulationOutcome, ValidationError> {
    validate_quantum(time_quantum)?;
    ensure_valid(processes)?;

    let mut records: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::from_spec).collect();

    let mut by_arrival: Vec<usize> = (0..records.len()).collect();
    RuleEngine::new()
        .with_rule(rules::Fifo)
        .sort_indices(&records, &mut by_arrival);
    let mut pending: VecDeque<usize> = by_arrival.into();

    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut finished: Vec<usize> = Vec::with_capacity(records.len());
    let mut timeline = Timeline::new();
    let mut time: i64 = 0;

    loop {
        admit_arrivals(&mut pending, &mut queue, &records, time);

        let Some(current) = queue.pop_front() else {
            match pending.front() {
                Some(&next) => {
                    trace!("rr: idle {}..{}", time, records[next].arrival);
                    time = records[next].arrival;
                    continue;
                }
                None => break,
            }
        };

        let record = &mut records[current];
        record.mark_dispatched(time);
        let start = time;
        time += record.execute(time_quantum);
        timeline.push(record.pid, start, time);
        debug!("rr: P{} ran {}..{}", record.pid, start, time);

        let done = record.is_finished();
        if done {
            record.complete(time);
            debug!("rr: P{} completes at {}", record.pid, time);
        }

        // Newcomers queue ahead of the process that just used its slice.
        admit_arrivals(&mut pending, &mut queue, &records, time);

        if done {
            finished.push(current);
        } else {
            queue.push_back(current);
        }
    }

    let mut slots: Vec<Option<ProcessRecord>> = records.into_iter().map(Some).collect();
    let completed = finished
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect();

    Ok(SimulationOutcome::new(Algorithm::RoundRobin, completed, timeline))
}

/// Moves every pending process that has arrived by `time` to the queue tail.
fn admit_arrivals(
    pending: &mut VecDeque<usize>,
    queue: &mut VecDeque<usize>,
    records: &[ProcessRecord],
    time: i64,
) {
    while let Some(&next) = pending.front() {
        if records[next].arrival > time {
            break;
        }
        trace!("rr: P{} enqueued at {}", records[next].pid, time);
        queue.push_back(next);
        pending.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{verify_outcome, ValidationErrorKind};

    #[test]
    fn test_rr_fairness_reference_case() {
        let processes = vec![ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 1, 5)];
        let outcome = round_robin(&processes, 2).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 9)]
        );
        assert_eq!(outcome.context_switches, 3);
        assert!(verify_outcome(&processes, &outcome).is_ok());
    }

    #[test]
    fn test_rr_arrival_at_slice_end_goes_first() {
        // P2 arrives exactly when P1's slice ends; it must run before P1 resumes.
        let processes = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 3, 2)];
        let outcome = round_robin(&processes, 3).unwrap();
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 3), (2, 3, 5), (1, 5, 7)]
        );
    }

    #[test]
    fn test_rr_three_processes() {
        let processes = vec![
            ProcessSpec::new(1, 0, 5),
            ProcessSpec::new(2, 1, 3),
            ProcessSpec::new(3, 2, 1),
        ];
        let outcome = round_robin(&processes, 2).unwrap();
        // t=2: queue [2, 3, 1]
        assert_eq!(
            outcome.timeline.as_tuples(),
            vec![(1, 0, 2), (2, 2, 4), (3, 4, 5), (1, 5, 7), (2, 7, 8), (1, 8, 9)]
        );
        assert_eq!(outcome.completion_order(), vec![3, 2, 1]);

        let p1 = outcome.record_for(1).unwrap();
        assert_eq!(p1.completion_time, Some(9));
        assert_eq!(p1.waiting_time, Some(4));
        assert_eq!(p1.response_time, Some(0));

        let p3 = outcome.record_for(3).unwrap();
        assert_eq!(p3.response_time, Some(2));
        assert_eq!(p3.waiting_time, Some(2));
        assert!(verify_outcome(&processes, &outcome).is_ok());
    }

    #[test]
    fn test_rr_idle_gap() {
        let processes = vec![ProcessSpec::new(1, 0, 1), ProcessSpec::new(2, 4, 3)];
        let outcome = round_robin(&processes, 2).unwrap();
        assert_eq!(outcome.timeline.as_tuples(), vec![(1, 0, 1), (2, 4, 7)]);
        assert_eq!(outcome.timeline.idle_time(0), 3);
    }

    #[test]
    fn test_rr_lone_process_back_to_back_slices() {
        // Slices 0..2, 2..4 and 4..5 run without interruption.
        let processes = vec![ProcessSpec::new(1, 0, 5)];
        let outcome = round_robin(&processes, 2).unwrap();
        assert_eq!(outcome.timeline.as_tuples(), vec![(1, 0, 5)]);
        assert_eq!(outcome.context_switches, 0);
        assert_eq!(outcome.processes[0].response_time, Some(0));
        assert!(verify_outcome(&processes, &outcome).is_ok());
    }

    #[test]
    fn test_rr_large_quantum_matches_fcfs() {
        let processes = vec![
            ProcessSpec::new(1, 0, 5),
            ProcessSpec::new(2, 1, 3),
            ProcessSpec::new(3, 2, 8),
        ];
        let rr = round_robin(&processes, 100).unwrap();
        let fcfs = super::super::fcfs(&processes).unwrap();
        assert_eq!(rr.timeline, fcfs.timeline);
    }

    #[test]
    fn test_rr_rejects_bad_quantum() {
        let processes = vec![ProcessSpec::new(1, 0, 2)];
        assert_eq!(
            round_robin(&processes, 0).unwrap_err().kind,
            ValidationErrorKind::NonPositiveQuantum
        );
        assert_eq!(
            round_robin(&processes, -3).unwrap_err().kind,
            ValidationErrorKind::NonPositiveQuantum
        );
    }

    #[test]
    fn test_rr_idempotent() {
        let processes = vec![ProcessSpec::new(1, 0, 7), ProcessSpec::new(2, 0, 4)];
        assert_eq!(
            round_robin(&processes, 3).unwrap(),
            round_robin(&processes, 3).unwrap()
        );
    }
}
