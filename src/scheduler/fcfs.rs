//! First-Come-First-Served.
//!
//! # Algorithm
//!
//! 1. Order processes by `(arrival, pid)`.
//! 2. Dispatch each in turn, idling until it arrives if the processor is free.
//! 3. Run it to completion.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the dispatch pass.

use log::{debug, trace};

use super::{Algorithm, SimulationOutcome};
use crate::models::{ProcessRecord, ProcessSpec, Timeline};
use crate::validation::{ensure_valid, ValidationError};

/// Runs First-Come-First-Served.
///
/// One interval per process; every process's response time equals its
/// waiting time.
///
/// # Example
/// ```
/// use u_cpusched::models::ProcessSpec;
/// use u_cpusched::scheduler::fcfs;
///
/// let processes = vec![
///     ProcessSpec::new(1, 0, 5),
///     ProcessSpec::new(2, 1, 3),
///     ProcessSpec::new(3, 2, 8),
/// ];
/// let outcome = fcfs(&processes).unwrap();
/// assert_eq!(outcome.timeline.as_tuples(), vec![(1, 0, 5), (2, 5, 8), (3, 8, 16)]);
/// assert_eq!(outcome.context_switches, 2);
/// ```
pub fn fcfs(processes: &[ProcessSpec]) -> Result<SimulationOutcome, ValidationError> {
    ensure_valid(processes)?;

    let mut records: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::from_spec).collect();
    records.sort_by_key(|p| (p.arrival, p.pid));

    let mut timeline = Timeline::new();
    let mut time = 0;

    for record in &mut records {
        if time < record.arrival {
            trace!("fcfs: idle {}..{}", time, record.arrival);
            time = record.arrival;
        }

        let start = time;
        record.mark_dispatched(start);
        time += record.execute(record.burst);
        record.complete(time);
        timeline.push(record.pid, start, time);
        debug!("fcfs: P{} ran {}..{}", record.pid, start, time);
    }

    Ok(SimulationOutcome::new(Algorithm::Fcfs, records, timeline))
}
