//! Input validation and outcome auditing.
//!
//! Checks process descriptors before simulation. Detects:
//! - Empty process lists
//! - Non-positive pids and duplicate pids
//! - Negative arrival times
//! - Non-positive burst times and time quanta
//!
//! After simulation, [`verify_outcome`] audits a result against the
//! properties every correct schedule satisfies (non-overlap, conservation
//! of service, metric identities).
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::warn;

use crate::models::{Pid, ProcessSpec};
use crate::scheduler::SimulationOutcome;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending field.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyInput,
    /// A pid is zero.
    InvalidPid,
    /// Two processes share the same pid.
    DuplicatePid,
    /// A process arrives before t=0.
    NegativeArrival,
    /// A process requests zero or negative service.
    NonPositiveBurst,
    /// Round Robin time quantum is zero or negative.
    NonPositiveQuantum,
    /// A required algorithm parameter was not supplied.
    MissingParameter,
    /// The algorithm selector is not recognised.
    UnknownAlgorithm,
    /// A process record lacks derived fields.
    IncompleteRecord,
    /// Timeline intervals overlap, are unsorted, or empty.
    TimelineOverlap,
    /// Service delivered to a process differs from its burst.
    ServiceMismatch,
    /// Busy time plus idle time does not span the run.
    ConservationBreach,
    /// A derived metric disagrees with its defining identity.
    MetricIdentity,
    /// Response time lies outside `[0, waiting_time]`.
    ResponseBound,
    /// A process was executed before its arrival.
    EarlyDispatch,
    /// The latest arrival plus total service does not fit in `i64`.
    TimeOverflow,
    /// A non-preemptive run split a process across several intervals.
    SplitExecution,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates process descriptors for a simulation run.
///
/// Checks:
/// 1. At least one process
/// 2. Every pid is positive
/// 3. No duplicate pids
/// 4. Every arrival is non-negative
/// 5. Every burst is positive
/// 6. The latest arrival plus the total burst fits in `i64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyInput,
            "Process list is empty",
        ));
    }

    let mut pids = HashSet::new();
    for p in processes {
        if p.pid == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPid,
                "pid must be positive, got 0",
            ));
        }
        if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }
        if p.arrival < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process {}: arrival must be >= 0, got {}", p.pid, p.arrival),
            ));
        }
        if p.burst <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {}: burst must be > 0, got {}", p.pid, p.burst),
            ));
        }
    }

    // Every clock value a run can reach is bounded by this horizon.
    let latest_arrival = processes.iter().map(|p| p.arrival.max(0)).max().unwrap_or(0);
    let horizon = processes
        .iter()
        .filter(|p| p.burst > 0)
        .try_fold(latest_arrival, |acc, p| acc.checked_add(p.burst));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!("Latest arrival {latest_arrival} plus total burst exceeds {}", i64::MAX),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fails fast with the first problem found by [`validate_processes`].
pub fn ensure_valid(processes: &[ProcessSpec]) -> Result<(), ValidationError> {
    validate_processes(processes).map_err(|mut errors| {
        let first = errors.swap_remove(0);
        warn!("rejected process set: {first}");
        first
    })
}

/// Validates a Round Robin time quantum.
pub fn validate_quantum(time_quantum: i64) -> Result<(), ValidationError> {
    if time_quantum <= 0 {
        let err = ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("time_quantum must be > 0, got {time_quantum}"),
        );
        warn!("rejected quantum: {err}");
        return Err(err);
    }
    Ok(())
}

/// Audits a simulation outcome against its input.
///
/// Checks:
/// 1. Intervals are sorted, non-empty and non-overlapping
/// 2. Every input process has exactly one complete record
/// 3. No interval starts before its process arrives
/// 4. Service per pid equals the pid's burst
/// 5. Busy plus idle time spans `[min arrival, max completion]`
/// 6. `waiting == completion - arrival - burst >= 0`
/// 7. `0 <= response <= waiting`, with equality for non-preemptive runs
/// 8. Non-preemptive runs give each process a single interval
/// 9. The reported context-switch count matches the timeline
pub fn verify_outcome(processes: &[ProcessSpec], outcome: &SimulationOutcome) -> ValidationResult {
    let mut errors = Vec::new();
    let timeline = &outcome.timeline;

    if !timeline.is_well_formed() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimelineOverlap,
            "Timeline intervals are unsorted, empty, or overlapping",
        ));
    }

    let records: HashMap<Pid, _> = outcome.processes.iter().map(|r| (r.pid, r)).collect();
    if records.len() != outcome.processes.len() || records.len() != processes.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::IncompleteRecord,
            format!(
                "Expected {} process records, got {}",
                processes.len(),
                outcome.processes.len()
            ),
        ));
    }

    let arrivals: HashMap<Pid, i64> = processes.iter().map(|p| (p.pid, p.arrival)).collect();
    for interval in &timeline.intervals {
        match arrivals.get(&interval.pid) {
            Some(&arrival) if interval.start < arrival => errors.push(ValidationError::new(
                ValidationErrorKind::EarlyDispatch,
                format!(
                    "Process {} runs at {} before arriving at {}",
                    interval.pid, interval.start, arrival
                ),
            )),
            Some(_) => {}
            None => errors.push(ValidationError::new(
                ValidationErrorKind::ServiceMismatch,
                format!("Interval for unknown process {}", interval.pid),
            )),
        }
    }

    for spec in processes {
        let service = timeline.service_for(spec.pid);
        if service != spec.burst {
            errors.push(ValidationError::new(
                ValidationErrorKind::ServiceMismatch,
                format!(
                    "Process {}: received {} units of service, burst is {}",
                    spec.pid, service, spec.burst
                ),
            ));
        }

        let Some(record) = records.get(&spec.pid) else {
            errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteRecord,
                format!("Process {} has no record", spec.pid),
            ));
            continue;
        };
        if !record.is_complete() {
            errors.push(ValidationError::new(
                ValidationErrorKind::IncompleteRecord,
                format!("Process {} has unset derived fields", spec.pid),
            ));
            continue;
        }
        let (Some(completion), Some(turnaround), Some(waiting), Some(response)) = (
            record.completion_time,
            record.turnaround_time,
            record.waiting_time,
            record.response_time,
        ) else {
            continue;
        };

        if turnaround != completion - spec.arrival
            || waiting != turnaround - spec.burst
            || waiting < 0
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::MetricIdentity,
                format!(
                    "Process {}: completion={completion} turnaround={turnaround} waiting={waiting}",
                    spec.pid
                ),
            ));
        }

        let non_preemptive = !outcome.algorithm.is_preemptive();
        if non_preemptive && timeline.intervals_for(spec.pid).len() > 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::SplitExecution,
                format!("Process {} ran in several intervals under {}", spec.pid, outcome.algorithm),
            ));
        }

        if response < 0 || response > waiting || (non_preemptive && response != waiting) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ResponseBound,
                format!(
                    "Process {}: response={response} waiting={waiting}",
                    spec.pid
                ),
            ));
        }
    }

    if let (Some(first_arrival), Some(last_completion)) = (
        processes.iter().map(|p| p.arrival).min(),
        outcome
            .processes
            .iter()
            .filter_map(|r| r.completion_time)
            .max(),
    ) {
        let covered = timeline.busy_time() + timeline.idle_time(first_arrival);
        if covered != last_completion - first_arrival || timeline.makespan() != last_completion {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConservationBreach,
                format!(
                    "Busy+idle covers {covered} units, run spans {first_arrival}..{last_completion}"
                ),
            ));
        }
    }

    if outcome.context_switches != timeline.context_switches() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MetricIdentity,
            format!(
                "Reported {} context switches, timeline shows {}",
                outcome.context_switches,
                timeline.context_switches()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
