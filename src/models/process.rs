//! Process descriptor and per-run process record.
//!
//! A [`ProcessSpec`] is the caller-owned, immutable input. Every simulation
//! run builds fresh [`ProcessRecord`]s from the specs, so repeated runs over
//! the same input never observe each other's state.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};

/// Process identifier. Must be positive and unique within a run.
pub type Pid = u32;

/// A process descriptor supplied by the caller.
///
/// # Time Representation
/// All times are integer time units relative to the simulation epoch (t=0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier (> 0).
    pub pid: Pid,
    /// Time at which the process becomes ready (>= 0).
    pub arrival: i64,
    /// Total CPU service required (> 0).
    pub burst: i64,
    /// Scheduling priority. Interpretation depends on the run's `PriorityOrder`.
    #[serde(default)]
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a descriptor with priority 0.
    pub fn new(pid: Pid, arrival: i64, burst: i64) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority: 0,
        }
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Working copy of a process, carrying simulation-derived fields.
///
/// Derived fields are `None` until the simulation sets them. Once a record
/// appears in a [`SimulationOutcome`](crate::scheduler::SimulationOutcome)
/// every field is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival: i64,
    pub burst: i64,
    pub priority: i32,
    /// CPU time still owed. Never negative.
    pub remaining_burst: i64,
    /// Time of first dispatch.
    pub start_time: Option<i64>,
    /// `start_time - arrival`, fixed at first dispatch.
    pub response_time: Option<i64>,
    /// Time at which `remaining_burst` reached 0.
    pub completion_time: Option<i64>,
    /// `completion_time - arrival`.
    pub turnaround_time: Option<i64>,
    /// `turnaround_time - burst`.
    pub waiting_time: Option<i64>,
}

impl ProcessRecord {
    /// Creates a fresh record from a descriptor.
    pub fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            pid: spec.pid,
            arrival: spec.arrival,
            burst: spec.burst,
            priority: spec.priority,
            remaining_burst: spec.burst,
            start_time: None,
            response_time: None,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
        }
    }

    /// Records a dispatch at `time`. Only the first dispatch sets
    /// `start_time` and `response_time`.
    pub fn mark_dispatched(&mut self, time: i64) {
        if self.start_time.is_none() {
            self.start_time = Some(time);
            self.response_time = Some(time - self.arrival);
        }
    }

    /// Consumes up to `amount` units of service and returns the units used.
    pub fn execute(&mut self, amount: i64) -> i64 {
        let used = amount.clamp(0, self.remaining_burst);
        self.remaining_burst -= used;
        used
    }

    /// Marks completion at `time` and derives turnaround and waiting time.
    pub fn complete(&mut self, time: i64) {
        let turnaround = time - self.arrival;
        self.completion_time = Some(time);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst);
    }

    /// Whether all service has been delivered.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining_burst == 0
    }

    /// Whether every derived field has been populated.
    pub fn is_complete(&self) -> bool {
        self.is_finished()
            && self.start_time.is_some()
            && self.response_time.is_some()
            && self.completion_time.is_some()
            && self.turnaround_time.is_some()
            && self.waiting_time.is_some()
    }
}

impl From<&ProcessSpec> for ProcessRecord {
    fn from(spec: &ProcessSpec) -> Self {
        Self::from_spec(spec)
    }
}
