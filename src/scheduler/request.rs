//! Request/report layer for front-ends.
//!
//! A [`SimulationRequest`] bundles process descriptors, an algorithm
//! selector and the algorithm's parameters; its JSON form matches what a
//! browser or desktop front-end posts:
//!
//! ```json
//! {
//!   "processes": [{"pid": 1, "arrival": 0, "burst": 5, "priority": 2}],
//!   "algorithm": "RoundRobin",
//!   "timeQuantum": 2,
//!   "priorityOrder": "lower"
//! }
//! ```
//!
//! A [`SimulationReport`] is the matching response: averages, a per-process
//! table and Gantt triples.

use log::info;
use serde::{Deserialize, Serialize};

use super::{
    fcfs, priority, priority_preemptive, round_robin, sjf, srtf, Algorithm, MetricsSummary,
    SimulationOutcome,
};
use crate::dispatching::rules::PriorityOrder;
use crate::models::{Pid, ProcessSpec};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Input container for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// Processes to schedule.
    pub processes: Vec<ProcessSpec>,
    /// Discipline to run.
    pub algorithm: Algorithm,
    /// Round Robin time quantum. Required for Round Robin only.
    #[serde(default)]
    pub time_quantum: Option<i64>,
    /// Priority polarity. Used by the priority disciplines only.
    #[serde(default)]
    pub priority_order: PriorityOrder,
}

impl SimulationRequest {
    /// Creates a request with no quantum and `LowerFirst` priority order.
    pub fn new(processes: Vec<ProcessSpec>, algorithm: Algorithm) -> Self {
        Self {
            processes,
            algorithm,
            time_quantum: None,
            priority_order: PriorityOrder::default(),
        }
    }

    /// Sets the Round Robin time quantum.
    pub fn with_time_quantum(mut self, time_quantum: i64) -> Self {
        self.time_quantum = Some(time_quantum);
        self
    }

    /// Sets the priority polarity.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }

    /// Runs the selected algorithm.
    ///
    /// # Errors
    /// `MissingParameter` for Round Robin without a quantum, otherwise any
    /// error the algorithm reports for its input.
    pub fn run(&self) -> Result<SimulationOutcome, ValidationError> {
        info!(
            "simulating {} over {} processes",
            self.algorithm,
            self.processes.len()
        );
        run_algorithm(
            self.algorithm,
            &self.processes,
            self.time_quantum,
            self.priority_order,
        )
    }

    /// Runs the selected algorithm and builds a report.
    pub fn report(&self) -> Result<SimulationReport, ValidationError> {
        SimulationReport::from_outcome(&self.run()?)
    }
}

/// Dispatches to the function implementing `algorithm`.
pub fn run_algorithm(
    algorithm: Algorithm,
    processes: &[ProcessSpec],
    time_quantum: Option<i64>,
    order: PriorityOrder,
) -> Result<SimulationOutcome, ValidationError> {
    match algorithm {
        Algorithm::Fcfs => fcfs(processes),
        Algorithm::Sjf => sjf(processes),
        Algorithm::Srtf => srtf(processes),
        Algorithm::RoundRobin => {
            let quantum = time_quantum.ok_or_else(|| {
                ValidationError::new(
                    ValidationErrorKind::MissingParameter,
                    "Round Robin requires time_quantum",
                )
            })?;
            round_robin(processes, quantum)
        }
        Algorithm::Priority => priority(processes, order),
        Algorithm::PriorityPreemptive => priority_preemptive(processes, order),
    }
}

/// Runs every discipline on the same input for side-by-side comparison.
///
/// Results are in [`Algorithm::ALL`] order. The first failing algorithm
/// aborts the comparison.
pub fn compare_algorithms(
    processes: &[ProcessSpec],
    time_quantum: i64,
    order: PriorityOrder,
) -> Result<Vec<SimulationOutcome>, ValidationError> {
    Algorithm::ALL
        .iter()
        .map(|&algo| run_algorithm(algo, processes, Some(time_quantum), order))
        .collect()
}

/// One row of the per-process results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDetail {
    pub pid: Pid,
    pub arrival: i64,
    pub burst: i64,
    pub priority: i32,
    pub completion_time: i64,
    pub turnaround_time: i64,
    pub waiting_time: i64,
    pub response_time: i64,
}

/// Front-end response for one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub algorithm: Algorithm,
    pub metrics: MetricsSummary,
    /// Completed records in completion order.
    pub process_details: Vec<ProcessDetail>,
    /// `(pid, start, end)` triples.
    pub gantt_chart: Vec<(Pid, i64, i64)>,
}

impl SimulationReport {
    /// Builds a report from a completed outcome.
    pub fn from_outcome(outcome: &SimulationOutcome) -> Result<Self, ValidationError> {
        let metrics = outcome.metrics()?;

        let process_details = outcome
            .processes
            .iter()
            .map(|p| match (
                p.completion_time,
                p.turnaround_time,
                p.waiting_time,
                p.response_time,
            ) {
                (Some(completion), Some(turnaround), Some(waiting), Some(response)) => {
                    Ok(ProcessDetail {
                        pid: p.pid,
                        arrival: p.arrival,
                        burst: p.burst,
                        priority: p.priority,
                        completion_time: completion,
                        turnaround_time: turnaround,
                        waiting_time: waiting,
                        response_time: response,
                    })
                }
                _ => Err(ValidationError::new(
                    ValidationErrorKind::IncompleteRecord,
                    format!("Process {} has not completed", p.pid),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            algorithm: outcome.algorithm,
            metrics,
            process_details,
            gantt_chart: outcome.timeline.as_tuples(),
        })
    }
}
