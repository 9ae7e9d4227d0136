//! Simulation performance indicators (KPIs).
//!
//! Computes processor-level measures from a completed run in addition to
//! the per-process averages.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion time |
//! | Idle Time | Processor time with nothing to run, from first arrival |
//! | CPU Utilization | busy / (makespan - first arrival) |
//! | Throughput | processes / (makespan - first arrival) |
//! | Max Waiting | Largest single waiting time |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::{MetricsSummary, SimulationOutcome};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Performance indicators for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationKpi {
    /// Latest completion time.
    pub makespan: i64,
    /// Earliest arrival time.
    pub first_arrival: i64,
    /// Total time spent executing.
    pub busy_time: i64,
    /// Total idle time between first arrival and makespan.
    pub idle_time: i64,
    /// Fraction of the span spent executing (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Largest waiting time of any process.
    pub max_waiting_time: i64,
    /// Per-process averages and context-switch count.
    pub summary: MetricsSummary,
}

impl SimulationKpi {
    /// Computes KPIs from a completed outcome.
    pub fn calculate(outcome: &SimulationOutcome) -> Result<Self, ValidationError> {
        let summary = MetricsSummary::calculate(&outcome.processes, outcome.context_switches)?;

        let first_arrival = outcome
            .processes
            .iter()
            .map(|p| p.arrival)
            .min()
            .unwrap_or(0);
        let makespan = outcome
            .processes
            .iter()
            .filter_map(|p| p.completion_time)
            .max()
            .unwrap_or(first_arrival);
        let span = makespan - first_arrival;
        if span <= 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::ConservationBreach,
                format!("Run spans {first_arrival}..{makespan}, expected positive length"),
            ));
        }

        let busy_time = outcome.timeline.busy_time();
        let max_waiting_time = outcome
            .processes
            .iter()
            .filter_map(|p| p.waiting_time)
            .max()
            .unwrap_or(0);

        Ok(Self {
            makespan,
            first_arrival,
            busy_time,
            idle_time: outcome.timeline.idle_time(first_arrival),
            cpu_utilization: busy_time as f64 / span as f64,
            throughput: outcome.processes.len() as f64 / span as f64,
            max_waiting_time,
            summary,
        })
    }
}
