//! Result of a single simulation run.

use serde::{Deserialize, Serialize};

use super::{Algorithm, MetricsSummary, SimulationKpi};
use crate::models::{Pid, ProcessRecord, Timeline};
use crate::validation::ValidationError;

/// Completed records, timeline and context-switch count of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    /// Discipline that produced this outcome.
    pub algorithm: Algorithm,
    /// Completed records, in completion order.
    pub processes: Vec<ProcessRecord>,
    /// Chronological execution intervals.
    pub timeline: Timeline,
    /// Times the processor switched to a different pid.
    pub context_switches: usize,
}

impl SimulationOutcome {
    pub(crate) fn new(algorithm: Algorithm, processes: Vec<ProcessRecord>, timeline: Timeline) -> Self {
        let context_switches = timeline.context_switches();
        Self {
            algorithm,
            processes,
            timeline,
            context_switches,
        }
    }

    /// Finds the record for a process.
    pub fn record_for(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Pids in completion order.
    pub fn completion_order(&self) -> Vec<Pid> {
        self.processes.iter().map(|p| p.pid).collect()
    }

    /// Average turnaround, waiting and response time.
    pub fn metrics(&self) -> Result<MetricsSummary, ValidationError> {
        MetricsSummary::calculate(&self.processes, self.context_switches)
    }

    /// Extended performance indicators.
    pub fn kpi(&self) -> Result<SimulationKpi, ValidationError> {
        SimulationKpi::calculate(self)
    }
}
