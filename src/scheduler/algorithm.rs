//! Algorithm selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// A CPU scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come-First-Served.
    #[serde(rename = "FCFS")]
    Fcfs,
    /// Shortest Job First, non-preemptive.
    #[serde(rename = "SJF")]
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    #[serde(rename = "SRTF")]
    Srtf,
    /// Round Robin with a fixed time quantum.
    #[serde(rename = "RoundRobin", alias = "Round Robin")]
    RoundRobin,
    /// Static priority, non-preemptive.
    Priority,
    /// Static priority, preemptive.
    PriorityPreemptive,
}

impl Algorithm {
    /// Every supported discipline, in presentation order.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
        Algorithm::PriorityPreemptive,
    ];

    /// Short label.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin => "RoundRobin",
            Algorithm::Priority => "Priority",
            Algorithm::PriorityPreemptive => "PriorityPreemptive",
        }
    }

    /// Whether a running process can lose the processor before finishing.
    pub fn is_preemptive(self) -> bool {
        matches!(
            self,
            Algorithm::Srtf | Algorithm::RoundRobin | Algorithm::PriorityPreemptive
        )
    }

    /// Whether the discipline needs a time quantum.
    pub fn requires_quantum(self) -> bool {
        self == Algorithm::RoundRobin
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ValidationError;

    /// Parses a label such as `"FCFS"`, `"Round Robin"` or
    /// `"SRTF (Preemptive)"`. Case, spaces, dashes and underscores are
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "fcfs" | "fifo" => Ok(Algorithm::Fcfs),
            "sjf" | "sjf(nonpreemptive)" => Ok(Algorithm::Sjf),
            "srtf" | "srtf(preemptive)" | "sjf(preemptive)" => Ok(Algorithm::Srtf),
            "rr" | "roundrobin" => Ok(Algorithm::RoundRobin),
            "priority" | "priority(nonpreemptive)" => Ok(Algorithm::Priority),
            "prioritypreemptive" | "priority(preemptive)" => Ok(Algorithm::PriorityPreemptive),
            _ => Err(ValidationError::new(
                ValidationErrorKind::UnknownAlgorithm,
                format!("Unknown algorithm: {s:?}"),
            )),
        }
    }
}
