//! Per-run averages over completed process records.

use serde::{Deserialize, Serialize};

use crate::models::ProcessRecord;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Average turnaround, waiting and response time of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    /// Mean of `completion - arrival`.
    pub avg_turnaround: f64,
    /// Mean of `turnaround - burst`.
    pub avg_waiting: f64,
    /// Mean of `first dispatch - arrival`.
    pub avg_response: f64,
    /// Times the processor switched to a different pid.
    pub context_switches: usize,
}

impl MetricsSummary {
    /// Reduces completed records to arithmetic means.
    ///
    /// # Errors
    /// - `EmptyInput` if `processes` is empty.
    /// - `IncompleteRecord` if any record lacks turnaround, waiting or
    ///   response time.
    pub fn calculate(
        processes: &[ProcessRecord],
        context_switches: usize,
    ) -> Result<Self, ValidationError> {
        if processes.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::EmptyInput,
                "Cannot average metrics over an empty process list",
            ));
        }

        // Each value fits in i64; their sum may not.
        let mut total_turnaround: i128 = 0;
        let mut total_waiting: i128 = 0;
        let mut total_response: i128 = 0;

        for p in processes {
            let (Some(turnaround), Some(waiting), Some(response)) =
                (p.turnaround_time, p.waiting_time, p.response_time)
            else {
                return Err(ValidationError::new(
                    ValidationErrorKind::IncompleteRecord,
                    format!("Process {} has not completed", p.pid),
                ));
            };
            total_turnaround += i128::from(turnaround);
            total_waiting += i128::from(waiting);
            total_response += i128::from(response);
        }

        let n = processes.len() as f64;
        Ok(Self {
            avg_turnaround: total_turnaround as f64 / n,
            avg_waiting: total_waiting as f64 / n,
            avg_response: total_response as f64 / n,
            context_switches,
        })
    }

    /// `(avg turnaround, avg waiting, avg response)`.
    pub fn averages(&self) -> (f64, f64, f64) {
        (self.avg_turnaround, self.avg_waiting, self.avg_response)
    }
}
