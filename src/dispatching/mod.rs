//! Dispatching rules and rule engine for ready-queue selection.
//!
//! Provides the selection keys used by the key-driven disciplines
//! (SJF, SRTF, Priority) and a composable rule engine that applies them
//! with a deterministic tie-breaker.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{RuleEngine, rules};
//! use u_cpusched::models::{ProcessRecord, ProcessSpec};
//!
//! let records: Vec<ProcessRecord> = [ProcessSpec::new(1, 0, 8), ProcessSpec::new(2, 0, 3)]
//!     .iter()
//!     .map(ProcessRecord::from_spec)
//!     .collect();
//!
//! let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
//! let pos = engine.select(&records, &[0, 1]).unwrap();
//! assert_eq!(records[[0, 1][pos]].pid, 2);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
pub mod rules;

pub use engine::RuleEngine;

use crate::models::ProcessRecord;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = i64;

/// A dispatching rule that ranks ready processes.
///
/// # Score Convention
/// **Lower score = dispatched first.** Rules return smaller values for
/// processes that should run earlier.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "PRIORITY").
    fn name(&self) -> &'static str;

    /// Evaluates a ready process. Lower = higher priority.
    fn evaluate(&self, process: &ProcessRecord) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
