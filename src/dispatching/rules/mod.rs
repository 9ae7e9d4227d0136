//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Service-based**: SJF (total burst), SRTF (remaining burst)
//! - **Arrival-based**: FIFO
//! - **Priority**: PRIORITY, with configurable polarity
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use serde::{Deserialize, Serialize};

use super::{DispatchingRule, RuleScore};
use crate::models::ProcessRecord;

// ======================== Service-based rules ========================

/// Shortest Job First.
///
/// Ranks by total burst. Minimises mean waiting time among
/// non-preemptive policies when all jobs are available together.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.burst
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest Remaining Time First.
///
/// Ranks by service still owed; partially executed processes compete
/// on what is left, not on their original burst.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.remaining_burst
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

// ======================== Arrival-based rules ========================

/// First In, First Out by arrival time.
///
/// Useful as a tie-breaker when arrival order should win over pid.
#[derive(Debug, Clone, Copy)]
pub struct Fifo;

impl DispatchingRule for Fifo {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        process.arrival
    }

    fn description(&self) -> &'static str {
        "First In, First Out"
    }
}

// ======================== Priority rules ========================

/// Which end of the priority scale is served first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityOrder {
    /// Lower numeric value = higher priority.
    #[default]
    #[serde(rename = "lower")]
    LowerFirst,
    /// Higher numeric value = higher priority.
    #[serde(rename = "higher")]
    HigherFirst,
}

impl PriorityOrder {
    /// Maps `ascending` (lower value wins) to an order.
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            PriorityOrder::LowerFirst
        } else {
            PriorityOrder::HigherFirst
        }
    }

    /// Whether lower numeric values win.
    pub fn is_ascending(self) -> bool {
        self == PriorityOrder::LowerFirst
    }

    /// Sign-adjusted key where lower always means more urgent.
    #[inline]
    pub fn key(self, priority: i32) -> RuleScore {
        match self {
            PriorityOrder::LowerFirst => priority as RuleScore,
            PriorityOrder::HigherFirst => -(priority as RuleScore),
        }
    }
}

/// Static priority.
///
/// Ranks by the process priority, interpreted through [`PriorityOrder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Priority {
    pub order: PriorityOrder,
}

impl Priority {
    pub fn new(order: PriorityOrder) -> Self {
        Self { order }
    }
}

impl DispatchingRule for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &ProcessRecord) -> RuleScore {
        self.order.key(process.priority)
    }

    fn description(&self) -> &'static str {
        match self.order {
            PriorityOrder::LowerFirst => "Priority (lower value first)",
            PriorityOrder::HigherFirst => "Priority (higher value first)",
        }
    }
}
