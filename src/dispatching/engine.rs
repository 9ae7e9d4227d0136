//! Rule engine for ready-queue selection.
//!
//! Applies dispatching rules in sequence, consulting later rules only on
//! ties, and finally breaks remaining ties by lowest pid so selection
//! never depends on collection order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::DispatchingRule;
use crate::models::ProcessRecord;

#[derive(Clone)]
struct RankedRule {
    rule: Arc<dyn DispatchingRule>,
    /// Tie-breakers order the queue but never justify a preemption.
    tie_breaker: bool,
}

/// A composable rule engine for ready-queue selection.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{RuleEngine, rules};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::ShortestRemaining)
///     .with_tie_breaker(rules::Fifo);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<RankedRule>,
}

impl RuleEngine {
    /// Creates an empty rule engine (pure lowest-pid ordering).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(RankedRule {
            rule: Arc::new(rule),
            tie_breaker: false,
        });
        self
    }

    /// Adds a tie-breaking rule, consulted after all earlier rules tie.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(RankedRule {
            rule: Arc::new(rule),
            tie_breaker: true,
        });
        self
    }

    /// Human-readable ranking, e.g. `"Shortest Job First, then First In,
    /// First Out (tie-breaker), then lowest pid"`.
    pub fn describe(&self) -> String {
        let mut parts: Vec<String> = self
            .rules
            .iter()
            .map(|r| {
                if r.tie_breaker {
                    format!("{} (tie-breaker)", r.rule.description())
                } else {
                    r.rule.description().to_string()
                }
            })
            .collect();
        parts.push("lowest pid".to_string());
        parts.join(", then ")
    }

    /// Total order over processes: rules in sequence, then lowest pid.
    pub fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        self.rules
            .iter()
            .map(|r| r.rule.evaluate(a).cmp(&r.rule.evaluate(b)))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| a.pid.cmp(&b.pid))
    }

    /// Whether `candidate` strictly outranks `running` on the primary rules.
    ///
    /// Ties never preempt.
    pub fn preempts(&self, candidate: &ProcessRecord, running: &ProcessRecord) -> bool {
        self.rules
            .iter()
            .filter(|r| !r.tie_breaker)
            .map(|r| r.rule.evaluate(candidate).cmp(&r.rule.evaluate(running)))
            .find(|o| o.is_ne())
            == Some(Ordering::Less)
    }

    /// Returns the position within `ready` of the best process.
    ///
    /// `ready` holds indices into `records`. Returns `None` when empty.
    pub fn select(&self, records: &[ProcessRecord], ready: &[usize]) -> Option<usize> {
        ready
            .iter()
            .enumerate()
            .min_by(|a, b| self.compare(&records[*a.1], &records[*b.1]))
            .map(|(pos, _)| pos)
    }

    /// Sorts indices into `records` from most to least urgent.
    pub fn sort_indices(&self, records: &[ProcessRecord], indices: &mut [usize]) {
        indices.sort_by(|&a, &b| self.compare(&records[a], &records[b]));
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| {
                        if r.tie_breaker {
                            format!("{}(tie)", r.rule.name())
                        } else {
                            r.rule.name().to_string()
                        }
                    })
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::dispatching::rules::PriorityOrder;
    use crate::models::ProcessSpec;

    fn records(specs: &[(u32, i64, i64, i32)]) -> Vec<ProcessRecord> {
        specs
            .iter()
            .map(|&(pid, arrival, burst, prio)| {
                ProcessRecord::from_spec(&ProcessSpec::new(pid, arrival, burst).with_priority(prio))
            })
            .collect()
    }

    #[test]
    fn test_sjf_ordering() {
        let recs = records(&[(1, 0, 5, 0), (2, 0, 1, 0), (3, 0, 3, 0)]);
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);

        let mut idx = vec![0, 1, 2];
        engine.sort_indices(&recs, &mut idx);
        let pids: Vec<u32> = idx.iter().map(|&i| recs[i].pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn test_ties_break_by_lowest_pid() {
        // Listed out of pid order on purpose.
        let recs = records(&[(4, 0, 3, 0), (2, 1, 3, 0), (3, 0, 3, 0)]);
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);

        let pos = engine.select(&recs, &[0, 1, 2]).unwrap();
        assert_eq!(recs[[0, 1, 2][pos]].pid, 2);
    }

    #[test]
    fn test_fifo_tie_breaker() {
        let recs = records(&[(4, 0, 3, 0), (2, 1, 3, 0)]);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(rules::Fifo);

        let pos = engine.select(&recs, &[0, 1]).unwrap();
        assert_eq!(recs[pos].pid, 4);
    }

    #[test]
    fn test_preempts_only_when_strictly_better() {
        let recs = records(&[(1, 0, 4, 0), (2, 0, 4, 0), (3, 0, 2, 0)]);
        let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);

        assert!(!engine.preempts(&recs[0], &recs[1]));
        assert!(!engine.preempts(&recs[1], &recs[0]));
        assert!(engine.preempts(&recs[2], &recs[0]));
    }

    #[test]
    fn test_tie_breaker_never_preempts() {
        let recs = records(&[(1, 5, 4, 0), (2, 0, 4, 0)]);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestRemaining)
            .with_tie_breaker(rules::Fifo);

        assert!(!engine.preempts(&recs[1], &recs[0]));
    }

    #[test]
    fn test_priority_engine() {
        let recs = records(&[(1, 0, 1, 3), (2, 0, 1, 9), (3, 0, 1, 1)]);

        let ascending = RuleEngine::new().with_rule(rules::Priority::new(PriorityOrder::LowerFirst));
        assert_eq!(ascending.select(&recs, &[0, 1, 2]), Some(2));

        let descending =
            RuleEngine::new().with_rule(rules::Priority::new(PriorityOrder::HigherFirst));
        assert_eq!(descending.select(&recs, &[0, 1, 2]), Some(1));
    }

    #[test]
    fn test_empty_ready() {
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        assert!(engine.select(&[], &[]).is_none());
    }

    #[test]
    fn test_debug_lists_rules() {
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(rules::Fifo);
        assert!(format!("{engine:?}").contains("FIFO(tie)"));
    }

    #[test]
    fn test_describe_ranking() {
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(rules::Fifo);
        assert_eq!(
            engine.describe(),
            "Shortest Job First, then First In, First Out (tie-breaker), then lowest pid"
        );
        assert_eq!(RuleEngine::new().describe(), "lowest pid");
    }
}
