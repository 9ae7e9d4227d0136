//! Random workload generation.
//!
//! Produces reproducible process sets for experiments and for exercising
//! the engine across many inputs. Pids are assigned `1..=count`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{Pid, ProcessSpec};

/// Parameters for random process sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes.
    pub count: usize,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: i64,
    /// Inclusive burst range, minimum at least 1.
    pub burst_range: (i64, i64),
    /// Inclusive priority range.
    pub priority_range: (i32, i32),
}

impl Default for WorkloadGenerator {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            burst_range: (1, 10),
            priority_range: (0, 5),
        }
    }
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets the latest possible arrival. Negative values become 0.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival.max(0);
        self
    }

    /// Sets the inclusive burst range. The minimum is raised to 1.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        let min = min.max(1);
        self.burst_range = (min, max.max(min));
        self
    }

    /// Sets the inclusive priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.priority_range = (min, max.max(min));
        self
    }

    /// Draws a process set from `rng`.
    ///
    /// Ranges set directly on the fields (or deserialized) are clamped the
    /// same way the builders clamp them.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<ProcessSpec> {
        let max_arrival = self.max_arrival.max(0);
        let burst_min = self.burst_range.0.max(1);
        let burst_max = self.burst_range.1.max(burst_min);
        let prio_min = self.priority_range.0;
        let prio_max = self.priority_range.1.max(prio_min);

        (1..=self.count)
            .map(|i| {
                ProcessSpec::new(
                    i as Pid,
                    rng.random_range(0..=max_arrival),
                    rng.random_range(burst_min..=burst_max),
                )
                .with_priority(rng.random_range(prio_min..=prio_max))
            })
            .collect()
    }

    /// Draws a process set from a fixed seed.
    pub fn generate_seeded(&self, seed: u64) -> Vec<ProcessSpec> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules::PriorityOrder;
    use crate::scheduler::{compare_algorithms, round_robin, Algorithm};
    use crate::validation::{validate_processes, verify_outcome};

    #[test]
    fn test_generated_input_is_valid() {
        let generator = WorkloadGenerator::new(20).with_max_arrival(30);
        let processes = generator.generate_seeded(7);
        assert_eq!(processes.len(), 20);
        assert!(validate_processes(&processes).is_ok());
        assert!(processes.iter().all(|p| (0..=30).contains(&p.arrival)));
        assert!(processes.iter().all(|p| (1..=10).contains(&p.burst)));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let generator = WorkloadGenerator::default();
        assert_eq!(generator.generate_seeded(42), generator.generate_seeded(42));
    }

    #[test]
    fn test_ranges_are_sanitized() {
        let generator = WorkloadGenerator::new(3)
            .with_max_arrival(-5)
            .with_burst_range(-2, -8)
            .with_priority_range(4, 1);
        assert_eq!(generator.max_arrival, 0);
        assert_eq!(generator.burst_range, (1, 1));
        assert_eq!(generator.priority_range, (4, 4));
        assert!(validate_processes(&generator.generate_seeded(1)).is_ok());
    }

    #[test]
    fn test_inverted_fields_are_clamped_on_generate() {
        let generator = WorkloadGenerator {
            count: 4,
            max_arrival: -3,
            burst_range: (5, 1),
            priority_range: (2, -2),
        };
        let processes = generator.generate_seeded(11);
        assert_eq!(processes.len(), 4);
        assert!(processes.iter().all(|p| p.arrival == 0));
        assert!(processes.iter().all(|p| p.burst == 5));
        assert!(processes.iter().all(|p| p.priority == 2));
    }

    #[test]
    fn test_every_algorithm_satisfies_invariants() {
        let generator = WorkloadGenerator::new(8)
            .with_max_arrival(25)
            .with_burst_range(1, 9)
            .with_priority_range(0, 3);

        for seed in 0..40 {
            let processes = generator.generate_seeded(seed);
            for order in [PriorityOrder::LowerFirst, PriorityOrder::HigherFirst] {
                let outcomes = compare_algorithms(&processes, 3, order).unwrap();
                for outcome in &outcomes {
                    if let Err(errors) = verify_outcome(&processes, outcome) {
                        panic!("seed {seed}, {}: {errors:?}", outcome.algorithm);
                    }
                }
            }
        }
    }

    #[test]
    fn test_fcfs_switches_are_n_minus_one() {
        let generator = WorkloadGenerator::new(6);
        for seed in 0..20 {
            let processes = generator.generate_seeded(seed);
            let outcome = crate::scheduler::fcfs(&processes).unwrap();
            assert_eq!(outcome.context_switches, processes.len() - 1);
        }
    }

    #[test]
    fn test_runs_are_idempotent() {
        let processes = WorkloadGenerator::new(10).generate_seeded(99);
        let snapshot = processes.clone();
        for algo in Algorithm::ALL {
            let a = crate::scheduler::run_algorithm(algo, &processes, Some(2), PriorityOrder::LowerFirst)
                .unwrap();
            let b = crate::scheduler::run_algorithm(algo, &processes, Some(2), PriorityOrder::LowerFirst)
                .unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(processes, snapshot);
    }

    #[test]
    fn test_quantum_one_round_robin() {
        let processes = WorkloadGenerator::new(5).generate_seeded(3);
        let outcome = round_robin(&processes, 1).unwrap();
        assert!(verify_outcome(&processes, &outcome).is_ok());
    }
}
