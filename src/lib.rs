//! CPU scheduling simulator.
//!
//! Computes, for classical single-processor disciplines, the exact
//! execution timeline and per-process metrics of a process set.
//! Presentation (tables, Gantt charts) is left to callers.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessSpec`, `ProcessRecord`,
//!   `ExecutionInterval`, `Timeline`
//! - **`dispatching`**: Ready-queue ranking rules (SJF, SRTF, Priority)
//!   and the `RuleEngine` that applies them
//! - **`scheduler`**: FCFS, SJF, SRTF, Round Robin, Priority; metrics,
//!   KPIs, and the `SimulationRequest` front-end layer
//! - **`validation`**: Input checks and post-run auditing
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::ProcessSpec;
//! use u_cpusched::scheduler::{Algorithm, SimulationRequest};
//!
//! let processes = vec![ProcessSpec::new(1, 0, 4), ProcessSpec::new(2, 1, 5)];
//! let outcome = SimulationRequest::new(processes, Algorithm::RoundRobin)
//!     .with_time_quantum(2)
//!     .run()
//!     .unwrap();
//!
//! let metrics = outcome.metrics().unwrap();
//! assert_eq!(metrics.context_switches, 3);
//! ```
//!
//! # Logging
//!
//! The engine emits `log` records (`debug` for dispatch, preemption and
//! completion; `trace` for queue admission and idle jumps). Install any
//! `log` backend to see them.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;
