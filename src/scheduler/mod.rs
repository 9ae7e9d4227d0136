//! Scheduling engine, metrics, and front-end request layer.
//!
//! Every algorithm is a pure function from process descriptors (plus its
//! parameters) to a [`SimulationOutcome`]. Each run works on fresh
//! records, so calls never share state and may run in parallel.
//!
//! # Algorithms
//!
//! | Function | Discipline | Preemptive |
//! |----------|-----------|------------|
//! | `fcfs` | First-Come-First-Served | No |
//! | `sjf` | Shortest Job First | No |
//! | `srtf` | Shortest Remaining Time First | Yes |
//! | `round_robin` | Round Robin (time quantum) | Yes |
//! | `priority` | Static priority | No |
//! | `priority_preemptive` | Static priority | Yes |
//!
//! Time advances event to event (arrival or completion); idle gaps are
//! jumped over, never stepped through.
//!
//! # Tie-breaking
//! Equal keys go to the lowest pid. FCFS orders by `(arrival, pid)`.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod algorithm;
mod fcfs;
mod kpi;
mod metrics;
mod outcome;
mod request;
mod round_robin;
mod selection;

pub use algorithm::Algorithm;
pub use fcfs::fcfs;
pub use kpi::SimulationKpi;
pub use metrics::MetricsSummary;
pub use outcome::SimulationOutcome;
pub use request::{
    compare_algorithms, run_algorithm, ProcessDetail, SimulationReport, SimulationRequest,
};
pub use round_robin::round_robin;
pub use selection::{priority, priority_preemptive, run_selection, sjf, srtf};
