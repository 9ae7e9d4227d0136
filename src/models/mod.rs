//! Simulation domain models.
//!
//! Provides the data types exchanged between callers and the scheduling
//! engine: process descriptors, per-run process records, and the
//! execution timeline.
//!
//! # Lifecycle
//!
//! | Type | Owner | Mutability |
//! |------|-------|------------|
//! | ProcessSpec | Caller | Immutable input |
//! | ProcessRecord | Engine (per run) | Derived fields set during simulation |
//! | Timeline | Engine (per run) | Append-only, frozen once returned |

mod process;
mod timeline;

pub use process::{Pid, ProcessRecord, ProcessSpec};
pub use timeline::{ExecutionInterval, IdleGap, Timeline};
