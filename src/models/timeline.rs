//! Execution timeline (Gantt chart) model.
//!
//! A timeline is the chronological list of uninterrupted execution
//! intervals on the simulated processor. Spans not covered by any
//! interval are idle time.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};

use super::Pid;

/// Uninterrupted execution of one process over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionInterval {
    /// Executing process.
    pub pid: Pid,
    /// Dispatch time.
    pub start: i64,
    /// Time the process left the processor.
    pub end: i64,
}

/// An idle span of the processor, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdleGap {
    pub start: i64,
    pub end: i64,
}

/// Chronological, non-overlapping sequence of execution intervals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Intervals sorted by start time.
    pub intervals: Vec<ExecutionInterval>,
}

impl ExecutionInterval {
    /// Creates a new interval.
    pub fn new(pid: Pid, start: i64, end: i64) -> Self {
        Self { pid, start, end }
    }

    /// Length of the interval in time units.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

impl From<(Pid, i64, i64)> for ExecutionInterval {
    fn from((pid, start, end): (Pid, i64, i64)) -> Self {
        Self::new(pid, start, end)
    }
}

impl IdleGap {
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval.
    ///
    /// Zero-length intervals are dropped. An interval that continues the
    /// previous one (same pid, starting where it ended) extends it, so each
    /// uninterrupted run of a process is a single interval.
    pub fn add_interval(&mut self, interval: ExecutionInterval) {
        debug_assert!(interval.start <= interval.end);
        if interval.duration() <= 0 {
            return;
        }
        match self.intervals.last_mut() {
            Some(last) if last.pid == interval.pid && last.end == interval.start => {
                last.end = interval.end;
            }
            _ => self.intervals.push(interval),
        }
    }

    /// Appends `(pid, start, end)`.
    pub fn push(&mut self, pid: Pid, start: i64, end: i64) {
        self.add_interval(ExecutionInterval::new(pid, start, end));
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether no interval has been recorded.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Intervals as `(pid, start, end)` tuples.
    pub fn as_tuples(&self) -> Vec<(Pid, i64, i64)> {
        self.intervals
            .iter()
            .map(|i| (i.pid, i.start, i.end))
            .collect()
    }

    /// Latest end time across all intervals (0 when empty).
    pub fn makespan(&self) -> i64 {
        self.intervals.last().map(|i| i.end).unwrap_or(0)
    }

    /// Total processor time spent executing.
    pub fn busy_time(&self) -> i64 {
        self.intervals.iter().map(|i| i.duration()).sum()
    }

    /// Idle spans between consecutive intervals, plus the leading span
    /// from `origin` to the first interval when positive.
    pub fn idle_gaps(&self, origin: i64) -> Vec<IdleGap> {
        let mut gaps = Vec::new();
        let mut cursor = origin;
        for interval in &self.intervals {
            if interval.start > cursor {
                gaps.push(IdleGap {
                    start: cursor,
                    end: interval.start,
                });
            }
            cursor = cursor.max(interval.end);
        }
        gaps
    }

    /// Total idle time from `origin` to the makespan.
    pub fn idle_time(&self, origin: i64) -> i64 {
        self.idle_gaps(origin).iter().map(|g| g.duration()).sum()
    }

    /// All intervals for a given process.
    pub fn intervals_for(&self, pid: Pid) -> Vec<&ExecutionInterval> {
        self.intervals.iter().filter(|i| i.pid == pid).collect()
    }

    /// Total service delivered to a process.
    pub fn service_for(&self, pid: Pid) -> i64 {
        self.intervals
            .iter()
            .filter(|i| i.pid == pid)
            .map(|i| i.duration())
            .sum()
    }

    /// Number of times the processor starts executing a different pid than
    /// the one it last executed. Idle gaps do not reset the last pid.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|pair| pair[0].pid != pair[1].pid)
            .count()
    }

    /// Whether intervals are sorted and pairwise non-overlapping.
    pub fn is_well_formed(&self) -> bool {
        self.intervals.iter().all(|i| i.start < i.end)
            && self
                .intervals
                .windows(2)
                .all(|pair| pair[0].end <= pair[1].start)
    }
}
