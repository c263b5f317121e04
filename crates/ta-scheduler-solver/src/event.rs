//! Events published while a job is solving.
//!
//! Each job owns a bounded `tokio::sync::broadcast` channel. Subscribers
//! that fall behind lose intermediate events but never see them out of
//! order.

use std::time::Duration;

use ta_scheduler_core::{HardMediumSoftScore, Timetable};

use crate::manager::JobId;

/// Default per-job event buffer.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// A strictly better timetable was found.
#[derive(Debug, Clone)]
pub struct BestSolutionChanged {
    pub job_id: JobId,
    /// Full snapshot, score stamped.
    pub timetable: Timetable,
    pub score: HardMediumSoftScore,
    /// Steps taken when the solution was found.
    pub step_count: u64,
    /// Time since the job started solving.
    pub elapsed: Duration,
}
