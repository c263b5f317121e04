//! Concurrent solve jobs.
//!
//! [`SolverManager`] runs each submitted timetable on a bounded thread pool
//! and tracks it under a [`JobId`]. Callers can poll the best timetable,
//! block until one exists, subscribe to improvements, or cancel.

mod job;
mod solver_manager;

#[cfg(test)]
mod mod_tests;

pub use job::{JobId, JobStatus};
pub use solver_manager::SolverManager;
