//! Termination based on lack of improvement.

use std::time::Duration;

use ta_scheduler_scoring::ScoreDirector;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates when the best score has not improved for `limit`.
///
/// The clock restarts on every new best solution; before the first one it
/// runs from the start of the solve.
#[derive(Debug, Clone, Copy)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl<D: ScoreDirector> Termination<D> for UnimprovedTimeTermination {
    fn check(&self, solver_scope: &SolverScope<D>) -> Option<TerminationReason> {
        solver_scope
            .time_since_last_improvement()
            .filter(|idle| *idle >= self.limit)
            .map(|_| TerminationReason::UnimprovedTimeExceeded)
    }
}
