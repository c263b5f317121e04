//! Step count termination.

use ta_scheduler_scoring::ScoreDirector;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates after a number of steps, counted across all phases.
#[derive(Debug, Clone, Copy)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<D: ScoreDirector> Termination<D> for StepCountTermination {
    fn check(&self, solver_scope: &SolverScope<D>) -> Option<TerminationReason> {
        (solver_scope.total_step_count() >= self.limit)
            .then_some(TerminationReason::StepLimitReached)
    }
}
