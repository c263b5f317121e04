//! Time-based termination.

use std::time::Duration;

use ta_scheduler_scoring::ScoreDirector;

use super::{Termination, TerminationReason};
use crate::scope::SolverScope;

/// Terminates once the wall-clock budget since the solve started is spent.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use ta_scheduler_solver::termination::TimeTermination;
///
/// let term = TimeTermination::new(Duration::from_secs(30));
/// let quick = TimeTermination::millis(500);
/// assert_eq!(quick.limit(), Duration::from_millis(500));
/// assert_eq!(term.limit(), TimeTermination::seconds(30).limit());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<D: ScoreDirector> Termination<D> for TimeTermination {
    fn check(&self, solver_scope: &SolverScope<D>) -> Option<TerminationReason> {
        solver_scope
            .elapsed()
            .filter(|elapsed| *elapsed >= self.limit)
            .map(|_| TerminationReason::TimeBudgetExceeded)
    }
}
