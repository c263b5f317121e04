//! Termination conditions for the solve.

mod composite;
mod step_count;
mod time;
mod unimproved;

use std::fmt::{self, Debug};

use ta_scheduler_scoring::ScoreDirector;

use crate::scope::SolverScope;

pub use composite::OrTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedTimeTermination;

/// Why a solve stopped.
///
/// None of these are errors: every reason still yields a scored timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// The exhaustive search completed its tree.
    Optimal,
    /// Every phase ran to its natural end without a proof of optimality.
    SearchCompleted,
    TimeBudgetExceeded,
    UnimprovedTimeExceeded,
    StepLimitReached,
    NodeLimitReached,
    Cancelled,
}

impl TerminationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::Optimal => "optimal",
            TerminationReason::SearchCompleted => "search completed",
            TerminationReason::TimeBudgetExceeded => "time budget exceeded",
            TerminationReason::UnimprovedTimeExceeded => "unimproved time exceeded",
            TerminationReason::StepLimitReached => "step limit reached",
            TerminationReason::NodeLimitReached => "node limit reached",
            TerminationReason::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for determining when to stop solving.
pub trait Termination<D: ScoreDirector>: Send + Debug {
    /// Returns the reason to stop, or `None` to keep going.
    fn check(&self, solver_scope: &SolverScope<D>) -> Option<TerminationReason>;

    fn is_terminated(&self, solver_scope: &SolverScope<D>) -> bool {
        self.check(solver_scope).is_some()
    }
}

/// An absent termination never fires.
impl<D: ScoreDirector, T: Termination<D>> Termination<D> for Option<T> {
    fn check(&self, solver_scope: &SolverScope<D>) -> Option<TerminationReason> {
        self.as_ref().and_then(|t| t.check(solver_scope))
    }
}

#[cfg(test)]
mod tests;
