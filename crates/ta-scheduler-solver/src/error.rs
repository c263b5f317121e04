//! Errors raised by the solver and the job manager.

use thiserror::Error;

use ta_scheduler_config::ConfigError;
use ta_scheduler_core::SchedulerError;
use ta_scheduler_scoring::UnknownRuleSet;

use crate::manager::JobId;

/// Errors surfaced before solving starts or by job bookkeeping.
///
/// Running out of time or being cancelled is not an error; see
/// [`TerminationReason`](crate::TerminationReason).
#[derive(Debug, Error)]
pub enum SolverError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    UnknownRuleSet(#[from] UnknownRuleSet),

    #[error("job '{0}' is already queued or active")]
    ConcurrentJobConflict(JobId),

    #[error("unknown job '{0}'")]
    UnknownJob(JobId),

    #[error("timed out waiting for job '{0}'")]
    Timeout(JobId),
}

impl From<ta_scheduler_core::InputError> for SolverError {
    fn from(error: ta_scheduler_core::InputError) -> Self {
        SolverError::Scheduler(error.into())
    }
}

pub type Result<T, E = SolverError> = std::result::Result<T, E>;
