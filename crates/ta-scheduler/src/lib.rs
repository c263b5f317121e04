//! TA Scheduler - assigns teaching assistants to lab shifts
//!
//! Build a [`Timetable`], pick a [`SolverConfig`] and call [`solve`]:
//!
//! ```rust
//! use ta_scheduler::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardMediumSoftScore::of(0, -2, 15);
//! assert!(score.is_feasible());
//! assert_eq!(score.medium(), -2);
//! ```
//!
//! Concurrent jobs with best-solution events go through [`SolverManager`].

pub use ta_scheduler_config as config;
pub use ta_scheduler_core as domain;
pub use ta_scheduler_scoring as scoring;
pub use ta_scheduler_solver as solver;

#[cfg(feature = "console")]
pub use ta_scheduler_console as console;

// Domain
pub use ta_scheduler_core::{
    ConstraintParameters, FeasibilityReport, Finding, FindingKind, HardMediumSoftScore,
    InputError, SchedulerError, Score, Severity, Shift, ShiftAssignment, ShiftStatus, Ta,
    Timetable,
};

// Scoring
pub use ta_scheduler_scoring::{explain, Rule, RuleSet, RuleSetRegistry, ScoreExplanation};

// Configuration
pub use ta_scheduler_config::{AcceptorConfig, ConfigError, SolverConfig, Strategy};

// Solving
pub use ta_scheduler_solver::{
    BestSolutionChanged, JobId, JobStatus, Result, SolveOutcome, SolveSummary, SolverError,
    SolverFactory, SolverManager, TerminationReason,
};

use std::path::Path;

use tracing::info;

/// Solves on the calling thread.
///
/// Applies the configured weight overrides, runs the feasibility pre-check
/// and returns the best timetable found with its score breakdown.
pub fn solve(timetable: Timetable, config: &SolverConfig) -> Result<SolveOutcome> {
    SolverFactory::new(config.clone())?.solve(timetable)
}

/// Solves with the configuration at `path`, or the defaults when the file
/// does not exist.
pub fn solve_with_config_file(timetable: Timetable, path: impl AsRef<Path>) -> Result<SolveOutcome> {
    let path = path.as_ref();
    let config = if path.exists() {
        SolverConfig::load(path)?
    } else {
        info!(path = %path.display(), "no solver config file, using defaults");
        SolverConfig::default()
    };
    solve(timetable, &config)
}

pub mod prelude {
    pub use super::{solve, solve_with_config_file};
    pub use super::{
        ConstraintParameters, FeasibilityReport, HardMediumSoftScore, Score, Shift, ShiftStatus,
        Ta, Timetable,
    };
    pub use super::{JobId, JobStatus, SolveOutcome, SolverConfig, SolverManager};
}

#[cfg(test)]
mod tests {
    use ta_scheduler_test::five_shift_timetable;

    use super::*;

    #[test]
    fn test_solve_with_defaults_and_step_limit() {
        let config = SolverConfig::new()
            .with_random_seed(3)
            .with_step_count_limit(100);
        let outcome = solve(five_shift_timetable(), &config).unwrap();
        assert_eq!(outcome.score().hard(), 0);
        assert_eq!(outcome.explanation.rule_set, "default");
    }

    #[test]
    fn test_solve_with_config_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/quick.toml");
        let outcome = solve_with_config_file(five_shift_timetable(), path).unwrap();
        assert_eq!(outcome.explanation.rule_set, "tabriz");
        assert_eq!(outcome.timetable.parameters().desired_assignment_reward, 2);
        assert!(outcome.summary.step_count <= 120);
    }
}
