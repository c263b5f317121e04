//! Solver implementation.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use ta_scheduler_core::{FeasibilityReport, HardMediumSoftScore, Timetable};
use ta_scheduler_scoring::{explain, ScoreDirector, ScoreExplanation};

use crate::manager::JobId;
use crate::phase::Phase;
use crate::scope::{BestSolutionCallback, SolveContext, SolverScope};
use crate::statistics::{SolverStatistics, StatisticsCollector};
use crate::termination::{Termination, TerminationReason};

/// Runs phases in order against one score director.
///
/// Stops between phases, and inside them, as soon as the termination fires
/// or the terminate-early flag is raised.
pub struct Solver<D: ScoreDirector> {
    phases: Vec<Box<dyn Phase<D>>>,
    termination: Option<Box<dyn Termination<D>>>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    random_seed: Option<u64>,
    context: SolveContext,
    best_solution_callback: Option<BestSolutionCallback>,
}

impl<D: ScoreDirector> Solver<D> {
    pub fn new(phases: Vec<Box<dyn Phase<D>>>) -> Self {
        Self {
            phases,
            termination: None,
            terminate_early_flag: None,
            random_seed: None,
            context: SolveContext::default(),
            best_solution_callback: None,
        }
    }

    pub fn with_termination(mut self, termination: Box<dyn Termination<D>>) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_early_flag = Some(flag);
        self
    }

    pub fn with_random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_context(mut self, context: SolveContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_best_solution_callback(mut self, callback: BestSolutionCallback) -> Self {
        self.best_solution_callback = Some(callback);
        self
    }

    /// Solves starting from the director's working timetable.
    ///
    /// The returned timetable is the best one found, rescored from scratch.
    pub fn solve(self, score_director: D) -> SolveOutcome {
        let Solver {
            mut phases,
            termination,
            terminate_early_flag,
            random_seed,
            context,
            best_solution_callback,
        } = self;

        let rule_set = score_director.rule_set().clone();
        let statistics = Arc::new(StatisticsCollector::new());
        let mut scope = match random_seed {
            Some(seed) => SolverScope::with_seed(score_director, seed),
            None => SolverScope::new(score_director),
        }
        .with_statistics(Arc::clone(&statistics))
        .with_context(context);
        if let Some(termination) = termination {
            scope = scope.with_termination(termination);
        }
        if let Some(callback) = best_solution_callback {
            scope = scope.with_best_solution_callback(callback);
        }
        if let Some(flag) = terminate_early_flag {
            scope.set_terminate_early_flag(flag);
        }

        {
            let timetable = scope.working_solution();
            info!(
                event = "solve_start",
                job_id = scope.context().job_label(),
                timetable = timetable.id(),
                tas = timetable.tas().len(),
                shifts = timetable.shifts().len(),
                slots = timetable.assignments().len(),
                rule_set = rule_set.name(),
                incremental = scope.score_director().is_incremental(),
                seed = ?random_seed,
            );
        }

        scope.start_solving();
        scope.update_best_solution();
        for (index, phase) in phases.iter_mut().enumerate() {
            if scope.should_terminate() {
                break;
            }
            phase.solve(&mut scope, index);
        }

        let proven_optimal = scope.is_proven_optimal();
        let termination_reason = if proven_optimal {
            TerminationReason::Optimal
        } else {
            scope
                .termination_reason()
                .unwrap_or(TerminationReason::SearchCompleted)
        };
        let step_count = scope.total_step_count();
        let duration = scope.elapsed().unwrap_or_default();
        let context = scope.context().clone();

        let mut timetable = scope.take_best_or_working_solution();
        let explanation = explain(&timetable, &rule_set);
        timetable.set_score(Some(explanation.score));

        let summary = SolveSummary {
            job_id: context.job_id().cloned(),
            score: explanation.score,
            termination_reason,
            proven_optimal,
            step_count,
            duration,
            feasibility: context.feasibility().clone(),
            statistics: statistics.snapshot(),
        };
        info!(
            event = "solve_end",
            job_id = context.job_label(),
            score = %summary.score,
            reason = %termination_reason,
            proven_optimal,
            steps = step_count,
            duration_ms = duration.as_millis() as u64,
            moves_evaluated = summary.statistics.total_moves_evaluated,
        );

        SolveOutcome {
            timetable,
            explanation,
            summary,
        }
    }
}

/// How a solve ended.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveSummary {
    pub job_id: Option<JobId>,
    /// Score of the returned timetable, recomputed from scratch.
    pub score: HardMediumSoftScore,
    pub termination_reason: TerminationReason,
    /// True only when an exhaustive search completed its tree.
    pub proven_optimal: bool,
    pub step_count: u64,
    pub duration: Duration,
    /// Pre-check findings for the input.
    pub feasibility: FeasibilityReport,
    pub statistics: SolverStatistics,
}

impl SolveSummary {
    pub fn is_feasible(&self) -> bool {
        self.score.hard() >= 0
    }

    /// Number of hard-constraint violation points, zero when feasible.
    pub fn hard_violations(&self) -> u64 {
        self.score.hard().unsigned_abs()
    }

    /// True unless the result was proven optimal.
    pub fn is_best_effort(&self) -> bool {
        !self.proven_optimal
    }
}

/// Final timetable with its score breakdown.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Best timetable found, score stamped.
    pub timetable: Timetable,
    pub explanation: ScoreExplanation,
    pub summary: SolveSummary,
}

impl SolveOutcome {
    pub fn score(&self) -> HardMediumSoftScore {
        self.summary.score
    }
}
