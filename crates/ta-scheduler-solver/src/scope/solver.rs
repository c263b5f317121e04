//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use ta_scheduler_core::{HardMediumSoftScore, Timetable};
use ta_scheduler_scoring::ScoreDirector;

use super::SolveContext;
use crate::statistics::StatisticsCollector;
use crate::termination::{Termination, TerminationReason};

/// Called with every strictly improving best solution.
pub type BestSolutionCallback = Box<dyn FnMut(&Timetable, HardMediumSoftScore, u64) + Send>;

/// Top-level scope for the entire solving process.
///
/// Generic over `D: ScoreDirector` so phases run without type erasure on
/// the hot path.
pub struct SolverScope<D: ScoreDirector> {
    score_director: D,
    best_solution: Option<Timetable>,
    best_score: Option<HardMediumSoftScore>,
    rng: StdRng,
    start_time: Option<Instant>,
    last_improvement_time: Option<Instant>,
    total_step_count: u64,
    statistics: Option<Arc<StatisticsCollector>>,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    termination: Option<Box<dyn Termination<D>>>,
    best_solution_callback: Option<BestSolutionCallback>,
    stop_reason: Option<TerminationReason>,
    proven_optimal: bool,
    context: SolveContext,
}

impl<D: ScoreDirector> SolverScope<D> {
    pub fn new(score_director: D) -> Self {
        Self::with_rng(score_director, StdRng::from_os_rng())
    }

    pub fn with_seed(score_director: D, seed: u64) -> Self {
        Self::with_rng(score_director, StdRng::seed_from_u64(seed))
    }

    fn with_rng(score_director: D, rng: StdRng) -> Self {
        Self {
            score_director,
            best_solution: None,
            best_score: None,
            rng,
            start_time: None,
            last_improvement_time: None,
            total_step_count: 0,
            statistics: None,
            terminate_early_flag: None,
            termination: None,
            best_solution_callback: None,
            stop_reason: None,
            proven_optimal: false,
            context: SolveContext::default(),
        }
    }

    pub fn with_statistics(mut self, collector: Arc<StatisticsCollector>) -> Self {
        self.statistics = Some(collector);
        self
    }

    pub fn with_context(mut self, context: SolveContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_termination(mut self, termination: Box<dyn Termination<D>>) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn with_best_solution_callback(mut self, callback: BestSolutionCallback) -> Self {
        self.best_solution_callback = Some(callback);
        self
    }

    pub fn statistics(&self) -> Option<&Arc<StatisticsCollector>> {
        self.statistics.as_ref()
    }

    pub fn context(&self) -> &SolveContext {
        &self.context
    }

    pub fn record_move(&self, accepted: bool) {
        if let Some(stats) = &self.statistics {
            stats.record_move(accepted);
        }
    }

    pub fn record_node(&self) {
        if let Some(stats) = &self.statistics {
            stats.record_node();
        }
    }

    pub fn start_solving(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.last_improvement_time = Some(now);
        self.total_step_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    /// Time since the best score last improved (or since solving started).
    pub fn time_since_last_improvement(&self) -> Option<Duration> {
        self.last_improvement_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &D {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut D {
        &mut self.score_director
    }

    /// Splits the borrow so a selector can read the timetable while drawing
    /// from the random generator.
    pub fn director_and_rng(&mut self) -> (&D, &mut StdRng) {
        (&self.score_director, &mut self.rng)
    }

    pub fn working_solution(&self) -> &Timetable {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> HardMediumSoftScore {
        self.score_director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&Timetable> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<&HardMediumSoftScore> {
        self.best_score.as_ref()
    }

    /// Snapshots the working solution if its score strictly beats the best.
    pub fn update_best_solution(&mut self) -> bool {
        let current_score = self.score_director.calculate_score();
        let is_better = match &self.best_score {
            None => true,
            Some(best) => current_score > *best,
        };
        if !is_better {
            return false;
        }

        let solution = self.score_director.clone_working_solution();
        debug!(
            event = "new_best",
            job_id = self.context.job_label(),
            score = %current_score,
            steps = self.total_step_count,
        );
        if let Some(stats) = &self.statistics {
            stats.record_improvement(current_score);
        }
        if let Some(callback) = &mut self.best_solution_callback {
            callback(&solution, current_score, self.total_step_count);
        }
        self.best_solution = Some(solution);
        self.best_score = Some(current_score);
        self.last_improvement_time = Some(Instant::now());
        true
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        if let Some(stats) = &self.statistics {
            stats.record_step();
        }
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Why the solve should stop now, if it should.
    pub fn termination_reason(&self) -> Option<TerminationReason> {
        if self.is_terminate_early() {
            return Some(TerminationReason::Cancelled);
        }
        if let Some(reason) = self.stop_reason {
            return Some(reason);
        }
        self.termination
            .as_ref()
            .and_then(|termination| termination.check(self))
    }

    pub fn should_terminate(&self) -> bool {
        self.termination_reason().is_some()
    }

    /// Stops the solve with `reason` at the next termination check.
    pub fn stop(&mut self, reason: TerminationReason) {
        self.stop_reason.get_or_insert(reason);
    }

    pub fn mark_proven_optimal(&mut self) {
        self.proven_optimal = true;
    }

    pub fn is_proven_optimal(&self) -> bool {
        self.proven_optimal
    }

    pub fn take_best_or_working_solution(self) -> Timetable {
        self.best_solution
            .unwrap_or_else(|| self.score_director.clone_working_solution())
    }
}
