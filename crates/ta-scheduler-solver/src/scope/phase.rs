//! Phase-level scope.

use std::time::Instant;

use tracing::{debug, info};

use ta_scheduler_core::HardMediumSoftScore;
use ta_scheduler_scoring::ScoreDirector;

use super::SolverScope;
use crate::statistics::PhaseStatistics;

/// Scope for a single phase. Logs `phase_start` on creation and
/// `phase_end` from [`PhaseScope::end`].
pub struct PhaseScope<'a, D: ScoreDirector> {
    solver_scope: &'a mut SolverScope<D>,
    phase_index: usize,
    phase_type: &'static str,
    stats_index: Option<usize>,
    starting_score: HardMediumSoftScore,
    start_time: Instant,
    step_count: u64,
    moves_evaluated: u64,
    moves_accepted: u64,
}

impl<'a, D: ScoreDirector> PhaseScope<'a, D> {
    pub fn new(
        solver_scope: &'a mut SolverScope<D>,
        phase_index: usize,
        phase_type: &'static str,
    ) -> Self {
        let starting_score = solver_scope.calculate_score();
        let stats_index = solver_scope
            .statistics()
            .map(|stats| stats.start_phase(phase_type));
        info!(
            event = "phase_start",
            job_id = solver_scope.context().job_label(),
            phase = phase_type,
            phase_index,
            score = %starting_score,
        );
        Self {
            solver_scope,
            phase_index,
            phase_type,
            stats_index,
            starting_score,
            start_time: Instant::now(),
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn solver_scope(&self) -> &SolverScope<D> {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope<D> {
        self.solver_scope
    }

    pub fn starting_score(&self) -> HardMediumSoftScore {
        self.starting_score
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Counts a finished step in this phase and in the solve.
    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.solver_scope.increment_step_count();
        self.step_count
    }

    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
        self.solver_scope.record_move(accepted);
    }

    pub fn end(self) {
        let ending_score = self.solver_scope.calculate_score();
        let duration = self.start_time.elapsed();
        if let (Some(stats), Some(index)) = (self.solver_scope.statistics(), self.stats_index) {
            stats.end_phase(
                index,
                PhaseStatistics {
                    duration,
                    step_count: self.step_count,
                    moves_evaluated: self.moves_evaluated,
                    moves_accepted: self.moves_accepted,
                    starting_score: Some(self.starting_score),
                    ending_score: Some(ending_score),
                    ..PhaseStatistics::new(index, self.phase_type)
                },
            );
        }
        debug!(
            phase = self.phase_type,
            moves_evaluated = self.moves_evaluated,
            moves_accepted = self.moves_accepted,
            "phase counters"
        );
        info!(
            event = "phase_end",
            job_id = self.solver_scope.context().job_label(),
            phase = self.phase_type,
            phase_index = self.phase_index,
            steps = self.step_count,
            duration_ms = duration.as_millis() as u64,
            score = %ending_score,
            best_score = %self.solver_scope.best_score().copied().unwrap_or(ending_score),
        );
    }
}
