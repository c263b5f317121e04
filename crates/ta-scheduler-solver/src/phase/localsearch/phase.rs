//! Local search phase implementation.

use tracing::trace;

use ta_scheduler_scoring::ScoreDirector;

use crate::heuristic::{Move, MoveSelector};
use crate::phase::localsearch::{Acceptor, LocalSearchForager};
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};

/// Candidates sampled per step before giving up on it.
pub const DEFAULT_SELECTED_COUNT_LIMIT: usize = 1_000;

/// Local search phase that improves an existing timetable.
///
/// Each step samples candidates from the move selector, scores each one by
/// doing and undoing it, feeds the acceptor and lets the forager pick the
/// move to apply. A step without an accepted move still counts, so the
/// step limit and late acceptance history keep advancing.
#[derive(Debug)]
pub struct LocalSearchPhase<MS, A, Fo> {
    move_selector: MS,
    acceptor: A,
    forager: Fo,
    selected_count_limit: usize,
}

impl<MS, A, Fo> LocalSearchPhase<MS, A, Fo>
where
    MS: MoveSelector,
    A: Acceptor,
    Fo: LocalSearchForager,
{
    pub fn new(move_selector: MS, acceptor: A, forager: Fo) -> Self {
        Self {
            move_selector,
            acceptor,
            forager,
            selected_count_limit: DEFAULT_SELECTED_COUNT_LIMIT,
        }
    }

    pub fn with_selected_count_limit(mut self, limit: usize) -> Self {
        self.selected_count_limit = limit.max(1);
        self
    }
}

impl<D, MS, A, Fo> Phase<D> for LocalSearchPhase<MS, A, Fo>
where
    D: ScoreDirector,
    MS: MoveSelector,
    A: Acceptor,
    Fo: LocalSearchForager,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<D>, phase_index: usize) {
        let mut phase_scope = PhaseScope::new(solver_scope, phase_index, Phase::<D>::phase_type_name(self));
        let mut last_step_score = phase_scope.starting_score();
        self.acceptor.phase_started(&last_step_score);

        'steps: loop {
            if phase_scope.solver_scope().should_terminate() {
                break;
            }
            self.forager.step_started();
            self.acceptor.step_started();

            let mut doable_count = 0usize;
            for _ in 0..self.selected_count_limit {
                if phase_scope.solver_scope().should_terminate() {
                    break 'steps;
                }
                let scope = phase_scope.solver_scope_mut();
                let (director, rng) = scope.director_and_rng();
                let Some(candidate) = self.move_selector.next_move(director.working_solution(), rng)
                else {
                    break;
                };
                if !candidate.is_doable(scope.working_solution()) {
                    continue;
                }
                doable_count += 1;

                candidate.do_move(scope.score_director_mut());
                let move_score = scope.calculate_score();
                candidate.undo_move(scope.score_director_mut());

                let accepted =
                    self.acceptor
                        .is_accepted(&last_step_score, &move_score, &candidate, scope.rng());
                trace!(?candidate, score = %move_score, accepted, "evaluated move");
                phase_scope.record_move(accepted);
                if accepted {
                    self.forager.add_move(candidate, move_score);
                    if self.forager.is_quit_early() {
                        break;
                    }
                }
            }

            if doable_count == 0 {
                // Nothing left to try in this timetable.
                break;
            }

            if let Some((step_move, step_score)) = self.forager.pick_move() {
                let scope = phase_scope.solver_scope_mut();
                step_move.do_move(scope.score_director_mut());
                last_step_score = scope.calculate_score();
                debug_assert_eq!(last_step_score, step_score);
                self.acceptor.step_ended(&last_step_score, &step_move);
                scope.update_best_solution();
                trace!(
                    event = "step",
                    step = scope.total_step_count(),
                    step_move = ?step_move,
                    score = %last_step_score,
                );
            }
            phase_scope.increment_step_count();
        }

        self.acceptor.phase_ended();
        phase_scope.end();
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
