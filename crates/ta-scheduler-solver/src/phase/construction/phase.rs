//! Construction heuristic phase implementation.

use tracing::trace;

use ta_scheduler_scoring::ScoreDirector;

use super::{ConstructionForager, SlotPlacer};
use crate::heuristic::Move;
use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};

/// Fills every empty slot once, in placer order, with the forager's pick.
///
/// A slot with no doable candidate stays empty.
#[derive(Debug)]
pub struct ConstructionHeuristicPhase<Fo> {
    placer: SlotPlacer,
    forager: Fo,
}

impl<Fo: ConstructionForager> ConstructionHeuristicPhase<Fo> {
    pub fn new(placer: SlotPlacer, forager: Fo) -> Self {
        Self { placer, forager }
    }
}

impl<D, Fo> Phase<D> for ConstructionHeuristicPhase<Fo>
where
    D: ScoreDirector,
    Fo: ConstructionForager,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<D>, phase_index: usize) {
        let mut phase_scope = PhaseScope::new(solver_scope, phase_index, Phase::<D>::phase_type_name(self));
        let order = self.placer.slot_order(phase_scope.solver_scope().working_solution());

        for slot in order {
            if phase_scope.solver_scope().should_terminate() {
                break;
            }
            let scope = phase_scope.solver_scope_mut();
            let placement = {
                let director = scope.score_director();
                self.placer
                    .placement(director.working_solution(), &director.tally(), slot)
            };
            let picked = self
                .forager
                .pick_move_index(&placement, scope.score_director_mut());

            if let Some(idx) = picked {
                let step_move = placement.moves[idx];
                step_move.do_move(scope.score_director_mut());
                let score = scope.calculate_score();
                trace!(event = "step", ?step_move, score = %score);
            }
            for idx in 0..placement.moves.len() {
                phase_scope.record_move(Some(idx) == picked);
            }
            phase_scope.increment_step_count();
        }

        phase_scope.solver_scope_mut().update_best_solution();
        phase_scope.end();
    }

    fn phase_type_name(&self) -> &'static str {
        "ConstructionHeuristic"
    }
}
