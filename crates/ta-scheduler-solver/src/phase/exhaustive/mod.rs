//! Exhaustive search phase using branch-and-bound.
//!
//! Depth first over slots in shift order. Within a shift TAs are chosen in
//! strictly increasing index order, so each set of TAs on a shift is
//! visited once and no TA sits on a shift twice. Choosing "leave empty"
//! for a seat leaves the rest of that shift's seats empty too.
//!
//! Nodes whose optimistic bound cannot strictly beat the incumbent are
//! pruned. A search that visits the whole remaining tree proves the best
//! solution optimal.

mod bounder;

#[cfg(test)]
mod tests;

use tracing::debug;

use ta_scheduler_core::{ShiftStatus, Timetable};
use ta_scheduler_scoring::ScoreDirector;

use crate::phase::Phase;
use crate::scope::{PhaseScope, SolverScope};
use crate::termination::TerminationReason;

pub use bounder::{NoScoreBounder, RuleScoreBounder, ScoreBounder};

/// Branch-and-bound over the full assignment space.
///
/// Clears the working timetable first; run a construction phase before it
/// so the incumbent starts out good and pruning bites early.
#[derive(Debug)]
pub struct ExhaustiveSearchPhase<B> {
    bounder: B,
    node_limit: Option<u64>,
}

impl<B: ScoreBounder> ExhaustiveSearchPhase<B> {
    pub fn new(bounder: B) -> Self {
        Self {
            bounder,
            node_limit: None,
        }
    }

    pub fn with_node_limit(mut self, node_limit: Option<u64>) -> Self {
        self.node_limit = node_limit;
        self
    }
}

impl<D, B> Phase<D> for ExhaustiveSearchPhase<B>
where
    D: ScoreDirector,
    B: ScoreBounder,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<D>, phase_index: usize) {
        let mut phase_scope = PhaseScope::new(solver_scope, phase_index, Phase::<D>::phase_type_name(self));
        let scope = phase_scope.solver_scope_mut();
        scope.update_best_solution();

        let slot_count = scope.working_solution().assignments().len();
        for slot in 0..slot_count {
            scope.score_director_mut().assign(slot, None);
        }
        let shifts = shift_plan(scope.working_solution());

        let mut search = BranchAndBound {
            bounder: &self.bounder,
            node_limit: self.node_limit,
            shifts: &shifts,
            nodes: 0,
            pruned: 0,
            aborted: false,
        };
        search.branch(scope, 0, 0, None, slot_count);

        debug!(
            nodes = search.nodes,
            pruned = search.pruned,
            complete = !search.aborted,
            "branch and bound finished"
        );
        if !search.aborted {
            scope.mark_proven_optimal();
            scope.stop(TerminationReason::Optimal);
        }

        if let Some(best) = scope.best_solution().cloned() {
            for slot in 0..slot_count {
                scope
                    .score_director_mut()
                    .assign(slot, best.assignment(slot).ta);
            }
        }
        phase_scope.end();
    }

    fn phase_type_name(&self) -> &'static str {
        "ExhaustiveSearch"
    }
}

/// One entry per shift with seats: its slots and its eligible TAs in
/// value order (desired, neutral, undesired; then by index).
struct ShiftPlan {
    slots: Vec<usize>,
    values: Vec<usize>,
}

fn shift_plan(timetable: &Timetable) -> Vec<ShiftPlan> {
    (0..timetable.shifts().len())
        .filter(|&shift| !timetable.slots_of_shift(shift).is_empty())
        .map(|shift| {
            let mut values = timetable.eligible_tas(shift).to_vec();
            values.sort_by_key(|&ta| {
                let rank = match timetable.status(ta, shift) {
                    ShiftStatus::Desired => 0,
                    ShiftStatus::Neutral => 1,
                    _ => 2,
                };
                (rank, ta)
            });
            ShiftPlan {
                slots: timetable.slots_of_shift(shift).to_vec(),
                values,
            }
        })
        .collect()
}

struct BranchAndBound<'a, B> {
    bounder: &'a B,
    node_limit: Option<u64>,
    shifts: &'a [ShiftPlan],
    nodes: u64,
    pruned: u64,
    aborted: bool,
}

impl<B: ScoreBounder> BranchAndBound<'_, B> {
    /// Decides seat `seat` of shift `shift_pos`. `floor` is the TA on the
    /// previous seat of the same shift; `remaining` counts undecided slots.
    fn branch<D: ScoreDirector>(
        &mut self,
        scope: &mut SolverScope<D>,
        shift_pos: usize,
        seat: usize,
        floor: Option<usize>,
        remaining: usize,
    ) {
        if scope.should_terminate() {
            self.aborted = true;
            return;
        }
        if self.node_limit.is_some_and(|limit| self.nodes >= limit) {
            self.aborted = true;
            scope.stop(TerminationReason::NodeLimitReached);
            return;
        }
        self.nodes += 1;
        scope.record_node();

        let Some(plan) = self.shifts.get(shift_pos) else {
            scope.update_best_solution();
            return;
        };

        if let Some(best) = scope.best_score().copied() {
            let bound = self
                .bounder
                .optimistic_bound(scope.score_director_mut(), remaining);
            if bound.is_some_and(|bound| bound <= best) {
                self.pruned += 1;
                return;
            }
        }

        let slot = plan.slots[seat];
        let last_seat = seat + 1 == plan.slots.len();
        for &ta in &plan.values {
            if floor.is_some_and(|floor| ta <= floor) {
                continue;
            }
            scope.score_director_mut().assign(slot, Some(ta));
            if last_seat {
                self.branch(scope, shift_pos + 1, 0, None, remaining - 1);
            } else {
                self.branch(scope, shift_pos, seat + 1, Some(ta), remaining - 1);
            }
            scope.score_director_mut().assign(slot, None);
            if self.aborted {
                return;
            }
        }

        let empty_seats = plan.slots.len() - seat;
        self.branch(scope, shift_pos + 1, 0, None, remaining - empty_seats);
    }
}
