//! Score directors own the working timetable and keep its score current.

mod incremental;
mod simple;

#[cfg(test)]
mod tests;

use std::borrow::Cow;

use ta_scheduler_core::{HardMediumSoftScore, Timetable};

use crate::analysis::{explain, ScoreExplanation};
use crate::rule::RuleSet;
use crate::tally::Tally;

pub use incremental::IncrementalScoreDirector;
pub use simple::SimpleScoreDirector;

/// Manages the working timetable and its score.
///
/// Slot changes must be bracketed by `before_slot_changed` and
/// `after_slot_changed`; [`ScoreDirector::assign`] does this for callers.
pub trait ScoreDirector: Send {
    fn working_solution(&self) -> &Timetable;

    /// Raw mutable access. Bracket any slot change with the notifications,
    /// or call [`ScoreDirector::reset`] afterwards.
    fn working_solution_mut(&mut self) -> &mut Timetable;

    fn rule_set(&self) -> &RuleSet;

    /// Returns the current score and stamps it on the working timetable.
    fn calculate_score(&mut self) -> HardMediumSoftScore;

    fn before_slot_changed(&mut self, slot: usize);

    fn after_slot_changed(&mut self, slot: usize);

    /// Rebuilds any cached state from the working timetable.
    fn reset(&mut self);

    /// Current assignment counters, borrowed when the director keeps them.
    fn tally(&self) -> Cow<'_, Tally>;

    fn is_incremental(&self) -> bool {
        false
    }

    /// Places `ta` (or nobody) in `slot` with change notifications.
    fn assign(&mut self, slot: usize, ta: Option<usize>) {
        if self.working_solution().assignment(slot).ta == ta {
            return;
        }
        self.before_slot_changed(slot);
        self.working_solution_mut().assign(slot, ta);
        self.after_slot_changed(slot);
    }

    /// Snapshot of the working timetable.
    fn clone_working_solution(&self) -> Timetable {
        self.working_solution().clone()
    }

    /// Upper bound on the score reachable by filling `remaining` more seats.
    fn optimistic_bound(&mut self, remaining: usize) -> HardMediumSoftScore {
        let current = self.calculate_score();
        let tally = self.tally();
        let timetable = self.working_solution();
        self.rule_set()
            .rules()
            .iter()
            .fold(current, |bound, rule| {
                bound + rule.optimistic_gain(timetable, &tally, remaining)
            })
    }

    /// Itemized breakdown of the current score.
    fn explain(&self) -> ScoreExplanation {
        explain(self.working_solution(), self.rule_set())
    }
}
