//! Moves over slot assignments.
//!
//! Each move records what it needs to reverse itself, so evaluating a
//! candidate is do, score, undo against the same score director.

mod change;
mod swap;

#[cfg(test)]
mod tests;

use std::fmt::Debug;

use ta_scheduler_core::Timetable;
use ta_scheduler_scoring::ScoreDirector;

pub use change::ChangeMove;
pub use swap::SwapMove;

/// A move that changes one or more slots.
pub trait Move: Send + Sync + Debug {
    /// Returns true if this move can be executed in the current state.
    ///
    /// A move is not doable if it changes nothing, if it was sampled
    /// against a stale timetable, or if it would seat a TA on a shift they
    /// are unavailable for or already sit on.
    fn is_doable(&self, timetable: &Timetable) -> bool;

    fn do_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D);

    /// Reverses [`Move::do_move`]. Only valid right after it.
    fn undo_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D);

    /// Slots this move changes.
    fn slots(&self) -> &[usize];
}

/// The union of move kinds the local search draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentMove {
    Change(ChangeMove),
    Swap(SwapMove),
}

impl Move for AssignmentMove {
    fn is_doable(&self, timetable: &Timetable) -> bool {
        match self {
            AssignmentMove::Change(m) => m.is_doable(timetable),
            AssignmentMove::Swap(m) => m.is_doable(timetable),
        }
    }

    fn do_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        match self {
            AssignmentMove::Change(m) => m.do_move(score_director),
            AssignmentMove::Swap(m) => m.do_move(score_director),
        }
    }

    fn undo_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        match self {
            AssignmentMove::Change(m) => m.undo_move(score_director),
            AssignmentMove::Swap(m) => m.undo_move(score_director),
        }
    }

    fn slots(&self) -> &[usize] {
        match self {
            AssignmentMove::Change(m) => m.slots(),
            AssignmentMove::Swap(m) => m.slots(),
        }
    }
}

impl From<ChangeMove> for AssignmentMove {
    fn from(m: ChangeMove) -> Self {
        AssignmentMove::Change(m)
    }
}

impl From<SwapMove> for AssignmentMove {
    fn from(m: SwapMove) -> Self {
        AssignmentMove::Swap(m)
    }
}

/// True if `ta` may take a seat on `shift` without breaking availability
/// or sitting there twice. `ignore_slot` is the seat being vacated.
pub(crate) fn can_seat(timetable: &Timetable, ta: usize, shift: usize, ignore_slot: usize) -> bool {
    timetable.eligible_tas(shift).contains(&ta)
        && !timetable
            .slots_of_shift(shift)
            .iter()
            .any(|&slot| slot != ignore_slot && timetable.assignment(slot).ta == Some(ta))
}
