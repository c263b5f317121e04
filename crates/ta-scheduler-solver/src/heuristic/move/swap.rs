//! SwapMove - two slots of different shifts exchange TAs.

use ta_scheduler_core::Timetable;
use ta_scheduler_scoring::ScoreDirector;

use super::{can_seat, Move};

/// Exchanges the TAs of two slots belonging to different shifts.
///
/// Swapping is its own inverse, but the move still remembers the values it
/// was sampled against so a stale swap is rejected by `is_doable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    slots: [usize; 2],
    left_ta: Option<usize>,
    right_ta: Option<usize>,
}

impl SwapMove {
    pub fn new(timetable: &Timetable, left: usize, right: usize) -> Self {
        Self {
            slots: [left, right],
            left_ta: timetable.assignment(left).ta,
            right_ta: timetable.assignment(right).ta,
        }
    }

    pub fn left(&self) -> usize {
        self.slots[0]
    }

    pub fn right(&self) -> usize {
        self.slots[1]
    }
}

impl Move for SwapMove {
    fn is_doable(&self, timetable: &Timetable) -> bool {
        let (left, right) = (self.left(), self.right());
        let left_shift = timetable.assignment(left).shift;
        let right_shift = timetable.assignment(right).shift;
        if left_shift == right_shift || self.left_ta == self.right_ta {
            return false;
        }
        if timetable.assignment(left).ta != self.left_ta
            || timetable.assignment(right).ta != self.right_ta
        {
            return false;
        }
        self.left_ta
            .map_or(true, |ta| can_seat(timetable, ta, right_shift, right))
            && self
                .right_ta
                .map_or(true, |ta| can_seat(timetable, ta, left_shift, left))
    }

    fn do_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        score_director.assign(self.left(), self.right_ta);
        score_director.assign(self.right(), self.left_ta);
    }

    fn undo_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        score_director.assign(self.left(), self.left_ta);
        score_director.assign(self.right(), self.right_ta);
    }

    fn slots(&self) -> &[usize] {
        &self.slots
    }
}
