//! ChangeMove - puts a TA (or nobody) in one slot.

use ta_scheduler_core::Timetable;
use ta_scheduler_scoring::ScoreDirector;

use super::{can_seat, Move};

/// Assigns `to` to a slot that currently holds `from`.
///
/// Covers filling an empty slot, reassigning and unassigning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeMove {
    slot: [usize; 1],
    from: Option<usize>,
    to: Option<usize>,
}

impl ChangeMove {
    pub fn new(slot: usize, from: Option<usize>, to: Option<usize>) -> Self {
        Self {
            slot: [slot],
            from,
            to,
        }
    }

    /// Change from whatever the slot holds now.
    pub fn from_current(timetable: &Timetable, slot: usize, to: Option<usize>) -> Self {
        Self::new(slot, timetable.assignment(slot).ta, to)
    }

    pub fn slot(&self) -> usize {
        self.slot[0]
    }

    pub fn from(&self) -> Option<usize> {
        self.from
    }

    pub fn to(&self) -> Option<usize> {
        self.to
    }
}

impl Move for ChangeMove {
    fn is_doable(&self, timetable: &Timetable) -> bool {
        let slot = self.slot();
        if self.from == self.to || timetable.assignment(slot).ta != self.from {
            return false;
        }
        match self.to {
            None => true,
            Some(ta) => can_seat(timetable, ta, timetable.assignment(slot).shift, slot),
        }
    }

    fn do_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        score_director.assign(self.slot(), self.to);
    }

    fn undo_move<D: ScoreDirector + ?Sized>(&self, score_director: &mut D) {
        score_director.assign(self.slot(), self.from);
    }

    fn slots(&self) -> &[usize] {
        &self.slot
    }
}
