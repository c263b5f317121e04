//! Slot placer for the construction heuristic.
//!
//! Decides which empty slot to fill next and which TAs to offer for it.

use std::cmp::Reverse;

use ta_scheduler_core::{ShiftStatus, Timetable};
use ta_scheduler_scoring::Tally;

use crate::heuristic::{ChangeMove, Move};

/// Candidate moves for one slot, best-looking first.
#[derive(Debug, Clone)]
pub struct Placement {
    pub slot: usize,
    pub moves: Vec<ChangeMove>,
}

impl Placement {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Orders empty slots most-constrained shift first: shifts whose eligible
/// TA count exceeds their seat count by the least come first, ties broken
/// by shift then seat order. Slots filled before the phase are left alone.
#[derive(Debug, Clone, Default)]
pub struct SlotPlacer;

impl SlotPlacer {
    pub fn new() -> Self {
        Self
    }

    pub fn slot_order(&self, timetable: &Timetable) -> Vec<usize> {
        let mut slots: Vec<usize> = (0..timetable.assignments().len())
            .filter(|&slot| !timetable.assignment(slot).is_assigned())
            .collect();
        slots.sort_by_key(|&slot| {
            let assignment = timetable.assignment(slot);
            let shift = assignment.shift;
            let slack = timetable.eligible_tas(shift).len() as i64
                - i64::from(timetable.shift(shift).required_tas);
            (slack, shift, assignment.seat)
        });
        slots
    }

    /// Doable candidates for `slot`: desired before neutral before
    /// undesired, then TAs still short of their quota, then by index.
    pub fn placement(&self, timetable: &Timetable, tally: &Tally, slot: usize) -> Placement {
        let shift = timetable.assignment(slot).shift;
        let mut moves: Vec<ChangeMove> = timetable
            .eligible_tas(shift)
            .iter()
            .map(|&ta| ChangeMove::from_current(timetable, slot, Some(ta)))
            .filter(|m| m.is_doable(timetable))
            .collect();
        moves.sort_by_key(|m| {
            let ta = m.to().unwrap_or_default();
            let rank = match timetable.status(ta, shift) {
                ShiftStatus::Desired => 0,
                ShiftStatus::Neutral => 1,
                ShiftStatus::Undesired => 2,
                ShiftStatus::Unavailable => 3,
            };
            let quota = timetable.ta(ta).required_shifts_per_semester;
            let under_quota = tally.ta_total(ta) < quota;
            (rank, Reverse(under_quota), ta)
        });
        Placement { slot, moves }
    }
}
