//! Random move selectors.
//!
//! Selectors sample one candidate at a time against the current timetable.
//! A sampled move may not be doable; callers check
//! [`Move::is_doable`](crate::heuristic::Move::is_doable) before evaluating it.

use std::fmt::Debug;

use rand::rngs::StdRng;
use rand::Rng;

use ta_scheduler_core::Timetable;

use super::r#move::{AssignmentMove, ChangeMove, SwapMove};

/// Samples candidate moves.
pub trait MoveSelector: Send + Debug {
    /// Returns `None` when the timetable offers no move of this kind at all.
    fn next_move(&mut self, timetable: &Timetable, rng: &mut StdRng) -> Option<AssignmentMove>;
}

/// Picks a random slot and a random value from the shift's eligible TAs
/// plus "leave empty".
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeMoveSelector;

impl ChangeMoveSelector {
    pub fn new() -> Self {
        Self
    }
}

impl MoveSelector for ChangeMoveSelector {
    fn next_move(&mut self, timetable: &Timetable, rng: &mut StdRng) -> Option<AssignmentMove> {
        let slot_count = timetable.assignments().len();
        if slot_count == 0 {
            return None;
        }
        let slot = rng.random_range(0..slot_count);
        let eligible = timetable.eligible_tas(timetable.assignment(slot).shift);
        let pick = rng.random_range(0..=eligible.len());
        let to = eligible.get(pick).copied();
        Some(ChangeMove::from_current(timetable, slot, to).into())
    }
}

/// Picks two random slots to exchange TAs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwapMoveSelector;

impl SwapMoveSelector {
    pub fn new() -> Self {
        Self
    }
}

impl MoveSelector for SwapMoveSelector {
    fn next_move(&mut self, timetable: &Timetable, rng: &mut StdRng) -> Option<AssignmentMove> {
        let slot_count = timetable.assignments().len();
        if slot_count < 2 || timetable.shifts().len() < 2 {
            return None;
        }
        let left = rng.random_range(0..slot_count);
        let mut right = rng.random_range(0..slot_count - 1);
        if right >= left {
            right += 1;
        }
        Some(SwapMove::new(timetable, left, right).into())
    }
}

/// Draws from either child with equal probability, falling back to the
/// other when one has nothing to offer.
#[derive(Debug, Clone, Default)]
pub struct UnionMoveSelector<A, B> {
    left: A,
    right: B,
}

impl<A, B> UnionMoveSelector<A, B> {
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl UnionMoveSelector<ChangeMoveSelector, SwapMoveSelector> {
    /// Change and swap moves, the fixed policy of the local search.
    pub fn change_and_swap() -> Self {
        Self::new(ChangeMoveSelector, SwapMoveSelector)
    }
}

impl<A: MoveSelector, B: MoveSelector> MoveSelector for UnionMoveSelector<A, B> {
    fn next_move(&mut self, timetable: &Timetable, rng: &mut StdRng) -> Option<AssignmentMove> {
        if rng.random_bool(0.5) {
            self.left
                .next_move(timetable, rng)
                .or_else(|| self.right.next_move(timetable, rng))
        } else {
            self.right
                .next_move(timetable, rng)
                .or_else(|| self.left.next_move(timetable, rng))
        }
    }
}
