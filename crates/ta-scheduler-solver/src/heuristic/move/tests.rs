use ta_scheduler_scoring::{IncrementalScoreDirector, RuleSet, ScoreDirector};
use ta_scheduler_test::{five_shift_timetable, unstaffable_timetable};

use super::*;

fn director() -> IncrementalScoreDirector {
    IncrementalScoreDirector::new(five_shift_timetable(), RuleSet::standard())
}

#[test]
fn test_change_move_do_and_undo() {
    let mut director = director();
    let before = director.calculate_score();

    let m = ChangeMove::from_current(director.working_solution(), 0, Some(0));
    assert!(m.is_doable(director.working_solution()));
    m.do_move(&mut director);
    assert_eq!(director.working_solution().assignment(0).ta, Some(0));
    assert_ne!(director.calculate_score(), before);

    m.undo_move(&mut director);
    assert_eq!(director.working_solution().assignment(0).ta, None);
    assert_eq!(director.calculate_score(), before);
}

#[test]
fn test_change_move_not_doable() {
    let mut director = director();
    let tt = director.working_solution();
    // No-op.
    assert!(!ChangeMove::from_current(tt, 0, None).is_doable(tt));
    // Stale: slot 0 is empty, not held by TA 1.
    assert!(!ChangeMove::new(0, Some(1), Some(2)).is_doable(tt));

    // Second seat of L07 cannot take the TA already on the first.
    director.assign(0, Some(0));
    let tt = director.working_solution();
    assert!(!ChangeMove::from_current(tt, 1, Some(0)).is_doable(tt));
}

#[test]
fn test_change_move_rejects_unavailable_ta() {
    let tt = unstaffable_timetable();
    let blocked_slot = tt.slots_of_shift(tt.shift_index("blocked").unwrap())[0];
    let ava = tt.ta_index("ta-1").unwrap();
    assert!(!ChangeMove::from_current(&tt, blocked_slot, Some(ava)).is_doable(&tt));
}

#[test]
fn test_swap_move_exchanges_and_restores() {
    let mut director = director();
    // Slot 0 is L07, slot 2 is L08.
    director.assign(0, Some(0));
    director.assign(2, Some(3));
    let before = director.calculate_score();

    let m = SwapMove::new(director.working_solution(), 0, 2);
    assert!(m.is_doable(director.working_solution()));
    m.do_move(&mut director);
    assert_eq!(director.working_solution().assignment(0).ta, Some(3));
    assert_eq!(director.working_solution().assignment(2).ta, Some(0));

    m.undo_move(&mut director);
    assert_eq!(director.working_solution().assignment(0).ta, Some(0));
    assert_eq!(director.calculate_score(), before);
}

#[test]
fn test_swap_move_same_shift_or_same_ta_is_not_doable() {
    let mut director = director();
    director.assign(0, Some(0));
    director.assign(1, Some(2));
    let tt = director.working_solution();
    assert!(!SwapMove::new(tt, 0, 1).is_doable(tt));
    // Both empty.
    assert!(!SwapMove::new(tt, 3, 5).is_doable(tt));
}

#[test]
fn test_assignment_move_delegates() {
    let tt = five_shift_timetable();
    let change: AssignmentMove = ChangeMove::from_current(&tt, 4, Some(1)).into();
    assert_eq!(change.slots(), &[4]);
    let swap: AssignmentMove = SwapMove::new(&tt, 1, 6).into();
    assert_eq!(swap.slots(), &[1, 6]);
}
