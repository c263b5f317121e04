use ta_scheduler_scoring::{RuleSet, ScoreDirector, SimpleScoreDirector, Tally};
use ta_scheduler_test::{five_shift_timetable, unstaffable_timetable};

use super::*;
use crate::phase::Phase;
use crate::test_utils::create_scope;

#[test]
fn test_slot_order_is_most_constrained_first() {
    let tt = five_shift_timetable();
    assert_eq!(
        SlotPlacer::new().slot_order(&tt),
        vec![2, 3, 4, 0, 1, 8, 9, 5, 6, 7]
    );

    let tt = unstaffable_timetable();
    let blocked = tt.slots_of_shift(tt.shift_index("blocked").unwrap())[0];
    assert_eq!(SlotPlacer::new().slot_order(&tt)[0], blocked);
}

#[test]
fn test_slot_order_skips_filled_slots() {
    let mut tt = five_shift_timetable();
    tt.assign(2, Some(0));
    assert!(!SlotPlacer::new().slot_order(&tt).contains(&2));
}

#[test]
fn test_placement_prefers_desired_tas() {
    let tt = five_shift_timetable();
    let placement = SlotPlacer::new().placement(&tt, &Tally::build(&tt), 0);
    let tas: Vec<_> = placement.moves.iter().filter_map(|m| m.to()).collect();
    // Roghani, Gholami and Athar desire L07; Jafari is neutral; Noori is unavailable.
    assert_eq!(tas, vec![0, 2, 4, 3]);
}

#[test]
fn test_first_fit_takes_candidate_order_without_scoring() {
    let tt = five_shift_timetable();
    let mut placement = SlotPlacer::new().placement(&tt, &Tally::build(&tt), 0);
    placement.moves.reverse();
    let mut director = SimpleScoreDirector::new(tt, RuleSet::standard());

    assert_eq!(FirstFitForager::new().pick_move_index(&placement, &mut director), Some(0));
    assert_eq!(placement.moves[0].to(), Some(3));
    assert_eq!(director.working_solution().score(), None);
    assert_eq!(director.working_solution().assignment(0).ta, None);
}

#[test]
fn test_first_fit_fills_every_staffable_slot() {
    let mut scope = create_scope(five_shift_timetable());
    scope.start_solving();
    ConstructionHeuristicPhase::new(SlotPlacer::new(), FirstFitForager::new())
        .solve(&mut scope, 0);

    assert_eq!(scope.working_solution().unassigned_count(), 0);
    assert_eq!(scope.calculate_score().hard(), 0);
    assert_eq!(scope.best_score().map(|s| s.hard()), Some(0));
    assert_eq!(scope.total_step_count(), 10);
}

#[test]
fn test_best_fit_seats_desired_tas_first() {
    let mut scope = create_scope(five_shift_timetable());
    scope.start_solving();
    ConstructionHeuristicPhase::new(SlotPlacer::new(), BestFitForager::new())
        .solve(&mut scope, 0);

    let score = scope.calculate_score();
    assert_eq!(score.hard(), 0);
    assert_eq!(scope.working_solution().unassigned_count(), 0);
    assert_eq!(scope.best_score(), Some(&score));
}

#[test]
fn test_unstaffable_slot_stays_empty() {
    let mut scope = create_scope(unstaffable_timetable());
    scope.start_solving();
    ConstructionHeuristicPhase::new(SlotPlacer::new(), BestFitForager::new())
        .solve(&mut scope, 0);

    let tt = scope.working_solution();
    assert_eq!(tt.unassigned_count(), 1);
    let blocked = tt.slots_of_shift(tt.shift_index("blocked").unwrap())[0];
    assert_eq!(tt.assignment(blocked).ta, None);
    assert_eq!(scope.calculate_score().hard(), -1);
}
