//! Tests for timetable construction and validation.

use chrono::{NaiveTime, Weekday};

use super::*;
use crate::error::{InputError, SchedulerError};

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn shift(id: &str, week: u32, required: u32) -> Shift {
    Shift::new(id, id, Weekday::Mon, time(14, 30), time(17, 30), required).with_week(week)
}

fn expect_input_error(result: crate::Result<Timetable>) -> InputError {
    match result {
        Err(SchedulerError::InvalidInput(err)) => err,
        other => panic!("expected invalid input, got {:?}", other.map(|t| t.id().to_string())),
    }
}

#[test]
fn test_expands_one_slot_per_seat() {
    let timetable = Timetable::new(
        "t",
        vec![Ta::new("a", "A", 1)],
        vec![shift("s1", 0, 2), shift("s2", 0, 3)],
        ConstraintParameters::default(),
    )
    .unwrap();

    assert_eq!(timetable.assignments().len(), 5);
    assert_eq!(timetable.slots_of_shift(0), &[0, 1]);
    assert_eq!(timetable.slots_of_shift(1), &[2, 3, 4]);
    let seats: Vec<u32> = timetable.assignments().iter().map(|s| s.seat).collect();
    assert_eq!(seats, vec![0, 1, 0, 1, 2]);
    assert!(timetable.assignments().iter().all(|s| s.ta.is_none()));
}

#[test]
fn test_slot_ids_come_from_allocator() {
    let mut ids = IdAllocator::starting_at(100);
    let timetable = Timetable::with_allocator(
        "t",
        vec![],
        vec![shift("s1", 0, 2)],
        ConstraintParameters::default(),
        &mut ids,
    )
    .unwrap();

    let slot_ids: Vec<usize> = timetable.assignments().iter().map(|s| s.id).collect();
    assert_eq!(slot_ids, vec![100, 101]);
    assert_eq!(ids.peek(), 102);
}

#[test]
fn test_status_matrix_and_eligibility() {
    let tas = vec![
        Ta::new("a", "A", 1).with_desired(["s1"]).with_unavailable(["s2"]),
        Ta::new("b", "B", 1).with_undesired(["s1"]),
    ];
    let timetable = Timetable::new(
        "t",
        tas,
        vec![shift("s1", 0, 1), shift("s2", 0, 1)],
        ConstraintParameters::default(),
    )
    .unwrap();

    assert_eq!(timetable.status(0, 0), ShiftStatus::Desired);
    assert_eq!(timetable.status(0, 1), ShiftStatus::Unavailable);
    assert_eq!(timetable.status(1, 0), ShiftStatus::Undesired);
    assert_eq!(timetable.status(1, 1), ShiftStatus::Neutral);
    assert_eq!(timetable.eligible_tas(0), &[0, 1]);
    assert_eq!(timetable.eligible_tas(1), &[1]);
    assert!(!timetable.ta(0).is_available_for(timetable.shift(1)));
}

#[test]
fn test_dense_week_index() {
    let timetable = Timetable::new(
        "t",
        vec![],
        vec![shift("s1", 7, 1), shift("s2", 3, 1), shift("s3", 7, 1)],
        ConstraintParameters::default(),
    )
    .unwrap();

    assert_eq!(timetable.week_ids(), &[3, 7]);
    assert_eq!(timetable.week_count(), 2);
    assert_eq!(timetable.week_of(0), 1);
    assert_eq!(timetable.week_of(1), 0);
    assert_eq!(timetable.week_of(2), 1);
}

#[test]
fn test_rejects_overlapping_preferences() {
    let ta = Ta::new("a", "A", 1)
        .with_desired(["s1"])
        .with_undesired(["s1"]);
    let err = expect_input_error(Timetable::new(
        "t",
        vec![ta],
        vec![shift("s1", 0, 1)],
        ConstraintParameters::default(),
    ));

    assert_eq!(
        err,
        InputError::OverlappingPreferences {
            ta_id: "a".into(),
            shift_id: "s1".into(),
            first: "desired",
            second: "undesired",
        }
    );
}

#[test]
fn test_rejects_undesired_and_unavailable_overlap() {
    let ta = Ta::new("a", "A", 1)
        .with_undesired(["s1"])
        .with_unavailable(["s1"]);
    let err = expect_input_error(Timetable::new(
        "t",
        vec![ta],
        vec![shift("s1", 0, 1)],
        ConstraintParameters::default(),
    ));

    assert!(matches!(
        err,
        InputError::OverlappingPreferences {
            first: "undesired",
            second: "unavailable",
            ..
        }
    ));
}

#[test]
fn test_rejects_duplicates_and_unknown_references() {
    let err = expect_input_error(Timetable::new(
        "t",
        vec![Ta::new("a", "A", 1), Ta::new("a", "Again", 1)],
        vec![shift("s1", 0, 1)],
        ConstraintParameters::default(),
    ));
    assert_eq!(err, InputError::DuplicateTaId("a".into()));

    let err = expect_input_error(Timetable::new(
        "t",
        vec![],
        vec![shift("s1", 0, 1), shift("s1", 1, 1)],
        ConstraintParameters::default(),
    ));
    assert_eq!(err, InputError::DuplicateShiftId("s1".into()));

    let err = expect_input_error(Timetable::new(
        "t",
        vec![Ta::new("a", "A", 1).with_desired(["nope"])],
        vec![shift("s1", 0, 1)],
        ConstraintParameters::default(),
    ));
    assert!(matches!(err, InputError::UnknownShiftReference { .. }));
}

#[test]
fn test_rejects_inverted_bounds_times_and_weights() {
    let err = expect_input_error(Timetable::new(
        "t",
        vec![Ta::new("a", "A", 1).with_weekly_bounds(3, 2)],
        vec![],
        ConstraintParameters::default(),
    ));
    assert!(matches!(err, InputError::WeeklyBoundsInverted { min: 3, max: 2, .. }));

    let backwards = Shift::new("s1", "L01", Weekday::Tue, time(18, 0), time(9, 0), 1);
    let err = expect_input_error(Timetable::new(
        "t",
        vec![],
        vec![backwards],
        ConstraintParameters::default(),
    ));
    assert!(matches!(err, InputError::InvertedShiftTimes { .. }));

    let params = ConstraintParameters {
        desired_assignment_reward: -1,
        ..ConstraintParameters::default()
    };
    let err = expect_input_error(Timetable::new("t", vec![], vec![], params));
    assert!(matches!(
        err,
        InputError::NegativeWeight {
            name: "desired_assignment_reward",
            value: -1
        }
    ));
}

#[test]
fn test_with_slots_validates_seat_counts() {
    let slots = vec![ShiftAssignment::new(0, 0, 0)];
    let err = expect_input_error(Timetable::with_slots(
        "t",
        vec![],
        vec![shift("s1", 0, 2)],
        ConstraintParameters::default(),
        slots,
    ));
    assert!(matches!(
        err,
        InputError::SlotCountMismatch {
            slots: 1,
            required: 2,
            ..
        }
    ));

    let slots = vec![ShiftAssignment::new(0, 0, 0).with_ta(4)];
    let err = expect_input_error(Timetable::with_slots(
        "t",
        vec![Ta::new("a", "A", 1)],
        vec![shift("s1", 0, 1)],
        ConstraintParameters::default(),
        slots,
    ));
    assert!(matches!(
        err,
        InputError::UnknownSlotReference {
            entity: "TA",
            index: 4,
            ..
        }
    ));
}

#[test]
fn test_assignment_queries() {
    let mut timetable = Timetable::new(
        "t",
        vec![Ta::new("a", "A", 2), Ta::new("b", "B", 1)],
        vec![shift("s1", 0, 2), shift("s2", 0, 1)],
        ConstraintParameters::default(),
    )
    .unwrap();

    timetable.assign(0, Some(0));
    timetable.assign(2, Some(0));
    timetable.assign(1, Some(1));

    assert_eq!(timetable.shifts_of_ta(0), vec![0, 1]);
    assert_eq!(timetable.tas_on_shift(0).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(timetable.unassigned_count(), 0);
    assert!(!timetable.assignment(0).has_same_ta(timetable.assignment(1)));
    assert!(timetable.assignment(0).has_same_ta(timetable.assignment(2)));

    timetable.clear_assignments();
    assert_eq!(timetable.unassigned_count(), 3);
}
