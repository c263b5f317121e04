use std::borrow::Cow;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ta_scheduler_core::{HardMediumSoftScore, Timetable};
use ta_scheduler_test::{five_shift_timetable, generate_timetable, GeneratorConfig};

use super::*;
use crate::rule::RuleSetRegistry;

fn random_change(rng: &mut ChaCha8Rng, timetable: &Timetable) -> (usize, Option<usize>) {
    let slot = rng.random_range(0..timetable.assignments().len());
    let ta = if rng.random_bool(0.15) {
        None
    } else {
        Some(rng.random_range(0..timetable.tas().len()))
    };
    (slot, ta)
}

#[test]
fn test_incremental_matches_full_recalculation() {
    let registry = RuleSetRegistry::builtin();
    for name in ["default", "strict", "tabriz"] {
        let rules = registry.get(name).unwrap().clone();
        for seed in 0..6u64 {
            let timetable = generate_timetable(seed, GeneratorConfig::default());
            let mut incremental = IncrementalScoreDirector::new(timetable.clone(), rules.clone());
            let mut simple = SimpleScoreDirector::new(timetable, rules.clone());
            let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

            for step in 0..300 {
                let (slot, ta) = random_change(&mut rng, incremental.working_solution());
                incremental.assign(slot, ta);
                simple.assign(slot, ta);
                assert_eq!(
                    incremental.calculate_score(),
                    simple.calculate_score(),
                    "rule set {name}, seed {seed}, step {step}"
                );
            }
            assert_eq!(incremental.tally(), simple.tally());
        }
    }
}

#[test]
fn test_undo_restores_score() {
    let mut director =
        IncrementalScoreDirector::new(five_shift_timetable(), RuleSet::standard());
    let initial = director.calculate_score();

    director.assign(0, Some(0));
    director.assign(2, Some(3));
    assert_ne!(director.calculate_score(), initial);

    director.assign(2, None);
    director.assign(0, None);
    assert_eq!(director.calculate_score(), initial);
}

#[test]
fn test_calculate_score_stamps_solution() {
    let mut director = SimpleScoreDirector::new(five_shift_timetable(), RuleSet::standard());
    assert_eq!(director.working_solution().score(), None);
    let score = director.calculate_score();
    assert_eq!(director.working_solution().score(), Some(score));
    assert_eq!(score, HardMediumSoftScore::of(-10, -10, 0));
}

#[test]
fn test_calculate_score_is_idempotent() {
    let mut director =
        IncrementalScoreDirector::new(five_shift_timetable(), RuleSet::tabriz());
    director.assign(3, Some(1));
    let first = director.calculate_score();
    assert_eq!(director.calculate_score(), first);
    assert_eq!(director.calculate_score(), first);
}

#[test]
fn test_reset_after_raw_mutation() {
    let mut director =
        IncrementalScoreDirector::new(five_shift_timetable(), RuleSet::standard());
    director.working_solution_mut().assign(0, Some(0));
    director.reset();

    let mut reference = SimpleScoreDirector::new(
        director.clone_working_solution(),
        RuleSet::standard(),
    );
    assert_eq!(director.calculate_score(), reference.calculate_score());
}

#[test]
fn test_optimistic_bound_is_never_below_reachable_score() {
    let rules = RuleSet::standard();
    let mut empty = IncrementalScoreDirector::new(five_shift_timetable(), rules.clone());
    let mut simple = SimpleScoreDirector::new(five_shift_timetable(), rules.clone());
    let seats = empty.working_solution().assignments().len();
    let bound = empty.optimistic_bound(seats);
    assert_eq!(bound, simple.optimistic_bound(seats));

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..50 {
        let mut director = IncrementalScoreDirector::new(five_shift_timetable(), rules.clone());
        for slot in 0..seats {
            let ta = rng.random_range(0..director.working_solution().tas().len());
            director.assign(slot, Some(ta));
        }
        assert!(director.calculate_score() <= bound);
    }
}

#[test]
fn test_director_explain_matches_score() {
    let mut director =
        IncrementalScoreDirector::new(five_shift_timetable(), RuleSet::standard());
    director.assign(0, Some(4));
    let score = director.calculate_score();
    let explanation = director.explain();
    assert_eq!(explanation.score, score);
    assert_eq!(explanation.rule_set, "default");
}

#[test]
fn test_director_kinds() {
    let timetable = five_shift_timetable();
    assert!(IncrementalScoreDirector::new(timetable.clone(), RuleSet::standard()).is_incremental());
    assert!(!SimpleScoreDirector::new(timetable, RuleSet::standard()).is_incremental());
}

#[test]
fn test_incremental_tally_is_borrowed() {
    let mut director =
        IncrementalScoreDirector::new(five_shift_timetable(), RuleSet::standard());
    director.assign(0, Some(0));
    let tally = director.tally();
    assert!(matches!(tally, Cow::Borrowed(_)));
    assert_eq!(tally.ta_total(0), 1);

    let simple = SimpleScoreDirector::new(director.clone_working_solution(), RuleSet::standard());
    assert!(matches!(simple.tally(), Cow::Owned(_)));
    assert_eq!(simple.tally(), tally);
}
