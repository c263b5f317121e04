use ta_scheduler_core::Timetable;
use ta_scheduler_test::{five_shift_timetable, generate_timetable, GeneratorConfig};

use super::*;
use crate::phase::construction::{ConstructionHeuristicPhase, FirstFitForager, SlotPlacer};
use crate::test_utils::{create_scope, TestScope};

fn tiny(seed: u64) -> Timetable {
    generate_timetable(
        seed,
        GeneratorConfig {
            shift_count: 4,
            ta_count: 3,
            week_count: 1,
            max_required: 2,
            ..GeneratorConfig::default()
        },
    )
}

fn run<B: ScoreBounder>(timetable: Timetable, phase: ExhaustiveSearchPhase<B>) -> TestScope {
    let mut scope = create_scope(timetable);
    scope.start_solving();
    scope.update_best_solution();
    ConstructionHeuristicPhase::new(SlotPlacer::new(), FirstFitForager::new())
        .solve(&mut scope, 0);
    let mut phase = phase;
    phase.solve(&mut scope, 1);
    scope
}

#[test]
fn test_proves_five_shift_optimal() {
    let scope = run(
        five_shift_timetable(),
        ExhaustiveSearchPhase::new(RuleScoreBounder::new()),
    );
    assert!(scope.is_proven_optimal());
    assert_eq!(scope.termination_reason(), Some(TerminationReason::Optimal));

    let best = *scope.best_score().unwrap();
    assert_eq!(best.hard(), 0);
    // The working timetable is restored to the best one.
    assert_eq!(scope.working_solution().score(), Some(best));
}

#[test]
fn test_pruning_keeps_the_optimum() {
    for seed in 0..4 {
        let pruned = run(tiny(seed), ExhaustiveSearchPhase::new(RuleScoreBounder::new()));
        let full = run(tiny(seed), ExhaustiveSearchPhase::new(NoScoreBounder));
        assert!(pruned.is_proven_optimal());
        assert!(full.is_proven_optimal());
        assert_eq!(pruned.best_score(), full.best_score(), "seed {seed}");
    }
}

#[test]
fn test_node_limit_stops_without_proof() {
    let scope = run(
        five_shift_timetable(),
        ExhaustiveSearchPhase::new(NoScoreBounder).with_node_limit(Some(50)),
    );
    assert!(!scope.is_proven_optimal());
    assert_eq!(
        scope.termination_reason(),
        Some(TerminationReason::NodeLimitReached)
    );
    // The construction incumbent survives.
    assert_eq!(scope.best_score().map(|s| s.hard()), Some(0));
}
