//! End-to-end solves through SolverFactory.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use ta_scheduler_config::{
    AcceptorConfig, ConstructionHeuristicType, LateAcceptanceConfig, ScoreDirectorType,
    SimulatedAnnealingConfig, SolverConfig, Strategy, TabuSearchConfig,
};
use ta_scheduler_core::HardMediumSoftScore;
use ta_scheduler_scoring::{RuleSet, ScoreDirector, SimpleScoreDirector};
use ta_scheduler_test::{five_shift_timetable, generate_timetable, unstaffable_timetable, GeneratorConfig};

use crate::builder::SolverFactory;
use crate::scope::SolveContext;
use crate::termination::TerminationReason;

fn bounded(steps: u64) -> SolverConfig {
    SolverConfig::new()
        .with_random_seed(42)
        .with_step_count_limit(steps)
}

#[test]
fn test_local_search_staffs_five_shift_fixture() {
    let outcome = SolverFactory::new(bounded(300))
        .unwrap()
        .solve(five_shift_timetable())
        .unwrap();

    assert_eq!(outcome.score().hard(), 0);
    assert!(outcome.summary.is_feasible());
    assert_eq!(outcome.summary.hard_violations(), 0);
    assert_eq!(outcome.timetable.unassigned_count(), 0);
    assert_eq!(
        outcome.summary.termination_reason,
        TerminationReason::StepLimitReached
    );
    assert!(outcome.summary.is_best_effort());
    assert_eq!(outcome.summary.statistics.phase_count(), 2);
}

#[test]
fn test_reported_score_matches_rescore() {
    let config = bounded(400).with_rule_set("tabriz");
    let outcome = SolverFactory::new(config)
        .unwrap()
        .solve(generate_timetable(9, GeneratorConfig::default()))
        .unwrap();

    let mut director = SimpleScoreDirector::new(outcome.timetable.clone(), RuleSet::tabriz());
    assert_eq!(director.calculate_score(), outcome.score());
    assert_eq!(outcome.timetable.score(), Some(outcome.score()));
    let total: HardMediumSoftScore = outcome.explanation.constraints.iter().map(|c| c.score).sum();
    assert_eq!(total, outcome.score());
}

#[test]
fn test_exact_strategy_proves_optimality() {
    let config = SolverConfig::new().with_strategy(Strategy::Exact);
    let outcome = SolverFactory::new(config)
        .unwrap()
        .solve(five_shift_timetable())
        .unwrap();

    assert!(outcome.summary.proven_optimal);
    assert!(!outcome.summary.is_best_effort());
    assert_eq!(outcome.summary.termination_reason, TerminationReason::Optimal);
    assert_eq!(outcome.score().hard(), 0);
    assert!(outcome.summary.statistics.nodes_explored > 0);
}

#[test]
fn test_exact_never_loses_to_local_search() {
    let tiny = GeneratorConfig {
        shift_count: 4,
        ta_count: 3,
        ..GeneratorConfig::small()
    };
    for seed in 0..3 {
        let exact = SolverFactory::new(SolverConfig::new().with_strategy(Strategy::Exact))
            .unwrap()
            .solve(generate_timetable(seed, tiny))
            .unwrap();
        let local = SolverFactory::new(bounded(200))
            .unwrap()
            .solve(generate_timetable(seed, tiny))
            .unwrap();
        assert!(exact.summary.proven_optimal, "seed {seed}");
        assert!(exact.score() >= local.score(), "seed {seed}");
    }
}

#[test]
fn test_unstaffable_shift_reports_hard_violation() {
    let outcome = SolverFactory::new(bounded(100))
        .unwrap()
        .solve(unstaffable_timetable())
        .unwrap();

    assert_eq!(outcome.score().hard(), -1);
    assert!(!outcome.summary.is_feasible());
    assert_eq!(outcome.summary.hard_violations(), 1);
    assert_eq!(
        outcome
            .summary
            .feasibility
            .unstaffable_shifts()
            .collect::<Vec<_>>(),
        vec!["blocked"]
    );
}

#[test]
fn test_same_seed_same_result() {
    let run = || {
        SolverFactory::new(bounded(250))
            .unwrap()
            .solve(generate_timetable(4, GeneratorConfig::default()))
            .unwrap()
    };
    let first = run();
    let second = run();
    assert_eq!(first.score(), second.score());
    assert_eq!(first.timetable.assignments(), second.timetable.assignments());
    assert_eq!(first.summary.step_count, second.summary.step_count);
}

#[test]
fn test_score_directors_walk_the_same_path() {
    let solve = |kind| {
        let config = bounded(150).with_score_director(kind);
        SolverFactory::new(config)
            .unwrap()
            .solve(generate_timetable(2, GeneratorConfig::default()))
            .unwrap()
    };
    let incremental = solve(ScoreDirectorType::Incremental);
    let simple = solve(ScoreDirectorType::Simple);
    assert_eq!(incremental.score(), simple.score());
    assert_eq!(
        incremental.timetable.assignments(),
        simple.timetable.assignments()
    );
}

#[test]
fn test_every_acceptor_keeps_construction_quality() {
    let acceptors = [
        AcceptorConfig::HillClimbing,
        AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
            late_acceptance_size: Some(20),
        }),
        AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default()),
        AcceptorConfig::TabuSearch(TabuSearchConfig::default()),
    ];
    for acceptor in acceptors {
        let mut config = bounded(120).with_acceptor(acceptor.clone());
        config.construction = ConstructionHeuristicType::FirstFit;
        let outcome = SolverFactory::new(config)
            .unwrap()
            .solve(five_shift_timetable())
            .unwrap();
        assert_eq!(outcome.score().hard(), 0, "{acceptor:?}");
    }
}

#[test]
fn test_raised_flag_still_returns_scored_timetable() {
    let factory = SolverFactory::new(SolverConfig::new().with_termination_seconds(60)).unwrap();
    let (timetable, report) = factory.prepare(five_shift_timetable()).unwrap();
    let flag = Arc::new(AtomicBool::new(true));

    let outcome = factory.run(timetable, SolveContext::new(report), Some(flag), None);

    assert_eq!(outcome.summary.termination_reason, TerminationReason::Cancelled);
    assert_eq!(outcome.timetable.score(), Some(outcome.score()));
    assert_eq!(outcome.score(), HardMediumSoftScore::of(-10, -10, 0));
}

#[test]
fn test_best_solution_callback_sees_strict_improvements() {
    let factory = SolverFactory::new(bounded(300)).unwrap();
    let (timetable, report) = factory.prepare(five_shift_timetable()).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let outcome = factory.run(
        timetable,
        SolveContext::new(report),
        None,
        Some(Box::new(move |_, score, _| sink.lock().unwrap().push(score))),
    );

    let seen = seen.lock().unwrap();
    assert!(!seen.is_empty());
    assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(seen.last(), Some(&outcome.score()));
}
