//! Tests for SolverFactory and AcceptorBuilder.

use ta_scheduler_config::{
    AcceptorConfig, LateAcceptanceConfig, SimulatedAnnealingConfig, SolverConfig, Strategy,
    TabuSearchConfig, WeightsConfig,
};
use ta_scheduler_core::SchedulerError;
use ta_scheduler_scoring::{IncrementalScoreDirector, RuleSet};
use ta_scheduler_test::{five_shift_timetable, unstaffable_timetable};

use crate::builder::{AcceptorBuilder, SolverFactory};
use crate::error::SolverError;

#[test]
fn test_acceptor_builder_variants() {
    let cases = [
        (AcceptorConfig::HillClimbing, "HillClimbingAcceptor"),
        (
            AcceptorConfig::LateAcceptance(LateAcceptanceConfig::default()),
            "LateAcceptanceAcceptor",
        ),
        (
            AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default()),
            "SimulatedAnnealingAcceptor",
        ),
        (
            AcceptorConfig::TabuSearch(TabuSearchConfig {
                slot_tabu_size: Some(3),
            }),
            "TabuSearchAcceptor",
        ),
    ];
    for (config, name) in cases {
        let acceptor = AcceptorBuilder::build(&config);
        assert!(format!("{acceptor:?}").starts_with(name), "{config:?}");
    }
}

#[test]
fn test_factory_resolves_rule_set() {
    let factory = SolverFactory::new(SolverConfig::new().with_rule_set("strict")).unwrap();
    assert_eq!(factory.rule_set(), &RuleSet::strict());
}

#[test]
fn test_unknown_rule_set_is_rejected() {
    let err = SolverFactory::new(SolverConfig::new().with_rule_set("weekend")).unwrap_err();
    assert!(matches!(err, SolverError::UnknownRuleSet(_)));
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = SolverFactory::new(SolverConfig::new().with_max_concurrent_jobs(0)).unwrap_err();
    assert!(matches!(err, SolverError::Config(_)));
}

#[test]
fn test_prepare_applies_weight_overrides() {
    let config = SolverConfig::new().with_weights(WeightsConfig {
        undesired_assignment_penalty: Some(35),
        ..WeightsConfig::default()
    });
    let factory = SolverFactory::new(config).unwrap();
    let (timetable, report) = factory.prepare(five_shift_timetable()).unwrap();

    assert_eq!(timetable.parameters().undesired_assignment_penalty, 35);
    assert_eq!(timetable.parameters().desired_assignment_reward, 1);
    assert!(!report.has_warnings());
}

#[test]
fn test_prepare_keeps_warnings_unless_fatal() {
    let factory = SolverFactory::new(SolverConfig::new()).unwrap();
    let (_, report) = factory.prepare(unstaffable_timetable()).unwrap();
    assert_eq!(report.unstaffable_shifts().collect::<Vec<_>>(), vec!["blocked"]);

    let mut config = SolverConfig::new();
    config.treat_warnings_as_fatal = true;
    let factory = SolverFactory::new(config).unwrap();
    let err = factory.prepare(unstaffable_timetable()).unwrap_err();
    assert!(matches!(
        err,
        SolverError::Scheduler(SchedulerError::InfeasibleWarning(_))
    ));
}

#[test]
fn test_build_phases_follow_strategy() {
    let local = SolverFactory::new(SolverConfig::new()).unwrap();
    let phases = local.build_phases::<IncrementalScoreDirector>();
    let names: Vec<_> = phases.iter().map(|p| p.phase_type_name()).collect();
    assert_eq!(names, vec!["ConstructionHeuristic", "LocalSearch"]);

    let exact = SolverFactory::new(SolverConfig::new().with_strategy(Strategy::Exact)).unwrap();
    let phases = exact.build_phases::<IncrementalScoreDirector>();
    let names: Vec<_> = phases.iter().map(|p| p.phase_type_name()).collect();
    assert_eq!(names, vec!["ConstructionHeuristic", "ExhaustiveSearch"]);
}

#[test]
fn test_factory_solve_scores_result() {
    let config = SolverConfig::new()
        .with_random_seed(5)
        .with_step_count_limit(200);
    let outcome = SolverFactory::new(config)
        .unwrap()
        .solve(five_shift_timetable())
        .unwrap();

    assert_eq!(outcome.timetable.score(), Some(outcome.score()));
    assert_eq!(outcome.explanation.score, outcome.score());
    assert_eq!(outcome.summary.job_id, None);
    assert!(outcome.summary.step_count <= 200);
}
