//! Builds solvers from [`SolverConfig`].

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::warn;

use ta_scheduler_config::{
    AcceptorConfig, ConstructionHeuristicType, ScoreDirectorType, SolverConfig, Strategy,
    DEFAULT_LATE_ACCEPTANCE_SIZE,
};
use ta_scheduler_core::{FeasibilityReport, Timetable};
use ta_scheduler_scoring::{
    IncrementalScoreDirector, RuleSet, RuleSetRegistry, ScoreDirector, SimpleScoreDirector,
};

use crate::error::Result;
use crate::heuristic::UnionMoveSelector;
use crate::phase::construction::{
    BestFitForager, ConstructionHeuristicPhase, FirstFitForager, SlotPlacer,
};
use crate::phase::exhaustive::{ExhaustiveSearchPhase, RuleScoreBounder};
use crate::phase::localsearch::{
    AcceptedCountForager, Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    LocalSearchPhase, SimulatedAnnealingAcceptor, TabuSearchAcceptor, DEFAULT_SELECTED_COUNT_LIMIT,
};
use crate::phase::Phase;
use crate::scope::{BestSolutionCallback, SolveContext};
use crate::solver::{SolveOutcome, Solver};
use crate::termination::{
    OrTermination, StepCountTermination, Termination, TimeTermination, UnimprovedTimeTermination,
};

/// Builds acceptors from configuration.
#[derive(Debug, Clone, Copy)]
pub struct AcceptorBuilder;

impl AcceptorBuilder {
    pub fn build(config: &AcceptorConfig) -> Box<dyn Acceptor> {
        match config {
            AcceptorConfig::HillClimbing => Box::new(HillClimbingAcceptor::new()),
            AcceptorConfig::LateAcceptance(c) => Box::new(LateAcceptanceAcceptor::new(
                c.late_acceptance_size
                    .unwrap_or(DEFAULT_LATE_ACCEPTANCE_SIZE),
            )),
            AcceptorConfig::SimulatedAnnealing(c) => Box::new(SimulatedAnnealingAcceptor::new(
                c.starting_temperature
                    .unwrap_or(SimulatedAnnealingAcceptor::DEFAULT_STARTING_TEMPERATURE),
                c.cooling_rate
                    .unwrap_or(SimulatedAnnealingAcceptor::DEFAULT_COOLING_RATE),
            )),
            AcceptorConfig::TabuSearch(c) => Box::new(TabuSearchAcceptor::new(
                c.slot_tabu_size
                    .unwrap_or(TabuSearchAcceptor::DEFAULT_SLOT_TABU_SIZE),
            )),
        }
    }
}

/// A validated configuration with its rule set resolved.
///
/// Turns timetables into [`SolveOutcome`]s: applies weight overrides, runs
/// the feasibility pre-check, builds the phases and terminations the
/// configuration asks for and solves with the configured score director.
#[derive(Debug, Clone)]
pub struct SolverFactory {
    config: SolverConfig,
    rule_set: RuleSet,
}

impl SolverFactory {
    /// Resolves the rule set against the built-in registry.
    pub fn new(config: SolverConfig) -> Result<Self> {
        Self::with_registry(config, &RuleSetRegistry::builtin())
    }

    pub fn with_registry(config: SolverConfig, registry: &RuleSetRegistry) -> Result<Self> {
        config.validate()?;
        let rule_set = registry.get(&config.rule_set)?.clone();
        Ok(Self { config, rule_set })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rule_set
    }

    /// Applies weight overrides and runs the feasibility pre-check.
    ///
    /// Fails with `InfeasibleWarning` when the configuration treats
    /// warnings as fatal and the pre-check raised any.
    pub fn prepare(&self, mut timetable: Timetable) -> Result<(Timetable, FeasibilityReport)> {
        let parameters = self.config.parameters(*timetable.parameters());
        timetable.set_parameters(parameters)?;

        let report = FeasibilityReport::check(&timetable);
        for finding in report.warnings() {
            warn!(timetable = timetable.id(), %finding, "feasibility warning");
        }
        let report = report.into_result(self.config.treat_warnings_as_fatal)?;
        Ok((timetable, report))
    }

    /// Prepares and solves on the calling thread.
    pub fn solve(&self, timetable: Timetable) -> Result<SolveOutcome> {
        let (timetable, report) = self.prepare(timetable)?;
        Ok(self.run(timetable, SolveContext::new(report), None, None))
    }

    /// Solves an already prepared timetable.
    pub fn run(
        &self,
        timetable: Timetable,
        context: SolveContext,
        terminate_early_flag: Option<Arc<AtomicBool>>,
        callback: Option<BestSolutionCallback>,
    ) -> SolveOutcome {
        match self.config.score_director {
            ScoreDirectorType::Incremental => self.run_with(
                IncrementalScoreDirector::new(timetable, self.rule_set.clone()),
                context,
                terminate_early_flag,
                callback,
            ),
            ScoreDirectorType::Simple => self.run_with(
                SimpleScoreDirector::new(timetable, self.rule_set.clone()),
                context,
                terminate_early_flag,
                callback,
            ),
        }
    }

    fn run_with<D: ScoreDirector + 'static>(
        &self,
        score_director: D,
        context: SolveContext,
        terminate_early_flag: Option<Arc<AtomicBool>>,
        callback: Option<BestSolutionCallback>,
    ) -> SolveOutcome {
        let mut solver = Solver::new(self.build_phases())
            .with_termination(self.build_termination())
            .with_random_seed(self.config.random_seed)
            .with_context(context);
        if let Some(flag) = terminate_early_flag {
            solver = solver.with_terminate_early_flag(flag);
        }
        if let Some(callback) = callback {
            solver = solver.with_best_solution_callback(callback);
        }
        solver.solve(score_director)
    }

    /// A construction phase followed by local search or branch and bound.
    pub fn build_phases<D: ScoreDirector + 'static>(&self) -> Vec<Box<dyn Phase<D>>> {
        let construction: Box<dyn Phase<D>> = match self.config.construction {
            ConstructionHeuristicType::FirstFit => Box::new(ConstructionHeuristicPhase::new(
                SlotPlacer::new(),
                FirstFitForager::new(),
            )),
            ConstructionHeuristicType::BestFit => Box::new(ConstructionHeuristicPhase::new(
                SlotPlacer::new(),
                BestFitForager::new(),
            )),
        };

        let improvement: Box<dyn Phase<D>> = match self.config.strategy {
            Strategy::LocalSearch => {
                let local_search = &self.config.local_search;
                let accepted_count_limit = local_search.accepted_count_limit_or_default();
                let acceptor = AcceptorBuilder::build(&local_search.acceptor_or_default());
                Box::new(
                    LocalSearchPhase::new(
                        UnionMoveSelector::change_and_swap(),
                        acceptor,
                        AcceptedCountForager::new(accepted_count_limit),
                    )
                    .with_selected_count_limit(
                        accepted_count_limit.max(DEFAULT_SELECTED_COUNT_LIMIT),
                    ),
                )
            }
            Strategy::Exact => Box::new(
                ExhaustiveSearchPhase::new(RuleScoreBounder::new())
                    .with_node_limit(self.config.exhaustive.node_limit),
            ),
        };

        vec![construction, improvement]
    }

    /// Any configured bound ends the solve.
    pub fn build_termination<D: ScoreDirector + 'static>(&self) -> Box<dyn Termination<D>> {
        Box::new(OrTermination::new((
            self.config.time_limit().map(TimeTermination::new),
            self.config
                .unimproved_time_limit()
                .map(UnimprovedTimeTermination::new),
            self.config.step_count_limit().map(StepCountTermination::new),
        )))
    }
}
