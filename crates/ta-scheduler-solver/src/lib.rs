//! TA Scheduler Solver Engine
//!
//! This crate provides the search side of the scheduler:
//! - [`Solver`] and [`SolverFactory`]
//! - Phases (construction heuristic, local search, exhaustive search)
//! - Change and swap moves over timetable slots
//! - Termination conditions
//! - [`SolverManager`] for concurrent jobs with best-solution events
//! - Configuration wiring (builder module)

pub mod builder;
pub mod error;
pub mod event;
pub mod heuristic;
pub mod manager;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod statistics;
pub mod termination;

#[cfg(test)]
mod builder_tests;
#[cfg(test)]
mod solver_tests;
#[cfg(test)]
mod test_utils;

pub use builder::{AcceptorBuilder, SolverFactory};
pub use error::{Result, SolverError};
pub use event::{BestSolutionChanged, DEFAULT_EVENT_CAPACITY};
pub use heuristic::{
    AssignmentMove, ChangeMove, ChangeMoveSelector, Move, MoveSelector, SwapMove,
    SwapMoveSelector, UnionMoveSelector,
};
pub use manager::{JobId, JobStatus, SolverManager};
pub use phase::{
    construction::{
        BestFitForager, ConstructionForager, ConstructionHeuristicPhase, FirstFitForager,
        Placement, SlotPlacer,
    },
    exhaustive::{ExhaustiveSearchPhase, NoScoreBounder, RuleScoreBounder, ScoreBounder},
    localsearch::{
        AcceptedCountForager, Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
        LocalSearchForager, LocalSearchPhase, SimulatedAnnealingAcceptor, TabuSearchAcceptor,
    },
    Phase,
};
pub use scope::{BestSolutionCallback, PhaseScope, SolveContext, SolverScope};
pub use solver::{SolveOutcome, SolveSummary, Solver};
pub use statistics::{PhaseStatistics, ScoreImprovement, SolverStatistics, StatisticsCollector};
pub use termination::{
    OrTermination, StepCountTermination, Termination, TerminationReason, TimeTermination,
    UnimprovedTimeTermination,
};
