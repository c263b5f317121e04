//! Solver phases for different solving strategies
//!
//! Phases are the main building blocks of solving:
//! - ConstructionHeuristicPhase: fills empty slots to build an initial timetable
//! - LocalSearchPhase: improves the timetable with change and swap moves
//! - ExhaustiveSearchPhase: branch and bound over the whole assignment space

pub mod construction;
pub mod exhaustive;
pub mod localsearch;

use std::fmt::Debug;

use ta_scheduler_scoring::ScoreDirector;

use crate::scope::SolverScope;

/// A phase of the solving process.
///
/// Phases are executed in sequence by the solver. Each phase modifies the
/// working timetable and updates the best solution when it improves.
pub trait Phase<D: ScoreDirector>: Send + Debug {
    fn solve(&mut self, solver_scope: &mut SolverScope<D>, phase_index: usize);

    fn phase_type_name(&self) -> &'static str;
}
