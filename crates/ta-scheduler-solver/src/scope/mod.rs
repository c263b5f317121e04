//! Scopes carry state through the solve, phase and step hierarchy.

mod context;
mod phase;
mod solver;

pub use context::SolveContext;
pub use phase::PhaseScope;
pub use solver::{BestSolutionCallback, SolverScope};
