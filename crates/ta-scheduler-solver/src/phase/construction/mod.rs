//! Construction heuristic phase
//!
//! Builds an initial timetable by filling empty slots one at a time.

mod forager;
mod phase;
mod placer;

pub use forager::{BestFitForager, ConstructionForager, FirstFitForager};
pub use phase::ConstructionHeuristicPhase;
pub use placer::{Placement, SlotPlacer};

#[cfg(test)]
mod tests;
