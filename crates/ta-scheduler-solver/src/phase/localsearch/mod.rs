//! Local search: step from timetable to timetable with sampled moves.

mod acceptor;
mod forager;
mod phase;

pub use acceptor::{
    Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor, SimulatedAnnealingAcceptor,
    TabuSearchAcceptor,
};
pub use forager::{AcceptedCountForager, LocalSearchForager};
pub use phase::{LocalSearchPhase, DEFAULT_SELECTED_COUNT_LIMIT};
