//! Domain model for TA shift assignment
//!
//! A [`Timetable`] owns every [`Ta`], [`Shift`] and [`ShiftAssignment`] of one
//! problem instance. Slots refer to their shift and TA by index into the
//! timetable, so rules never look anything up by id while scoring.

mod assignment;
mod ids;
mod shift;
mod ta;
mod timetable;

#[cfg(test)]
mod tests;

pub use assignment::ShiftAssignment;
pub use ids::IdAllocator;
pub use shift::Shift;
pub use ta::{ShiftStatus, Ta};
pub use timetable::{ConstraintParameters, Timetable};
