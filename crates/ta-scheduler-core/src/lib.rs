//! TA Scheduler Core - problem model for TA shift assignment
//!
//! This crate provides the pieces every other scheduler crate builds on:
//! - The three-level [`HardMediumSoftScore`]
//! - The domain model: [`Ta`], [`Shift`], [`ShiftAssignment`], [`Timetable`]
//! - Input validation performed when a [`Timetable`] is constructed
//! - The [`feasibility`] pre-check run before any search starts

pub mod domain;
pub mod error;
pub mod feasibility;
pub mod score;

pub use domain::{
    ConstraintParameters, IdAllocator, Shift, ShiftAssignment, ShiftStatus, Ta, Timetable,
};
pub use error::{InputError, Result, SchedulerError};
pub use feasibility::{FeasibilityReport, Finding, FindingKind, Severity};
pub use score::{HardMediumSoftScore, ParseableScore, Score, ScoreLevel, ScoreParseError};
