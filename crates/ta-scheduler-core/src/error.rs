//! Error types for the scheduler core

use thiserror::Error;

use crate::feasibility::FeasibilityReport;

/// Main error type for building and checking a problem instance.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Malformed or contradictory TA/shift data; solving never starts.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Pre-check findings the caller asked to treat as fatal.
    #[error("Infeasible input: {} warning(s) in feasibility report", .0.warning_count())]
    InfeasibleWarning(FeasibilityReport),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A single validation failure found while constructing a [`Timetable`](crate::Timetable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("duplicate TA id '{0}'")]
    DuplicateTaId(String),

    #[error("duplicate shift id '{0}'")]
    DuplicateShiftId(String),

    #[error("TA '{ta_id}' references unknown shift '{shift_id}'")]
    UnknownShiftReference { ta_id: String, shift_id: String },

    #[error("TA '{ta_id}' lists shift '{shift_id}' as both {first} and {second}")]
    OverlappingPreferences {
        ta_id: String,
        shift_id: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("TA '{ta_id}' has min_shifts_per_week {min} greater than max_shifts_per_week {max}")]
    WeeklyBoundsInverted { ta_id: String, min: u32, max: u32 },

    #[error("shift '{shift_id}' ends at or before its start time")]
    InvertedShiftTimes { shift_id: String },

    #[error("constraint weight '{name}' must not be negative, got {value}")]
    NegativeWeight { name: &'static str, value: i64 },

    #[error("assignment slot {slot} references unknown {entity} index {index}")]
    UnknownSlotReference {
        slot: usize,
        entity: &'static str,
        index: usize,
    },

    #[error("shift '{shift_id}' has {slots} slots but requires {required}")]
    SlotCountMismatch {
        shift_id: String,
        slots: usize,
        required: u32,
    },
}

/// Result type alias for scheduler core operations
pub type Result<T> = std::result::Result<T, SchedulerError>;
