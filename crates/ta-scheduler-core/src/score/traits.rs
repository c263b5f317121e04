//! Core Score trait definition

use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

use thiserror::Error;

use super::ScoreLevel;

/// Behaviour shared by score types.
///
/// Scores are immutable values with a total, lexicographic ordering where a
/// higher score is better. Penalties are negative, rewards positive.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns true when no hard rule is violated.
    fn is_feasible(&self) -> bool;

    /// Returns the zero score (identity element for addition).
    fn zero() -> Self;

    /// Returns the number of score levels.
    fn levels_count() -> usize;

    /// Returns the level values, highest priority first.
    fn to_level_numbers(&self) -> Vec<i64>;

    /// Returns the value stored at one level.
    fn level_number(&self, level: ScoreLevel) -> i64;

    /// Builds a score with `amount` at `level` and zero elsewhere.
    fn of_level(level: ScoreLevel, amount: i64) -> Self;

    /// Returns true if this score is strictly better than `other`.
    fn is_better_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if this score is strictly worse than `other`.
    fn is_worse_than(&self, other: &Self) -> bool {
        self < other
    }
}

/// Scores that round-trip through their `Display` form.
pub trait ParseableScore: Score {
    /// Parses `"0hard/-3medium/12soft"` style input.
    fn parse(s: &str) -> Result<Self, ScoreParseError>;
}

/// Error when parsing a score from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreParseError {
    #[error("score '{input}' is missing the '{level}' level")]
    MissingLevel { input: String, level: &'static str },

    #[error("score '{input}' has a non-integer '{level}' level")]
    InvalidNumber { input: String, level: &'static str },

    #[error("score '{0}' has more levels than expected")]
    TrailingInput(String),
}
