//! Score types for representing timetable quality
//!
//! A score is compared level by level: any hard difference outweighs every
//! medium and soft difference, and medium outweighs soft.

#[macro_use]
mod macros;

mod hard_medium_soft;
mod traits;

#[cfg(test)]
mod tests;

pub use hard_medium_soft::HardMediumSoftScore;
pub use traits::{ParseableScore, Score, ScoreParseError};

/// Score level a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreLevel {
    /// Violations make a timetable infeasible
    Hard,
    /// Structural shortfalls such as quota misses
    Medium,
    /// Preference optimization
    Soft,
}

impl ScoreLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLevel::Hard => "hard",
            ScoreLevel::Medium => "medium",
            ScoreLevel::Soft => "soft",
        }
    }
}

impl std::fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
