//! Rule-based scoring for TA timetables
//!
//! Scoring is driven by an ordered list of [`Rule`] records grouped into a
//! named [`RuleSet`]. A [`ScoreDirector`] owns the working timetable and keeps
//! its score current as slots change:
//!
//! - [`IncrementalScoreDirector`] re-scores only the keys a changed slot touches
//! - [`SimpleScoreDirector`] recalculates everything on every request
//!
//! [`explain`] itemizes a score per rule for reporting.

pub mod analysis;
pub mod director;
pub mod rule;
pub mod tally;

pub use analysis::{explain, ConstraintAnalysis, ConstraintMatch, Justification, ScoreExplanation};
pub use director::{IncrementalScoreDirector, ScoreDirector, SimpleScoreDirector};
pub use rule::{Impact, Rule, RuleSet, RuleSetRegistry, UnknownRuleSet, DEFAULT_RULE_SET};
pub use tally::Tally;
