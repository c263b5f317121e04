//! Per-rule score breakdown.
//!
//! Explains why a timetable scored the way it did: every rule of the active
//! set with its level, match count and contribution, down to individual
//! matches with a readable justification.

use std::fmt;

use ta_scheduler_core::{HardMediumSoftScore, Score, ScoreLevel, Timetable};

use crate::rule::{Rule, RuleSet};
use crate::tally::Tally;

/// The key a rule matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Justification {
    Shift { shift: usize },
    Ta { ta: usize },
    TaWeek { ta: usize, week: usize },
    TaShift { ta: usize, shift: usize },
    Slot { slot: usize },
}

impl Justification {
    pub fn describe(&self, timetable: &Timetable) -> String {
        match *self {
            Justification::Shift { shift } => {
                let def = timetable.shift(shift);
                format!("shift '{}' ({}, week {})", def.id, def.label(), def.week)
            }
            Justification::Ta { ta } => format!("TA '{}'", timetable.ta(ta).name),
            Justification::TaWeek { ta, week } => format!(
                "TA '{}' in week {}",
                timetable.ta(ta).name,
                timetable.week_ids()[week]
            ),
            Justification::TaShift { ta, shift } => format!(
                "TA '{}' on shift '{}'",
                timetable.ta(ta).name,
                timetable.shift(shift).id
            ),
            Justification::Slot { slot } => {
                let assignment = timetable.assignment(slot);
                let shift = &timetable.shift(assignment.shift).id;
                match assignment.ta {
                    Some(ta) => format!("TA '{}' on shift '{}'", timetable.ta(ta).name, shift),
                    None => format!("empty seat on shift '{}'", shift),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintMatch {
    pub justification: Justification,
    pub score: HardMediumSoftScore,
    pub description: String,
}

/// One rule's share of the score.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConstraintAnalysis {
    pub rule: Rule,
    pub name: &'static str,
    pub level: ScoreLevel,
    pub match_count: usize,
    pub score: HardMediumSoftScore,
    pub matches: Vec<ConstraintMatch>,
}

/// Breakdown of a timetable's score by rule, in rule-set order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScoreExplanation {
    pub rule_set: String,
    pub score: HardMediumSoftScore,
    pub constraints: Vec<ConstraintAnalysis>,
}

impl ScoreExplanation {
    pub fn analysis(&self, rule: Rule) -> Option<&ConstraintAnalysis> {
        self.constraints.iter().find(|c| c.rule == rule)
    }

    pub fn is_feasible(&self) -> bool {
        self.score.is_feasible()
    }

    /// Rules with at least one match whose score is non-zero.
    pub fn broken(&self) -> impl Iterator<Item = &ConstraintAnalysis> {
        self.constraints
            .iter()
            .filter(|c| c.score != HardMediumSoftScore::ZERO)
    }
}

impl fmt::Display for ScoreExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score {} (rule set '{}')", self.score, self.rule_set)?;
        for c in &self.constraints {
            writeln!(
                f,
                "  {:<6} {:>4} match(es) {:>24}  {}",
                c.level.as_str(),
                c.match_count,
                c.score.to_string(),
                c.name
            )?;
        }
        Ok(())
    }
}

/// Scores `timetable` from scratch under `rules`, itemized.
pub fn explain(timetable: &Timetable, rules: &RuleSet) -> ScoreExplanation {
    let tally = Tally::build(timetable);
    let constraints: Vec<ConstraintAnalysis> = rules
        .rules()
        .iter()
        .map(|&rule| {
            let mut matches = Vec::new();
            rule.for_each_match(timetable, &tally, |justification, weight| {
                matches.push(ConstraintMatch {
                    justification,
                    score: rule.score_of(weight),
                    description: justification.describe(timetable),
                });
            });
            ConstraintAnalysis {
                rule,
                name: rule.name(),
                level: rule.level(),
                match_count: matches.len(),
                score: matches.iter().map(|m| m.score).sum(),
                matches,
            }
        })
        .collect();

    ScoreExplanation {
        rule_set: rules.name().to_string(),
        score: constraints.iter().map(|c| c.score).sum(),
        constraints,
    }
}
