//! Rule records.
//!
//! Each [`Rule`] declares a name, a score level, an impact direction and a
//! weight function over the [`Tally`]. Rules are plain data; the directors
//! evaluate any list of them uniformly.

mod registry;


use ta_scheduler_core::{HardMediumSoftScore, Score, ScoreLevel, ShiftStatus, Timetable};

use crate::analysis::Justification;
use crate::tally::Tally;

pub use registry::{RuleSet, RuleSetRegistry, UnknownRuleSet, DEFAULT_RULE_SET};

/// Whether a rule subtracts from or adds to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Penalty,
    Reward,
}

/// One scoring rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rule {
    /// Hard: seated count differs from `required_tas`, weight `|required - seated|`.
    ShiftCoverage,
    /// Hard: one TA holds several seats of a shift, 1 per extra seat.
    DuplicateAssignment,
    /// Hard: TA seated on a shift they marked unavailable.
    UnavailableShift,
    /// Medium: semester total below quota, weight is the shortfall.
    SemesterQuota,
    /// Hard: semester total differs from quota in either direction.
    SemesterQuotaExact,
    /// Medium: weekly count above `max_shifts_per_week`, weight is the excess.
    WeeklyOverAssignment,
    /// Medium: weekly count below `min_shifts_per_week`, weight is the shortfall.
    WeeklyUnderAssignment,
    /// Soft: TA seated on an undesired shift.
    UndesiredShift,
    /// Soft reward: TA seated on a desired shift.
    DesiredShift,
    /// Soft: staffed shift without both a grad and an undergrad TA.
    GradStudentPresence,
}

impl Rule {
    pub const fn name(self) -> &'static str {
        match self {
            Rule::ShiftCoverage => "Shift does not meet required TAs exactly",
            Rule::DuplicateAssignment => "TA duplicate shift assignment",
            Rule::UnavailableShift => "TA assigned to unavailable shift",
            Rule::SemesterQuota => "TA works fewer shifts than the semester quota",
            Rule::SemesterQuotaExact => "TA does not work exactly the semester quota",
            Rule::WeeklyOverAssignment => "TA works more than the maximum shifts per week",
            Rule::WeeklyUnderAssignment => "TA works fewer than the minimum shifts per week",
            Rule::UndesiredShift => "TA assigned to undesired shift",
            Rule::DesiredShift => "TA assigned to desired shift",
            Rule::GradStudentPresence => "Shift staffed without both a grad and an undergrad TA",
        }
    }

    pub const fn level(self) -> ScoreLevel {
        match self {
            Rule::ShiftCoverage
            | Rule::DuplicateAssignment
            | Rule::UnavailableShift
            | Rule::SemesterQuotaExact => ScoreLevel::Hard,
            Rule::SemesterQuota | Rule::WeeklyOverAssignment | Rule::WeeklyUnderAssignment => {
                ScoreLevel::Medium
            }
            Rule::UndesiredShift | Rule::DesiredShift | Rule::GradStudentPresence => {
                ScoreLevel::Soft
            }
        }
    }

    pub const fn impact(self) -> Impact {
        match self {
            Rule::DesiredShift => Impact::Reward,
            _ => Impact::Penalty,
        }
    }

    pub fn is_hard(self) -> bool {
        self.level() == ScoreLevel::Hard
    }

    /// Converts a non-negative weight into this rule's signed score.
    pub fn score_of(self, weight: i64) -> HardMediumSoftScore {
        let signed = match self.impact() {
            Impact::Penalty => -weight,
            Impact::Reward => weight,
        };
        HardMediumSoftScore::of_level(self.level(), signed)
    }

    /// Calls `on_match` with every match and its weight.
    ///
    /// Counter-based rules report only keys with a non-zero weight. Slot-based
    /// preference rules report every matching slot, even at weight 0.
    pub fn for_each_match(
        self,
        timetable: &Timetable,
        tally: &Tally,
        mut on_match: impl FnMut(Justification, i64),
    ) {
        let params = timetable.parameters();
        match self {
            Rule::ShiftCoverage => {
                for (shift, def) in timetable.shifts().iter().enumerate() {
                    let gap = i64::from(def.required_tas).abs_diff(i64::from(tally.filled(shift)));
                    if gap > 0 {
                        on_match(Justification::Shift { shift }, gap as i64);
                    }
                }
            }
            Rule::DuplicateAssignment => {
                for ta in 0..timetable.tas().len() {
                    for shift in 0..timetable.shifts().len() {
                        let seats = tally.ta_shift(ta, shift);
                        if seats > 1 {
                            on_match(Justification::TaShift { ta, shift }, i64::from(seats - 1));
                        }
                    }
                }
            }
            Rule::UnavailableShift | Rule::UndesiredShift | Rule::DesiredShift => {
                let (status, weight) = match self {
                    Rule::UnavailableShift => (ShiftStatus::Unavailable, 1),
                    Rule::UndesiredShift => {
                        (ShiftStatus::Undesired, params.undesired_assignment_penalty)
                    }
                    _ => (ShiftStatus::Desired, params.desired_assignment_reward),
                };
                for (slot, assignment) in timetable.assignments().iter().enumerate() {
                    if let Some(ta) = assignment.ta {
                        if timetable.status(ta, assignment.shift) == status {
                            on_match(Justification::Slot { slot }, weight);
                        }
                    }
                }
            }
            Rule::SemesterQuota | Rule::SemesterQuotaExact => {
                for (ta, def) in timetable.tas().iter().enumerate() {
                    let weight = self.quota_weight(def.required_shifts_per_semester, tally.ta_total(ta));
                    if weight > 0 {
                        on_match(Justification::Ta { ta }, weight);
                    }
                }
            }
            Rule::WeeklyOverAssignment | Rule::WeeklyUnderAssignment => {
                for (ta, def) in timetable.tas().iter().enumerate() {
                    for week in 0..timetable.week_count() {
                        let weight = self.weekly_weight(def, tally.ta_week(ta, week));
                        if weight > 0 {
                            on_match(Justification::TaWeek { ta, week }, weight);
                        }
                    }
                }
            }
            Rule::GradStudentPresence => {
                for shift in 0..timetable.shifts().len() {
                    if tally.lacks_grad_mix(shift) {
                        on_match(Justification::Shift { shift }, params.missing_grad_penalty);
                    }
                }
            }
        }
    }

    /// Full evaluation: total score and match count.
    pub fn evaluate(self, timetable: &Timetable, tally: &Tally) -> (HardMediumSoftScore, usize) {
        let mut weight = 0;
        let mut matches = 0;
        self.for_each_match(timetable, tally, |_, w| {
            weight += w;
            matches += 1;
        });
        (self.score_of(weight), matches)
    }

    /// Contribution of the keys a seat of `ta` on `shift` touches.
    ///
    /// `seated` says whether that seat is currently counted in `tally`. The
    /// difference of this value around a tally update is the score delta.
    pub fn touched_score(
        self,
        timetable: &Timetable,
        tally: &Tally,
        shift: usize,
        ta: usize,
        seated: bool,
    ) -> HardMediumSoftScore {
        let params = timetable.parameters();
        let weight = match self {
            Rule::ShiftCoverage => i64::from(timetable.shift(shift).required_tas)
                .abs_diff(i64::from(tally.filled(shift))) as i64,
            Rule::DuplicateAssignment => i64::from(tally.ta_shift(ta, shift).saturating_sub(1)),
            Rule::UnavailableShift => {
                i64::from(seated && timetable.status(ta, shift) == ShiftStatus::Unavailable)
            }
            Rule::SemesterQuota | Rule::SemesterQuotaExact => self.quota_weight(
                timetable.ta(ta).required_shifts_per_semester,
                tally.ta_total(ta),
            ),
            Rule::WeeklyOverAssignment | Rule::WeeklyUnderAssignment => {
                self.weekly_weight(timetable.ta(ta), tally.ta_week(ta, timetable.week_of(shift)))
            }
            Rule::UndesiredShift => {
                if seated && timetable.status(ta, shift) == ShiftStatus::Undesired {
                    params.undesired_assignment_penalty
                } else {
                    0
                }
            }
            Rule::DesiredShift => {
                if seated && timetable.status(ta, shift) == ShiftStatus::Desired {
                    params.desired_assignment_reward
                } else {
                    0
                }
            }
            Rule::GradStudentPresence => {
                if tally.lacks_grad_mix(shift) {
                    params.missing_grad_penalty
                } else {
                    0
                }
            }
        };
        self.score_of(weight)
    }

    /// Upper bound on how much this rule's score can still rise when at most
    /// `remaining` more seats get filled.
    pub fn optimistic_gain(
        self,
        timetable: &Timetable,
        tally: &Tally,
        remaining: usize,
    ) -> HardMediumSoftScore {
        let remaining = remaining as i64;
        let recoverable = match self {
            Rule::ShiftCoverage => timetable
                .shifts()
                .iter()
                .enumerate()
                .map(|(shift, def)| i64::from(def.required_tas.saturating_sub(tally.filled(shift))))
                .sum(),
            Rule::SemesterQuota | Rule::SemesterQuotaExact => timetable
                .tas()
                .iter()
                .enumerate()
                .map(|(ta, def)| {
                    i64::from(def.required_shifts_per_semester.saturating_sub(tally.ta_total(ta)))
                })
                .sum(),
            Rule::WeeklyUnderAssignment => timetable
                .tas()
                .iter()
                .enumerate()
                .map(|(ta, def)| {
                    (0..timetable.week_count())
                        .map(|week| {
                            i64::from(def.min_shifts_per_week.saturating_sub(tally.ta_week(ta, week)))
                        })
                        .sum::<i64>()
                })
                .sum(),
            Rule::DesiredShift => {
                return HardMediumSoftScore::of_level(
                    self.level(),
                    remaining * timetable.parameters().desired_assignment_reward,
                );
            }
            Rule::GradStudentPresence => {
                let missing = (0..timetable.shifts().len())
                    .filter(|&shift| tally.lacks_grad_mix(shift))
                    .count() as i64;
                return HardMediumSoftScore::of_level(
                    self.level(),
                    missing.min(remaining) * timetable.parameters().missing_grad_penalty,
                );
            }
            Rule::DuplicateAssignment
            | Rule::UnavailableShift
            | Rule::WeeklyOverAssignment
            | Rule::UndesiredShift => 0,
        };
        HardMediumSoftScore::of_level(self.level(), recoverable.min(remaining))
    }

    fn quota_weight(self, required: u32, total: u32) -> i64 {
        if self == Rule::SemesterQuotaExact {
            i64::from(required).abs_diff(i64::from(total)) as i64
        } else {
            i64::from(required.saturating_sub(total))
        }
    }

    fn weekly_weight(self, ta: &ta_scheduler_core::Ta, count: u32) -> i64 {
        if self == Rule::WeeklyOverAssignment {
            i64::from(count.saturating_sub(ta.max_shifts_per_week))
        } else {
            i64::from(ta.min_shifts_per_week.saturating_sub(count))
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sum of every rule's contribution for the keys a seat touches.
pub(crate) fn touched_total(
    rules: &[Rule],
    timetable: &Timetable,
    tally: &Tally,
    shift: usize,
    ta: usize,
    seated: bool,
) -> HardMediumSoftScore {
    rules
        .iter()
        .map(|rule| rule.touched_score(timetable, tally, shift, ta, seated))
        .sum()
}

/// Full score of `timetable` under `rules`.
pub fn calculate(rules: &[Rule], timetable: &Timetable, tally: &Tally) -> HardMediumSoftScore {
    rules
        .iter()
        .map(|rule| rule.evaluate(timetable, tally).0)
        .fold(HardMediumSoftScore::zero(), |acc, s| acc + s)
}
