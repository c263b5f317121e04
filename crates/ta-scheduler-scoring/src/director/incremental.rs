//! Incremental score director.

use std::borrow::Cow;

use ta_scheduler_core::{HardMediumSoftScore, Timetable};

use super::ScoreDirector;
use crate::rule::{calculate, touched_total, RuleSet};
use crate::tally::Tally;

/// Keeps a running score and adjusts it per slot change.
///
/// Retracting a seat subtracts the contributions of the keys it touches,
/// updates the tally and adds them back; inserting does the reverse. A
/// change costs one pass over the rules, independent of timetable size.
///
/// # Example
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use ta_scheduler_core::{ConstraintParameters, HardMediumSoftScore, Shift, Ta, Timetable};
/// use ta_scheduler_scoring::{IncrementalScoreDirector, RuleSet, ScoreDirector};
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// let shifts = vec![Shift::new("s1", "L01", Weekday::Mon, start, end, 1)];
/// let tas = vec![Ta::new("a", "Ava", 1).with_desired(["s1"])];
/// let timetable = Timetable::new("t", tas, shifts, ConstraintParameters::default()).unwrap();
///
/// let mut director = IncrementalScoreDirector::new(timetable, RuleSet::standard());
/// // One empty seat and one missed quota shift
/// assert_eq!(director.calculate_score(), HardMediumSoftScore::of(-1, -1, 0));
///
/// director.assign(0, Some(0));
/// assert_eq!(director.calculate_score(), HardMediumSoftScore::of(0, 0, 1));
/// ```
#[derive(Debug, Clone)]
pub struct IncrementalScoreDirector {
    working_solution: Timetable,
    rules: RuleSet,
    tally: Tally,
    cached_score: HardMediumSoftScore,
}

impl IncrementalScoreDirector {
    pub fn new(working_solution: Timetable, rules: RuleSet) -> Self {
        let tally = Tally::build(&working_solution);
        let cached_score = calculate(rules.rules(), &working_solution, &tally);
        Self {
            working_solution,
            rules,
            tally,
            cached_score,
        }
    }

    pub fn into_working_solution(self) -> Timetable {
        self.working_solution
    }

    fn seat_delta(&self, shift: usize, ta: usize, seated: bool) -> HardMediumSoftScore {
        touched_total(
            self.rules.rules(),
            &self.working_solution,
            &self.tally,
            shift,
            ta,
            seated,
        )
    }
}

impl ScoreDirector for IncrementalScoreDirector {
    fn working_solution(&self) -> &Timetable {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut Timetable {
        &mut self.working_solution
    }

    fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    fn calculate_score(&mut self) -> HardMediumSoftScore {
        self.working_solution.set_score(Some(self.cached_score));
        self.cached_score
    }

    fn before_slot_changed(&mut self, slot: usize) {
        let assignment = *self.working_solution.assignment(slot);
        if let Some(ta) = assignment.ta {
            let before = self.seat_delta(assignment.shift, ta, true);
            self.tally.retract(&self.working_solution, assignment.shift, ta);
            let after = self.seat_delta(assignment.shift, ta, false);
            self.cached_score = self.cached_score + after - before;
        }
    }

    fn after_slot_changed(&mut self, slot: usize) {
        let assignment = *self.working_solution.assignment(slot);
        if let Some(ta) = assignment.ta {
            let before = self.seat_delta(assignment.shift, ta, false);
            self.tally.insert(&self.working_solution, assignment.shift, ta);
            let after = self.seat_delta(assignment.shift, ta, true);
            self.cached_score = self.cached_score + after - before;
        }
    }

    fn reset(&mut self) {
        self.tally = Tally::build(&self.working_solution);
        self.cached_score = calculate(self.rules.rules(), &self.working_solution, &self.tally);
    }

    fn tally(&self) -> Cow<'_, Tally> {
        Cow::Borrowed(&self.tally)
    }

    fn is_incremental(&self) -> bool {
        true
    }

    fn optimistic_bound(&mut self, remaining: usize) -> HardMediumSoftScore {
        self.rules.rules().iter().fold(self.cached_score, |bound, rule| {
            bound + rule.optimistic_gain(&self.working_solution, &self.tally, remaining)
        })
    }
}
