//! Simple score director: full recalculation on every request.

use std::borrow::Cow;

use ta_scheduler_core::{HardMediumSoftScore, Timetable};

use super::ScoreDirector;
use crate::rule::{calculate, RuleSet};
use crate::tally::Tally;

/// Recomputes the score from scratch every time it is asked.
///
/// Slow but trivially correct; used as the reference the incremental
/// director is checked against, and selectable by configuration.
#[derive(Debug, Clone)]
pub struct SimpleScoreDirector {
    working_solution: Timetable,
    rules: RuleSet,
}

impl SimpleScoreDirector {
    pub fn new(working_solution: Timetable, rules: RuleSet) -> Self {
        Self {
            working_solution,
            rules,
        }
    }

    pub fn into_working_solution(self) -> Timetable {
        self.working_solution
    }
}

impl ScoreDirector for SimpleScoreDirector {
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
        let tally = Tally::build(&self.working_solution);
        let score = calculate(self.rules.rules(), &self.working_solution, &tally);
        self.working_solution.set_score(Some(score));
        score
    }

    fn before_slot_changed(&mut self, _slot: usize) {}

    fn after_slot_changed(&mut self, _slot: usize) {}

    fn reset(&mut self) {}

    fn tally(&self) -> Cow<'_, Tally> {
        Cow::Owned(Tally::build(&self.working_solution))
    }
}
