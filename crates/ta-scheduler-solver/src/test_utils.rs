//! Shared helpers for unit tests.

use ta_scheduler_core::Timetable;
use ta_scheduler_scoring::{IncrementalScoreDirector, RuleSet};
use ta_scheduler_test::five_shift_timetable;

use crate::scope::SolverScope;

pub type TestScope = SolverScope<IncrementalScoreDirector>;

pub fn create_scope(timetable: Timetable) -> TestScope {
    SolverScope::with_seed(
        IncrementalScoreDirector::new(timetable, RuleSet::standard()),
        7,
    )
}

/// Seeded scope over the five-shift fixture, already started.
pub fn create_test_scope() -> TestScope {
    let mut scope = create_scope(five_shift_timetable());
    scope.start_solving();
    scope
}
