use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::*;
use crate::test_utils::create_test_scope;

#[test]
fn test_step_count_termination() {
    let mut scope = create_test_scope();
    let term = StepCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert_eq!(term.check(&scope), Some(TerminationReason::StepLimitReached));
}

#[test]
fn test_time_termination() {
    let scope = create_test_scope();
    assert!(!TimeTermination::seconds(60).is_terminated(&scope));

    thread::sleep(Duration::from_millis(5));
    assert_eq!(
        TimeTermination::millis(1).check(&scope),
        Some(TerminationReason::TimeBudgetExceeded)
    );
}

#[test]
fn test_time_termination_before_start() {
    let scope = crate::test_utils::create_scope(ta_scheduler_test::five_shift_timetable());
    assert!(!TimeTermination::millis(0).is_terminated(&scope));
}

#[test]
fn test_unimproved_time_resets_on_improvement() {
    let mut scope = create_test_scope();
    let term = UnimprovedTimeTermination::millis(20);

    thread::sleep(Duration::from_millis(30));
    assert_eq!(
        term.check(&scope),
        Some(TerminationReason::UnimprovedTimeExceeded)
    );

    assert!(scope.update_best_solution());
    assert!(!term.is_terminated(&scope));
}

#[test]
fn test_or_termination_reports_first_reason() {
    let mut scope = create_test_scope();
    let term = OrTermination::new((
        TimeTermination::seconds(60),
        StepCountTermination::new(1),
        StepCountTermination::new(1000),
    ));
    assert!(!term.is_terminated(&scope));

    scope.increment_step_count();
    assert_eq!(term.check(&scope), Some(TerminationReason::StepLimitReached));
}

#[test]
fn test_absent_termination_never_fires() {
    let mut scope = create_test_scope();
    let term = OrTermination::new((None::<TimeTermination>, Some(StepCountTermination::new(2))));
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_cancel_flag_wins() {
    let mut scope = create_test_scope();
    let flag = Arc::new(AtomicBool::new(false));
    scope.set_terminate_early_flag(flag.clone());
    assert!(!scope.should_terminate());

    flag.store(true, std::sync::atomic::Ordering::SeqCst);
    assert_eq!(scope.termination_reason(), Some(TerminationReason::Cancelled));
}

#[test]
fn test_scope_termination_and_stop_reason() {
    let mut scope = create_test_scope().with_termination(Box::new(StepCountTermination::new(1)));
    assert!(!scope.should_terminate());
    scope.stop(TerminationReason::NodeLimitReached);
    scope.increment_step_count();
    assert_eq!(
        scope.termination_reason(),
        Some(TerminationReason::NodeLimitReached)
    );
}
