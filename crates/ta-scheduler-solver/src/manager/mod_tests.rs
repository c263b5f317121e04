//! Tests for SolverManager job handling.

use std::time::{Duration, Instant};

use tokio::sync::broadcast::error::TryRecvError;

use ta_scheduler_config::{SolverConfig, WeightsConfig};
use ta_scheduler_core::SchedulerError;
use ta_scheduler_test::{five_shift_timetable, generate_timetable, unstaffable_timetable, GeneratorConfig};

use super::*;
use crate::error::SolverError;
use crate::termination::TerminationReason;

const WAIT: Duration = Duration::from_secs(10);

fn bounded_manager() -> SolverManager {
    SolverManager::new(
        SolverConfig::new()
            .with_random_seed(11)
            .with_step_count_limit(300),
    )
    .unwrap()
}

/// Jobs run until cancelled.
fn open_ended_manager(jobs: usize) -> SolverManager {
    SolverManager::new(
        SolverConfig::new()
            .with_termination_seconds(120)
            .with_max_concurrent_jobs(jobs),
    )
    .unwrap()
}

#[test]
fn test_submit_and_wait_for_completion() {
    let manager = bounded_manager();
    let job_id = manager.submit(five_shift_timetable()).unwrap();

    let summary = manager.wait_for_completion(&job_id).unwrap();
    assert_eq!(manager.status(&job_id).unwrap(), JobStatus::Completed);
    assert_eq!(summary.job_id.as_ref(), Some(&job_id));
    assert_eq!(summary.score.hard(), 0);
    assert_eq!(summary.termination_reason, TerminationReason::StepLimitReached);

    let best = manager.best_solution(&job_id).unwrap().unwrap();
    assert_eq!(best.score(), Some(summary.score));
    let explanation = manager.explain(&job_id).unwrap().unwrap();
    assert_eq!(explanation.score, summary.score);
}

#[test]
fn test_events_are_strictly_improving() {
    let manager = bounded_manager();
    let (job_id, mut events) = manager
        .submit_and_listen(generate_timetable(3, GeneratorConfig::default()))
        .unwrap();
    let summary = manager.wait_for_completion(&job_id).unwrap();

    let mut scores = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => {
                assert_eq!(event.job_id, job_id);
                assert_eq!(event.timetable.score(), Some(event.score));
                scores.push(event.score);
            }
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    assert!(!scores.is_empty());
    assert!(scores.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(scores.last(), Some(&summary.score));
}

#[test]
fn test_cancel_keeps_scored_best() {
    let manager = open_ended_manager(1);
    let job_id = manager
        .submit(generate_timetable(5, GeneratorConfig::default()))
        .unwrap();
    manager.wait_for_best_solution(&job_id, WAIT).unwrap();
    manager.cancel(&job_id).unwrap();

    let summary = manager.wait_for_completion(&job_id).unwrap();
    assert_eq!(summary.termination_reason, TerminationReason::Cancelled);
    assert_eq!(manager.status(&job_id).unwrap(), JobStatus::Terminated);
    let best = manager.best_solution(&job_id).unwrap().unwrap();
    assert_eq!(best.score(), Some(summary.score));
}

#[test]
fn test_cancel_right_after_submit_terminates() {
    let manager = open_ended_manager(2);
    let started = Instant::now();
    let job_id = manager
        .submit(generate_timetable(8, GeneratorConfig::default()))
        .unwrap();
    manager.cancel(&job_id).unwrap();

    let summary = manager.wait_for_completion(&job_id).unwrap();
    assert!(started.elapsed() < WAIT);
    assert_eq!(summary.termination_reason, TerminationReason::Cancelled);
    assert_eq!(manager.status(&job_id).unwrap(), JobStatus::Terminated);
    if let Some(best) = manager.best_solution(&job_id).unwrap() {
        assert_eq!(best.score(), Some(summary.score));
    }
}

#[test]
fn test_queued_job_times_out_waiting_for_best() {
    let manager = open_ended_manager(1);
    let running = manager.submit(five_shift_timetable()).unwrap();
    manager.wait_for_best_solution(&running, WAIT).unwrap();

    let queued = manager.submit(five_shift_timetable()).unwrap();
    assert_eq!(manager.status(&queued).unwrap(), JobStatus::Queued);
    assert!(manager.best_solution(&queued).unwrap().is_none());
    let err = manager
        .wait_for_best_solution(&queued, Duration::from_millis(50))
        .unwrap_err();
    assert!(matches!(err, SolverError::Timeout(id) if id == queued));

    manager.cancel(&queued).unwrap();
    manager.cancel(&running).unwrap();
    manager.wait_for_completion(&running).unwrap();
    let summary = manager.wait_for_completion(&queued).unwrap();
    assert_eq!(summary.termination_reason, TerminationReason::Cancelled);
    assert_eq!(manager.status(&queued).unwrap(), JobStatus::Terminated);
}

#[test]
fn test_duplicate_id_conflicts_while_running() {
    let manager = open_ended_manager(2);
    let job_id = manager
        .submit_with_id("week-3", five_shift_timetable())
        .unwrap();

    let err = manager
        .submit_with_id("week-3", five_shift_timetable())
        .unwrap_err();
    assert!(matches!(err, SolverError::ConcurrentJobConflict(ref id) if *id == job_id));
    assert!(matches!(
        manager.remove_job(&job_id),
        Err(SolverError::ConcurrentJobConflict(_))
    ));

    manager.cancel(&job_id).unwrap();
    manager.wait_for_completion(&job_id).unwrap();

    // A finished id can be reused.
    let again = manager
        .submit_with_id("week-3", five_shift_timetable())
        .unwrap();
    assert_eq!(again, job_id);
    manager.cancel(&again).unwrap();
    manager.wait_for_completion(&again).unwrap();
}

#[test]
fn test_unknown_job() {
    let manager = bounded_manager();
    let missing = JobId::from("missing");
    assert!(matches!(
        manager.status(&missing),
        Err(SolverError::UnknownJob(_))
    ));
    assert!(matches!(
        manager.cancel(&missing),
        Err(SolverError::UnknownJob(_))
    ));
    assert!(matches!(
        manager.subscribe(&missing),
        Err(SolverError::UnknownJob(_))
    ));
}

#[test]
fn test_remove_finished_job() {
    let manager = bounded_manager();
    let job_id = manager.submit(five_shift_timetable()).unwrap();
    manager.wait_for_completion(&job_id).unwrap();

    assert_eq!(manager.list_jobs(), vec![job_id.clone()]);
    let best = manager.remove_job(&job_id).unwrap();
    assert!(best.is_some());
    assert!(manager.list_jobs().is_empty());
    assert!(matches!(
        manager.status(&job_id),
        Err(SolverError::UnknownJob(_))
    ));
}

#[test]
fn test_fatal_warnings_reject_submission() {
    let mut config = SolverConfig::new().with_step_count_limit(50);
    config.treat_warnings_as_fatal = true;
    let manager = SolverManager::new(config).unwrap();

    let err = manager.submit(unstaffable_timetable()).unwrap_err();
    assert!(matches!(
        err,
        SolverError::Scheduler(SchedulerError::InfeasibleWarning(_))
    ));
    assert!(manager.list_jobs().is_empty());
}

#[test]
fn test_feasibility_report_is_kept_per_job() {
    let manager = bounded_manager();
    let job_id = manager.submit(unstaffable_timetable()).unwrap();
    let summary = manager.wait_for_completion(&job_id).unwrap();

    let report = manager.feasibility_report(&job_id).unwrap();
    assert_eq!(report.unstaffable_shifts().collect::<Vec<_>>(), vec!["blocked"]);
    assert_eq!(report, summary.feasibility);
    assert_eq!(summary.score.hard(), -1);
}

#[test]
fn test_solve_and_wait_applies_weights() {
    let config = SolverConfig::new()
        .with_step_count_limit(100)
        .with_weights(WeightsConfig {
            desired_assignment_reward: Some(4),
            ..WeightsConfig::default()
        });
    let manager = SolverManager::new(config).unwrap();

    let outcome = manager.solve_and_wait(five_shift_timetable()).unwrap();
    assert_eq!(outcome.timetable.parameters().desired_assignment_reward, 4);
    assert_eq!(outcome.explanation.score, outcome.score());
    assert_eq!(manager.list_jobs().len(), 1);
}

#[test]
fn test_jobs_run_concurrently_and_independently() {
    let manager = SolverManager::new(
        SolverConfig::new()
            .with_random_seed(1)
            .with_step_count_limit(150)
            .with_max_concurrent_jobs(2),
    )
    .unwrap();
    let ids: Vec<JobId> = (0..3)
        .map(|seed| {
            manager
                .submit(generate_timetable(seed, GeneratorConfig::small()))
                .unwrap()
        })
        .collect();

    for id in &ids {
        let summary = manager.wait_for_completion(id).unwrap();
        assert_eq!(summary.job_id.as_ref(), Some(id));
    }
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(manager.list_jobs(), sorted);
}
