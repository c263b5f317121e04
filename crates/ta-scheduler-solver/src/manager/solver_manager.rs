//! SolverManager implementation.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, RwLock};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio::sync::broadcast;
use tracing::{error, info};

use ta_scheduler_config::SolverConfig;
use ta_scheduler_core::{FeasibilityReport, SchedulerError, Timetable};
use ta_scheduler_scoring::{explain, ScoreExplanation};

use crate::builder::SolverFactory;
use crate::error::{Result, SolverError};
use crate::event::{BestSolutionChanged, DEFAULT_EVENT_CAPACITY};
use crate::scope::{BestSolutionCallback, SolveContext};
use crate::solver::{SolveOutcome, SolveSummary};
use crate::termination::TerminationReason;

use super::{JobId, JobStatus};

/// Per-job state. Only the job's pool thread writes it.
struct JobState {
    status: JobStatus,
    best: Option<Timetable>,
    summary: Option<SolveSummary>,
    explanation: Option<ScoreExplanation>,
    feasibility: FeasibilityReport,
    failure: Option<String>,
}

struct Job {
    state: Mutex<JobState>,
    changed: Condvar,
    terminate: Arc<AtomicBool>,
    events: broadcast::Sender<BestSolutionChanged>,
}

impl Job {
    fn new(feasibility: FeasibilityReport) -> Self {
        let (events, _) = broadcast::channel(DEFAULT_EVENT_CAPACITY);
        Self {
            state: Mutex::new(JobState {
                status: JobStatus::Queued,
                best: None,
                summary: None,
                explanation: None,
                feasibility,
                failure: None,
            }),
            changed: Condvar::new(),
            terminate: Arc::new(AtomicBool::new(false)),
            events,
        }
    }
}

/// Runs solve jobs on a bounded thread pool.
///
/// Every job solves its own copy of the submitted timetable. Best solutions
/// are published under the job's lock and on a bounded broadcast channel,
/// in strictly improving order.
///
/// ```no_run
/// use std::time::Duration;
/// use ta_scheduler_config::SolverConfig;
/// use ta_scheduler_solver::SolverManager;
/// # fn demo(timetable: ta_scheduler_core::Timetable) -> ta_scheduler_solver::Result<()> {
/// let manager = SolverManager::new(SolverConfig::new().with_termination_seconds(5))?;
/// let job_id = manager.submit(timetable)?;
/// let _first = manager.wait_for_best_solution(&job_id, Duration::from_secs(1))?;
/// let summary = manager.wait_for_completion(&job_id)?;
/// println!("{} after {} steps", summary.score, summary.step_count);
/// # Ok(())
/// # }
/// ```
pub struct SolverManager {
    factory: Arc<SolverFactory>,
    pool: ThreadPool,
    jobs: RwLock<HashMap<JobId, Arc<Job>>>,
}

impl SolverManager {
    /// Validates `config` and starts a pool of `max_concurrent_jobs` threads.
    pub fn new(config: SolverConfig) -> Result<Self> {
        Self::with_factory(SolverFactory::new(config)?)
    }

    pub fn with_factory(factory: SolverFactory) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(factory.config().max_concurrent_jobs)
            .thread_name(|index| format!("ta-solver-{index}"))
            .build()
            .map_err(|e| SchedulerError::Internal(format!("solver pool: {e}")))?;
        Ok(Self {
            factory: Arc::new(factory),
            pool,
            jobs: RwLock::new(HashMap::new()),
        })
    }

    pub fn factory(&self) -> &SolverFactory {
        &self.factory
    }

    /// Submits under a fresh id and returns immediately.
    pub fn submit(&self, timetable: Timetable) -> Result<JobId> {
        self.submit_with_id(JobId::random(), timetable)
    }

    /// Submits under `job_id` and returns immediately.
    ///
    /// Fails with `ConcurrentJobConflict` while another job with the same id
    /// is queued or active. A finished job with the same id is replaced.
    pub fn submit_with_id(&self, job_id: impl Into<JobId>, timetable: Timetable) -> Result<JobId> {
        let job_id = job_id.into();
        let (job, timetable) = self.enqueue(&job_id, timetable)?;
        self.spawn(job_id.clone(), timetable, job);
        Ok(job_id)
    }

    /// Submits under a fresh id with a receiver subscribed before solving starts.
    pub fn submit_and_listen(
        &self,
        timetable: Timetable,
    ) -> Result<(JobId, broadcast::Receiver<BestSolutionChanged>)> {
        let job_id = JobId::random();
        let (job, timetable) = self.enqueue(&job_id, timetable)?;
        let receiver = job.events.subscribe();
        self.spawn(job_id.clone(), timetable, job);
        Ok((job_id, receiver))
    }

    /// Prepares the timetable and registers the job as queued.
    fn enqueue(&self, job_id: &JobId, timetable: Timetable) -> Result<(Arc<Job>, Timetable)> {
        if self.is_running(job_id) {
            return Err(SolverError::ConcurrentJobConflict(job_id.clone()));
        }
        let (timetable, feasibility) = self.factory.prepare(timetable)?;

        let job = Arc::new(Job::new(feasibility));
        {
            let mut jobs = self.jobs.write();
            if jobs
                .get(job_id)
                .is_some_and(|existing| existing.state.lock().status.is_running())
            {
                return Err(SolverError::ConcurrentJobConflict(job_id.clone()));
            }
            jobs.insert(job_id.clone(), Arc::clone(&job));
        }
        info!(
            event = "job_submitted",
            job_id = %job_id,
            timetable = timetable.id(),
            slots = timetable.assignments().len(),
        );
        Ok((job, timetable))
    }

    fn spawn(&self, job_id: JobId, timetable: Timetable, job: Arc<Job>) {
        let factory = Arc::clone(&self.factory);
        self.pool.spawn(move || {
            let context = {
                let mut state = job.state.lock();
                state.status = JobStatus::Active;
                SolveContext::new(state.feasibility.clone()).with_job_id(job_id.clone())
            };
            info!(event = "job_started", job_id = %job_id);

            let callback = best_solution_publisher(job_id.clone(), Arc::clone(&job));
            let flag = Arc::clone(&job.terminate);
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                factory.run(timetable, context, Some(flag), Some(callback))
            }));

            let mut state = job.state.lock();
            match result {
                Ok(outcome) => {
                    state.status = match outcome.summary.termination_reason {
                        TerminationReason::Cancelled => JobStatus::Terminated,
                        _ => JobStatus::Completed,
                    };
                    info!(
                        event = "job_finished",
                        job_id = %job_id,
                        status = %state.status,
                        score = %outcome.summary.score,
                    );
                    state.best = Some(outcome.timetable);
                    state.explanation = Some(outcome.explanation);
                    state.summary = Some(outcome.summary);
                }
                Err(payload) => {
                    let message = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "solver panicked".to_string());
                    error!(event = "job_failed", job_id = %job_id, %message);
                    state.status = JobStatus::Terminated;
                    state.failure = Some(message);
                }
            }
            drop(state);
            job.changed.notify_all();
        });
    }

    fn job(&self, job_id: &JobId) -> Result<Arc<Job>> {
        self.jobs
            .read()
            .get(job_id)
            .cloned()
            .ok_or_else(|| SolverError::UnknownJob(job_id.clone()))
    }

    fn is_running(&self, job_id: &JobId) -> bool {
        self.jobs
            .read()
            .get(job_id)
            .is_some_and(|job| job.state.lock().status.is_running())
    }

    pub fn status(&self, job_id: &JobId) -> Result<JobStatus> {
        Ok(self.job(job_id)?.state.lock().status)
    }

    /// Best timetable so far, without blocking.
    pub fn best_solution(&self, job_id: &JobId) -> Result<Option<Timetable>> {
        Ok(self.job(job_id)?.state.lock().best.clone())
    }

    /// Blocks until the job has a best timetable or `timeout` elapses.
    pub fn wait_for_best_solution(&self, job_id: &JobId, timeout: Duration) -> Result<Timetable> {
        let job = self.job(job_id)?;
        let deadline = Instant::now() + timeout;
        let mut state = job.state.lock();
        loop {
            if let Some(best) = &state.best {
                return Ok(best.clone());
            }
            if let Some(failure) = &state.failure {
                return Err(SchedulerError::Internal(failure.clone()).into());
            }
            if job.changed.wait_until(&mut state, deadline).timed_out() {
                return state
                    .best
                    .clone()
                    .ok_or_else(|| SolverError::Timeout(job_id.clone()));
            }
        }
    }

    /// Blocks until the job is completed or terminated.
    pub fn wait_for_completion(&self, job_id: &JobId) -> Result<SolveSummary> {
        let job = self.job(job_id)?;
        let mut state = job.state.lock();
        while state.status.is_running() {
            job.changed.wait(&mut state);
        }
        finished_summary(&state)
    }

    /// Requests cooperative termination. The job still records a scored best
    /// timetable and ends as `Terminated`.
    pub fn cancel(&self, job_id: &JobId) -> Result<()> {
        let job = self.job(job_id)?;
        job.terminate.store(true, Ordering::SeqCst);
        info!(event = "job_cancel_requested", job_id = %job_id);
        Ok(())
    }

    /// Requests termination of every running job.
    pub fn cancel_all(&self) {
        for job in self.jobs.read().values() {
            job.terminate.store(true, Ordering::SeqCst);
        }
    }

    /// Best-solution events from now on.
    ///
    /// Slow receivers get `Lagged` and skip ahead; they never see events out
    /// of order.
    pub fn subscribe(&self, job_id: &JobId) -> Result<broadcast::Receiver<BestSolutionChanged>> {
        Ok(self.job(job_id)?.events.subscribe())
    }

    /// Score breakdown of the job's current best timetable.
    pub fn explain(&self, job_id: &JobId) -> Result<Option<ScoreExplanation>> {
        let job = self.job(job_id)?;
        let state = job.state.lock();
        if let Some(explanation) = &state.explanation {
            return Ok(Some(explanation.clone()));
        }
        Ok(state
            .best
            .as_ref()
            .map(|best| explain(best, self.factory.rule_set())))
    }

    pub fn feasibility_report(&self, job_id: &JobId) -> Result<FeasibilityReport> {
        Ok(self.job(job_id)?.state.lock().feasibility.clone())
    }

    /// Forgets a finished job and returns its best timetable.
    pub fn remove_job(&self, job_id: &JobId) -> Result<Option<Timetable>> {
        let mut jobs = self.jobs.write();
        let job = jobs
            .get(job_id)
            .ok_or_else(|| SolverError::UnknownJob(job_id.clone()))?;
        if job.state.lock().status.is_running() {
            return Err(SolverError::ConcurrentJobConflict(job_id.clone()));
        }
        Ok(jobs
            .remove(job_id)
            .and_then(|job| job.state.lock().best.take()))
    }

    /// Ids of all known jobs, sorted.
    pub fn list_jobs(&self) -> Vec<JobId> {
        let mut ids: Vec<JobId> = self.jobs.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Submits and blocks until the job ends.
    pub fn solve_and_wait(&self, timetable: Timetable) -> Result<SolveOutcome> {
        let job_id = self.submit(timetable)?;
        let job = self.job(&job_id)?;
        let mut state = job.state.lock();
        while state.status.is_running() {
            job.changed.wait(&mut state);
        }
        let summary = finished_summary(&state)?;
        match (state.best.clone(), state.explanation.clone()) {
            (Some(timetable), Some(explanation)) => Ok(SolveOutcome {
                timetable,
                explanation,
                summary,
            }),
            _ => Err(SchedulerError::Internal(format!("job {job_id} ended without a result")).into()),
        }
    }
}

impl Drop for SolverManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for SolverManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverManager")
            .field("config", self.factory.config())
            .field("jobs", &self.jobs.read().len())
            .finish()
    }
}

fn finished_summary(state: &JobState) -> Result<SolveSummary> {
    if let Some(failure) = &state.failure {
        return Err(SchedulerError::Internal(failure.clone()).into());
    }
    state
        .summary
        .clone()
        .ok_or_else(|| SchedulerError::Internal("job ended without a summary".to_string()).into())
}

/// Stores each new best under the job lock, wakes waiters and broadcasts it.
fn best_solution_publisher(job_id: JobId, job: Arc<Job>) -> BestSolutionCallback {
    let started = Instant::now();
    Box::new(move |timetable, score, step_count| {
        {
            let mut state = job.state.lock();
            state.best = Some(timetable.clone());
        }
        job.changed.notify_all();

        // No subscribers is not an error.
        let _ = job.events.send(BestSolutionChanged {
            job_id: job_id.clone(),
            timetable: timetable.clone(),
            score,
            step_count,
            elapsed: started.elapsed(),
        });
    })
}
