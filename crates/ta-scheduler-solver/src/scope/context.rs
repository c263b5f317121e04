use ta_scheduler_core::FeasibilityReport;

use crate::manager::JobId;

/// Per-solve context: which job is running and what the pre-check found.
///
/// Passed down explicitly so that concurrent jobs never share state.
#[derive(Debug, Clone, Default)]
pub struct SolveContext {
    job_id: Option<JobId>,
    feasibility: FeasibilityReport,
}

impl SolveContext {
    pub fn new(feasibility: FeasibilityReport) -> Self {
        Self {
            job_id: None,
            feasibility,
        }
    }

    pub fn with_job_id(mut self, job_id: JobId) -> Self {
        self.job_id = Some(job_id);
        self
    }

    pub fn job_id(&self) -> Option<&JobId> {
        self.job_id.as_ref()
    }

    /// Job id for log fields; `"-"` for direct solves.
    pub fn job_label(&self) -> &str {
        self.job_id.as_ref().map_or("-", JobId::as_str)
    }

    pub fn feasibility(&self) -> &FeasibilityReport {
        &self.feasibility
    }
}
