//! Feasibility pre-check run before search.
//!
//! Flags inputs that no search can fully satisfy, without running one. The
//! report is itemized; callers decide whether warnings block solving.
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveTime, Weekday};
//! use ta_scheduler_core::{ConstraintParameters, FeasibilityReport, Shift, Ta, Timetable};
//!
//! let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
//! let end = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
//! let shifts = vec![Shift::new("s1", "L01", Weekday::Mon, start, end, 1)];
//! let tas = vec![Ta::new("a", "A", 1).with_unavailable(["s1"])];
//! let timetable = Timetable::new("t", tas, shifts, ConstraintParameters::default()).unwrap();
//!
//! let report = FeasibilityReport::check(&timetable);
//! assert_eq!(report.unstaffable_shifts().collect::<Vec<_>>(), vec!["s1"]);
//! assert!(report.into_result(true).is_err());
//! ```

use std::fmt;

use crate::domain::{ShiftStatus, Timetable};
use crate::error::{Result, SchedulerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Visibility only.
    Info,
    /// Some rule cannot be fully satisfied.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FindingKind {
    /// Seats in a week exceed the summed weekly maximum of all TAs.
    CapacityShortfall { week: u32, required: u64, capacity: u64 },
    /// Every TA marks the shift unavailable.
    UnstaffableShift { shift_id: String },
    /// Fewer TAs can work the shift than it requires.
    InsufficientEligibleTas {
        shift_id: String,
        required: u32,
        eligible: usize,
    },
    /// Nobody wants the shift.
    NoPreferenceSignal { shift_id: String },
    /// A TA is available for fewer shifts than their semester quota.
    QuotaUnreachable {
        ta_id: String,
        required: u32,
        available: usize,
    },
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::NoPreferenceSignal { .. } => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
}

impl From<FindingKind> for Finding {
    fn from(kind: FindingKind) -> Self {
        Self {
            severity: kind.severity(),
            kind,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        write!(f, "[{}] ", label)?;
        match &self.kind {
            FindingKind::CapacityShortfall {
                week,
                required,
                capacity,
            } => write!(
                f,
                "week {} needs {} seats but TAs can cover at most {}",
                week, required, capacity
            ),
            FindingKind::UnstaffableShift { shift_id } => {
                write!(f, "shift '{}' is unavailable for every TA", shift_id)
            }
            FindingKind::InsufficientEligibleTas {
                shift_id,
                required,
                eligible,
            } => write!(
                f,
                "shift '{}' requires {} TAs but only {} are available",
                shift_id, required, eligible
            ),
            FindingKind::NoPreferenceSignal { shift_id } => {
                write!(f, "no TA marked shift '{}' as desired", shift_id)
            }
            FindingKind::QuotaUnreachable {
                ta_id,
                required,
                available,
            } => write!(
                f,
                "TA '{}' must work {} shifts but is available for {}",
                ta_id, required, available
            ),
        }
    }
}

/// Itemized result of [`FeasibilityReport::check`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeasibilityReport {
    findings: Vec<Finding>,
}

impl FeasibilityReport {
    /// Inspects the problem instance. Never looks at current assignments.
    pub fn check(timetable: &Timetable) -> Self {
        let mut findings = Vec::new();

        let weekly_capacity: u64 = timetable
            .tas()
            .iter()
            .map(|ta| u64::from(ta.max_shifts_per_week))
            .sum();
        let mut weekly_required = vec![0u64; timetable.week_count()];
        for (shift_idx, shift) in timetable.shifts().iter().enumerate() {
            weekly_required[timetable.week_of(shift_idx)] += u64::from(shift.required_tas);
        }
        for (&week, &required) in timetable.week_ids().iter().zip(&weekly_required) {
            if required > weekly_capacity {
                findings.push(
                    FindingKind::CapacityShortfall {
                        week,
                        required,
                        capacity: weekly_capacity,
                    }
                    .into(),
                );
            }
        }

        for (shift_idx, shift) in timetable.shifts().iter().enumerate() {
            let eligible = timetable.eligible_tas(shift_idx).len();
            if shift.required_tas > 0 && eligible == 0 {
                findings.push(
                    FindingKind::UnstaffableShift {
                        shift_id: shift.id.clone(),
                    }
                    .into(),
                );
            }
            if (shift.required_tas as usize) > eligible {
                findings.push(
                    FindingKind::InsufficientEligibleTas {
                        shift_id: shift.id.clone(),
                        required: shift.required_tas,
                        eligible,
                    }
                    .into(),
                );
            }
            let desired = (0..timetable.tas().len())
                .any(|ta| timetable.status(ta, shift_idx) == ShiftStatus::Desired);
            if !desired {
                findings.push(
                    FindingKind::NoPreferenceSignal {
                        shift_id: shift.id.clone(),
                    }
                    .into(),
                );
            }
        }

        for (ta_idx, ta) in timetable.tas().iter().enumerate() {
            let available = (0..timetable.shifts().len())
                .filter(|&shift| timetable.status(ta_idx, shift) != ShiftStatus::Unavailable)
                .count();
            if (ta.required_shifts_per_semester as usize) > available {
                findings.push(
                    FindingKind::QuotaUnreachable {
                        ta_id: ta.id.clone(),
                        required: ta.required_shifts_per_semester,
                        available,
                    }
                    .into(),
                );
            }
        }

        Self { findings }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity == Severity::Warning)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Ids of shifts no TA can ever staff.
    pub fn unstaffable_shifts(&self) -> impl Iterator<Item = &str> {
        self.findings.iter().filter_map(|finding| match &finding.kind {
            FindingKind::UnstaffableShift { shift_id } => Some(shift_id.as_str()),
            _ => None,
        })
    }

    /// Returns the report, or an `InfeasibleWarning` error when
    /// `warnings_are_fatal` is set and any warning exists.
    pub fn into_result(self, warnings_are_fatal: bool) -> Result<Self> {
        if warnings_are_fatal && self.has_warnings() {
            Err(SchedulerError::InfeasibleWarning(self))
        } else {
            Ok(self)
        }
    }
}

impl fmt::Display for FeasibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(f, "{}", finding)?;
        }
        Ok(())
    }
}
