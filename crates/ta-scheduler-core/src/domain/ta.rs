use std::collections::BTreeSet;

use super::Shift;
use crate::error::InputError;

/// How a TA feels about a particular shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftStatus {
    Desired,
    Undesired,
    Unavailable,
    #[default]
    Neutral,
}

impl ShiftStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ShiftStatus::Desired => "desired",
            ShiftStatus::Undesired => "undesired",
            ShiftStatus::Unavailable => "unavailable",
            ShiftStatus::Neutral => "neutral",
        }
    }
}

/// A teaching assistant and their workload bounds and shift preferences.
///
/// The three preference sets hold shift ids and must be pairwise disjoint;
/// [`Timetable`](crate::Timetable) construction rejects overlaps.
///
/// # Examples
///
/// ```
/// use ta_scheduler_core::Ta;
///
/// let ta = Ta::new("ta-1", "M. Roghani", 3)
///     .with_desired(["L07", "L08"])
///     .with_unavailable(["L11"])
///     .with_weekly_bounds(1, 2);
///
/// assert_eq!(ta.max_shifts_per_week, 2);
/// assert!(ta.desired.contains("L07"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ta {
    pub id: String,
    pub name: String,
    /// Shifts this TA should work over the whole horizon.
    pub required_shifts_per_semester: u32,
    pub skill_level: u32,
    pub min_shifts_per_week: u32,
    pub max_shifts_per_week: u32,
    pub is_grad_student: bool,
    pub desired: BTreeSet<String>,
    pub undesired: BTreeSet<String>,
    pub unavailable: BTreeSet<String>,
}

impl Ta {
    pub const DEFAULT_MIN_SHIFTS_PER_WEEK: u32 = 0;
    pub const DEFAULT_MAX_SHIFTS_PER_WEEK: u32 = 2;

    pub fn new(id: impl Into<String>, name: impl Into<String>, required_shifts: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            required_shifts_per_semester: required_shifts,
            skill_level: 0,
            min_shifts_per_week: Self::DEFAULT_MIN_SHIFTS_PER_WEEK,
            max_shifts_per_week: Self::DEFAULT_MAX_SHIFTS_PER_WEEK,
            is_grad_student: false,
            desired: BTreeSet::new(),
            undesired: BTreeSet::new(),
            unavailable: BTreeSet::new(),
        }
    }

    pub fn with_desired<I, S>(mut self, shift_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.desired.extend(shift_ids.into_iter().map(Into::into));
        self
    }

    pub fn with_undesired<I, S>(mut self, shift_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.undesired.extend(shift_ids.into_iter().map(Into::into));
        self
    }

    pub fn with_unavailable<I, S>(mut self, shift_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unavailable.extend(shift_ids.into_iter().map(Into::into));
        self
    }

    pub fn with_weekly_bounds(mut self, min: u32, max: u32) -> Self {
        self.min_shifts_per_week = min;
        self.max_shifts_per_week = max;
        self
    }

    pub fn with_skill_level(mut self, skill_level: u32) -> Self {
        self.skill_level = skill_level;
        self
    }

    pub fn grad_student(mut self) -> Self {
        self.is_grad_student = true;
        self
    }

    pub fn is_available_for(&self, shift: &Shift) -> bool {
        !self.unavailable.contains(&shift.id)
    }

    /// Classifies `shift` for this TA. Desired wins over undesired, which wins
    /// over unavailable; validated TAs never hit more than one.
    pub fn status_for(&self, shift: &Shift) -> ShiftStatus {
        if self.desired.contains(&shift.id) {
            ShiftStatus::Desired
        } else if self.undesired.contains(&shift.id) {
            ShiftStatus::Undesired
        } else if self.unavailable.contains(&shift.id) {
            ShiftStatus::Unavailable
        } else {
            ShiftStatus::Neutral
        }
    }

    /// Every shift id this TA mentions in any preference set.
    pub fn referenced_shift_ids(&self) -> impl Iterator<Item = &str> {
        self.desired
            .iter()
            .chain(&self.undesired)
            .chain(&self.unavailable)
            .map(String::as_str)
    }

    pub(crate) fn validate(&self) -> Result<(), InputError> {
        if self.min_shifts_per_week > self.max_shifts_per_week {
            return Err(InputError::WeeklyBoundsInverted {
                ta_id: self.id.clone(),
                min: self.min_shifts_per_week,
                max: self.max_shifts_per_week,
            });
        }

        let pairs = [
            (&self.desired, "desired", &self.undesired, "undesired"),
            (&self.desired, "desired", &self.unavailable, "unavailable"),
            (&self.undesired, "undesired", &self.unavailable, "unavailable"),
        ];
        for (left, first, right, second) in pairs {
            if let Some(shift_id) = left.intersection(right).next() {
                return Err(InputError::OverlappingPreferences {
                    ta_id: self.id.clone(),
                    shift_id: shift_id.clone(),
                    first,
                    second,
                });
            }
        }
        Ok(())
    }
}
