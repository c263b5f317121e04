use std::collections::{BTreeSet, HashMap};

use smallvec::SmallVec;

use super::{IdAllocator, Shift, ShiftAssignment, ShiftStatus, Ta};
use crate::error::{InputError, Result};
use crate::score::HardMediumSoftScore;

/// Weights of the configurable soft rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstraintParameters {
    /// Soft penalty per TA placed on an undesired shift.
    pub undesired_assignment_penalty: i64,
    /// Soft reward per TA placed on a desired shift.
    pub desired_assignment_reward: i64,
    /// Soft penalty per staffed shift lacking a grad and undergrad mix.
    pub missing_grad_penalty: i64,
}

impl Default for ConstraintParameters {
    fn default() -> Self {
        Self {
            undesired_assignment_penalty: 20,
            desired_assignment_reward: 1,
            missing_grad_penalty: 5,
        }
    }
}

impl ConstraintParameters {
    pub(crate) fn validate(&self) -> std::result::Result<(), InputError> {
        let weights = [
            ("undesired_assignment_penalty", self.undesired_assignment_penalty),
            ("desired_assignment_reward", self.desired_assignment_reward),
            ("missing_grad_penalty", self.missing_grad_penalty),
        ];
        for (name, value) in weights {
            if value < 0 {
                return Err(InputError::NegativeWeight { name, value });
            }
        }
        Ok(())
    }
}

/// The full problem instance and its current assignment state.
///
/// Construction validates the input and precomputes the lookup tables the
/// rules use: the `(ta, shift)` status matrix, per-shift eligible TAs,
/// per-shift slot lists and a dense week index.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use ta_scheduler_core::{ConstraintParameters, Shift, Ta, Timetable};
///
/// let start = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
/// let shifts = vec![Shift::new("s1", "L07", Weekday::Mon, start, end, 2)];
/// let tas = vec![
///     Ta::new("a", "Ava", 1).with_desired(["s1"]),
///     Ta::new("b", "Ben", 1),
/// ];
///
/// let timetable = Timetable::new("demo", tas, shifts, ConstraintParameters::default()).unwrap();
/// assert_eq!(timetable.assignments().len(), 2);
/// assert_eq!(timetable.unassigned_count(), 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Timetable {
    id: String,
    tas: Vec<Ta>,
    shifts: Vec<Shift>,
    assignments: Vec<ShiftAssignment>,
    parameters: ConstraintParameters,
    score: Option<HardMediumSoftScore>,
    #[cfg_attr(feature = "serde", serde(skip))]
    status: Vec<ShiftStatus>,
    #[cfg_attr(feature = "serde", serde(skip))]
    eligible: Vec<Vec<usize>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    slots_by_shift: Vec<SmallVec<[usize; 4]>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    week_of_shift: Vec<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    week_ids: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(skip))]
    ta_index: HashMap<String, usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    shift_index: HashMap<String, usize>,
}

impl Timetable {
    /// Validates the input and expands every shift into `required_tas` empty slots.
    pub fn new(
        id: impl Into<String>,
        tas: Vec<Ta>,
        shifts: Vec<Shift>,
        parameters: ConstraintParameters,
    ) -> Result<Self> {
        Self::with_allocator(id, tas, shifts, parameters, &mut IdAllocator::new())
    }

    /// Like [`Timetable::new`], drawing slot ids from `ids`.
    pub fn with_allocator(
        id: impl Into<String>,
        tas: Vec<Ta>,
        shifts: Vec<Shift>,
        parameters: ConstraintParameters,
        ids: &mut IdAllocator,
    ) -> Result<Self> {
        let mut slots = Vec::new();
        for (shift_idx, shift) in shifts.iter().enumerate() {
            for seat in 0..shift.required_tas {
                slots.push(ShiftAssignment::new(ids.next_id(), shift_idx, seat));
            }
        }
        Self::with_slots(id, tas, shifts, parameters, slots)
    }

    /// Builds a timetable from caller-provided slots, e.g. a previous solution.
    ///
    /// Every shift must have exactly `required_tas` slots and every index
    /// must resolve.
    pub fn with_slots(
        id: impl Into<String>,
        tas: Vec<Ta>,
        shifts: Vec<Shift>,
        parameters: ConstraintParameters,
        assignments: Vec<ShiftAssignment>,
    ) -> Result<Self> {
        let ta_index = index_ids(tas.iter().map(|ta| ta.id.as_str()), InputError::DuplicateTaId)?;
        let shift_index = index_ids(
            shifts.iter().map(|shift| shift.id.as_str()),
            InputError::DuplicateShiftId,
        )?;

        for shift in &shifts {
            if shift.end_time <= shift.start_time {
                return Err(InputError::InvertedShiftTimes {
                    shift_id: shift.id.clone(),
                }
                .into());
            }
        }

        for ta in &tas {
            ta.validate()?;
            if let Some(unknown) = ta
                .referenced_shift_ids()
                .find(|shift_id| !shift_index.contains_key(*shift_id))
            {
                return Err(InputError::UnknownShiftReference {
                    ta_id: ta.id.clone(),
                    shift_id: unknown.to_string(),
                }
                .into());
            }
        }

        parameters.validate()?;

        let mut slots_by_shift: Vec<SmallVec<[usize; 4]>> = vec![SmallVec::new(); shifts.len()];
        for (slot_idx, slot) in assignments.iter().enumerate() {
            if slot.shift >= shifts.len() {
                return Err(InputError::UnknownSlotReference {
                    slot: slot.id,
                    entity: "shift",
                    index: slot.shift,
                }
                .into());
            }
            if let Some(ta) = slot.ta.filter(|&ta| ta >= tas.len()) {
                return Err(InputError::UnknownSlotReference {
                    slot: slot.id,
                    entity: "TA",
                    index: ta,
                }
                .into());
            }
            slots_by_shift[slot.shift].push(slot_idx);
        }
        for (shift, slots) in shifts.iter().zip(&slots_by_shift) {
            if slots.len() != shift.required_tas as usize {
                return Err(InputError::SlotCountMismatch {
                    shift_id: shift.id.clone(),
                    slots: slots.len(),
                    required: shift.required_tas,
                }
                .into());
            }
        }

        let status: Vec<ShiftStatus> = tas
            .iter()
            .flat_map(|ta| shifts.iter().map(move |shift| ta.status_for(shift)))
            .collect();

        let eligible: Vec<Vec<usize>> = (0..shifts.len())
            .map(|shift_idx| {
                (0..tas.len())
                    .filter(|&ta_idx| {
                        status[ta_idx * shifts.len() + shift_idx] != ShiftStatus::Unavailable
                    })
                    .collect()
            })
            .collect();

        let week_ids: Vec<u32> = shifts
            .iter()
            .map(|shift| shift.week)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let week_of_shift: Vec<usize> = shifts
            .iter()
            .map(|shift| week_ids.partition_point(|&week| week < shift.week))
            .collect();

        Ok(Self {
            id: id.into(),
            tas,
            shifts,
            assignments,
            parameters,
            score: None,
            status,
            eligible,
            slots_by_shift,
            week_of_shift,
            week_ids,
            ta_index,
            shift_index,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tas(&self) -> &[Ta] {
        &self.tas
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn assignments(&self) -> &[ShiftAssignment] {
        &self.assignments
    }

    pub fn ta(&self, ta: usize) -> &Ta {
        &self.tas[ta]
    }

    pub fn shift(&self, shift: usize) -> &Shift {
        &self.shifts[shift]
    }

    pub fn assignment(&self, slot: usize) -> &ShiftAssignment {
        &self.assignments[slot]
    }

    pub fn parameters(&self) -> &ConstraintParameters {
        &self.parameters
    }

    /// Replaces the soft-rule weights, rejecting negative values.
    pub fn set_parameters(&mut self, parameters: ConstraintParameters) -> Result<()> {
        parameters.validate()?;
        self.parameters = parameters;
        self.score = None;
        Ok(())
    }

    pub fn score(&self) -> Option<HardMediumSoftScore> {
        self.score
    }

    pub fn set_score(&mut self, score: Option<HardMediumSoftScore>) {
        self.score = score;
    }

    /// Places `ta` (or nobody) in `slot`.
    ///
    /// Bypasses incremental scoring; solvers go through a score director.
    pub fn assign(&mut self, slot: usize, ta: Option<usize>) {
        self.assignments[slot].ta = ta;
    }

    /// Empties every slot.
    pub fn clear_assignments(&mut self) {
        for slot in &mut self.assignments {
            slot.ta = None;
        }
        self.score = None;
    }

    /// Status of `shift` for `ta`, precomputed at construction.
    #[inline]
    pub fn status(&self, ta: usize, shift: usize) -> ShiftStatus {
        self.status[ta * self.shifts.len() + shift]
    }

    /// TAs not marking `shift` unavailable, in index order.
    pub fn eligible_tas(&self, shift: usize) -> &[usize] {
        &self.eligible[shift]
    }

    /// Slot indices belonging to `shift`, in seat order.
    pub fn slots_of_shift(&self, shift: usize) -> &[usize] {
        &self.slots_by_shift[shift]
    }

    /// Dense week position of `shift`, in `0..week_count()`.
    #[inline]
    pub fn week_of(&self, shift: usize) -> usize {
        self.week_of_shift[shift]
    }

    pub fn week_count(&self) -> usize {
        self.week_ids.len()
    }

    /// Distinct week indices present in the horizon, ascending.
    pub fn week_ids(&self) -> &[u32] {
        &self.week_ids
    }

    pub fn ta_index(&self, ta_id: &str) -> Option<usize> {
        self.ta_index.get(ta_id).copied()
    }

    pub fn shift_index(&self, shift_id: &str) -> Option<usize> {
        self.shift_index.get(shift_id).copied()
    }

    pub fn unassigned_count(&self) -> usize {
        self.assignments.iter().filter(|slot| slot.ta.is_none()).count()
    }

    /// Shift indices `ta` currently works, in slot order.
    pub fn shifts_of_ta(&self, ta: usize) -> Vec<usize> {
        self.assignments
            .iter()
            .filter(|slot| slot.ta == Some(ta))
            .map(|slot| slot.shift)
            .collect()
    }

    /// TAs currently seated on `shift`.
    pub fn tas_on_shift(&self, shift: usize) -> impl Iterator<Item = usize> + '_ {
        self.slots_by_shift[shift]
            .iter()
            .filter_map(|&slot| self.assignments[slot].ta)
    }
}

fn index_ids<'a>(
    ids: impl Iterator<Item = &'a str>,
    duplicate: fn(String) -> InputError,
) -> std::result::Result<HashMap<String, usize>, InputError> {
    let mut index = HashMap::new();
    for (position, id) in ids.enumerate() {
        if index.insert(id.to_string(), position).is_some() {
            return Err(duplicate(id.to_string()));
        }
    }
    Ok(index)
}
