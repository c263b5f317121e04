//! Assignment counters shared by all rules.

use ta_scheduler_core::Timetable;

/// Per-key counts of the seated TAs in a timetable.
///
/// Every rule contribution is a function of these counters (or of a single
/// slot), which is what makes single-slot re-scoring possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    shift_count: usize,
    week_count: usize,
    filled: Vec<u32>,
    grads: Vec<u32>,
    ta_total: Vec<u32>,
    ta_week: Vec<u32>,
    ta_shift: Vec<u32>,
}

impl Tally {
    /// All counters at zero, sized for `timetable`.
    pub fn empty(timetable: &Timetable) -> Self {
        let shift_count = timetable.shifts().len();
        let week_count = timetable.week_count();
        let ta_count = timetable.tas().len();
        Self {
            shift_count,
            week_count,
            filled: vec![0; shift_count],
            grads: vec![0; shift_count],
            ta_total: vec![0; ta_count],
            ta_week: vec![0; ta_count * week_count],
            ta_shift: vec![0; ta_count * shift_count],
        }
    }

    /// Counters for the timetable's current assignments.
    pub fn build(timetable: &Timetable) -> Self {
        let mut tally = Self::empty(timetable);
        for slot in timetable.assignments() {
            if let Some(ta) = slot.ta {
                tally.insert(timetable, slot.shift, ta);
            }
        }
        tally
    }

    pub fn insert(&mut self, timetable: &Timetable, shift: usize, ta: usize) {
        let week = timetable.week_of(shift);
        self.filled[shift] += 1;
        if timetable.ta(ta).is_grad_student {
            self.grads[shift] += 1;
        }
        self.ta_total[ta] += 1;
        self.ta_week[ta * self.week_count + week] += 1;
        self.ta_shift[ta * self.shift_count + shift] += 1;
    }

    pub fn retract(&mut self, timetable: &Timetable, shift: usize, ta: usize) {
        let week = timetable.week_of(shift);
        self.filled[shift] -= 1;
        if timetable.ta(ta).is_grad_student {
            self.grads[shift] -= 1;
        }
        self.ta_total[ta] -= 1;
        self.ta_week[ta * self.week_count + week] -= 1;
        self.ta_shift[ta * self.shift_count + shift] -= 1;
    }

    /// Seated TAs on `shift`.
    #[inline]
    pub fn filled(&self, shift: usize) -> u32 {
        self.filled[shift]
    }

    /// Seated grad students on `shift`.
    #[inline]
    pub fn grads(&self, shift: usize) -> u32 {
        self.grads[shift]
    }

    /// True if `shift` is staffed but not by both a grad and an undergrad.
    #[inline]
    pub fn lacks_grad_mix(&self, shift: usize) -> bool {
        let filled = self.filled[shift];
        filled > 0 && (self.grads[shift] == 0 || self.grads[shift] == filled)
    }

    #[inline]
    pub fn ta_total(&self, ta: usize) -> u32 {
        self.ta_total[ta]
    }

    /// Shifts `ta` works in dense week `week`.
    #[inline]
    pub fn ta_week(&self, ta: usize, week: usize) -> u32 {
        self.ta_week[ta * self.week_count + week]
    }

    /// Seats `ta` holds on `shift`.
    #[inline]
    pub fn ta_shift(&self, ta: usize, shift: usize) -> u32 {
        self.ta_shift[ta * self.shift_count + shift]
    }
}
