/// One seat of a shift, filled by at most one TA.
///
/// `shift` and `ta` are indices into the owning [`Timetable`](crate::Timetable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftAssignment {
    pub id: usize,
    pub shift: usize,
    /// Seat number within the shift, starting at 0.
    pub seat: u32,
    pub ta: Option<usize>,
}

impl ShiftAssignment {
    pub fn new(id: usize, shift: usize, seat: u32) -> Self {
        Self {
            id,
            shift,
            seat,
            ta: None,
        }
    }

    pub fn with_ta(mut self, ta: usize) -> Self {
        self.ta = Some(ta);
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.ta.is_some()
    }

    pub fn has_same_ta(&self, other: &ShiftAssignment) -> bool {
        self.ta.is_some() && self.ta == other.ta
    }
}
