//! Hand-written scenarios.

use chrono::{NaiveTime, Weekday};
use ta_scheduler_core::{ConstraintParameters, Shift, Ta, Timetable};

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid fixture time")
}

/// Afternoon shift on Monday of `week`, id doubling as series.
pub fn shift(id: &str, week: u32, required: u32) -> Shift {
    Shift::new(id, id, Weekday::Mon, time(14, 30), time(17, 30), required).with_week(week)
}

/// Five lab sessions needing {2, 3, 2, 1, 2} TAs and five TAs whose quotas
/// sum to the same ten seats. Every shift has enough available TAs, so a
/// zero-hard solution exists.
pub fn five_shift_timetable() -> Timetable {
    let day = (time(14, 30), time(17, 30));
    let evening = (time(18, 30), time(21, 30));
    let shifts = vec![
        Shift::new("L07", "L07", Weekday::Mon, day.0, day.1, 2),
        Shift::new("L08", "L08", Weekday::Mon, evening.0, evening.1, 3),
        Shift::new("L09", "L09", Weekday::Tue, day.0, day.1, 2),
        Shift::new("L10", "L10", Weekday::Tue, evening.0, evening.1, 1),
        Shift::new("L11", "L11", Weekday::Thu, evening.0, evening.1, 2),
    ];
    let tas = vec![
        Ta::new("ta-1", "M. Roghani", 3)
            .with_unavailable(["L11"])
            .with_desired(["L07", "L08", "L09"])
            .with_undesired(["L10"]),
        Ta::new("ta-2", "D. Noori", 2)
            .with_unavailable(["L07"])
            .with_undesired(["L09"]),
        Ta::new("ta-3", "A. Gholami", 1)
            .with_unavailable(["L08"])
            .with_desired(["L07"])
            .with_undesired(["L09"]),
        Ta::new("ta-4", "M. Jafari", 2)
            .with_unavailable(["L10"])
            .with_desired(["L08"])
            .with_undesired(["L09"]),
        Ta::new("ta-5", "A. Athar", 2)
            .with_desired(["L07"])
            .with_undesired(["L09", "L08", "L10", "L11"]),
    ];
    Timetable::new("five-shift", tas, shifts, ConstraintParameters::default())
        .expect("valid fixture")
}

/// Two shifts where `blocked` is unavailable for every TA.
pub fn unstaffable_timetable() -> Timetable {
    let shifts = vec![shift("open", 0, 1), shift("blocked", 0, 1)];
    let tas = vec![
        Ta::new("ta-1", "Ava", 1)
            .with_desired(["open"])
            .with_unavailable(["blocked"]),
        Ta::new("ta-2", "Ben", 1).with_unavailable(["blocked"]),
    ];
    Timetable::new("unstaffable", tas, shifts, ConstraintParameters::default())
        .expect("valid fixture")
}
