//! Demo timetables.

use chrono::{NaiveTime, Weekday};
use ta_scheduler::{ConstraintParameters, Result, Shift, Ta, Timetable};

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn lab_shifts(week: u32) -> Vec<Shift> {
    let day = (time(14, 30), time(17, 30));
    let evening = (time(18, 30), time(21, 30));
    let layout = [
        ("L07", Weekday::Mon, day, 2),
        ("L08", Weekday::Mon, evening, 3),
        ("L09", Weekday::Tue, day, 2),
        ("L10", Weekday::Tue, evening, 1),
        ("L11", Weekday::Thu, evening, 2),
    ];
    layout
        .into_iter()
        .map(|(series, weekday, (start, end), required)| {
            Shift::new(
                format!("{series}-w{week}"),
                series,
                weekday,
                start,
                end,
                required,
            )
            .with_week(week)
        })
        .collect()
}

/// Ids of `series` across `weeks`.
fn ids(series: &[&str], weeks: u32) -> Vec<String> {
    (0..weeks)
        .flat_map(|week| series.iter().map(move |s| format!("{s}-w{week}")))
        .collect()
}

/// Five lab sessions and five TAs over `weeks` weeks.
///
/// Quotas scale with the number of weeks, so seats and quotas stay balanced.
pub fn lab_timetable(name: &str, weeks: u32) -> Result<Timetable> {
    let weeks = weeks.max(1);
    let shifts: Vec<Shift> = (0..weeks).flat_map(lab_shifts).collect();
    let tas = vec![
        Ta::new("ta-1", "M. Roghani", 3 * weeks)
            .with_unavailable(ids(&["L11"], weeks))
            .with_desired(ids(&["L07", "L08", "L09"], weeks))
            .with_undesired(ids(&["L10"], weeks))
            .with_weekly_bounds(0, 3),
        Ta::new("ta-2", "D. Noori", 2 * weeks)
            .with_unavailable(ids(&["L07"], weeks))
            .with_undesired(ids(&["L09"], weeks))
            .grad_student(),
        Ta::new("ta-3", "A. Gholami", weeks)
            .with_unavailable(ids(&["L08"], weeks))
            .with_desired(ids(&["L07"], weeks))
            .with_undesired(ids(&["L09"], weeks)),
        Ta::new("ta-4", "M. Jafari", 2 * weeks)
            .with_unavailable(ids(&["L10"], weeks))
            .with_desired(ids(&["L08"], weeks))
            .with_undesired(ids(&["L09"], weeks))
            .grad_student(),
        Ta::new("ta-5", "A. Athar", 2 * weeks)
            .with_desired(ids(&["L07"], weeks))
            .with_undesired(ids(&["L08", "L09", "L10", "L11"], weeks)),
    ];
    Ok(Timetable::new(
        name,
        tas,
        shifts,
        ConstraintParameters::default(),
    )?)
}
