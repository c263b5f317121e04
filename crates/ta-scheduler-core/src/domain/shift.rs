use chrono::{NaiveTime, TimeDelta, Weekday};

/// A schedulable session that needs a fixed number of TAs.
///
/// Shifts of the same lab section in different weeks share a `series`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub id: String,
    pub series: String,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Week index within the schedule horizon.
    pub week: u32,
    pub required_tas: u32,
    /// Short display name, e.g. the room or section code.
    pub alias: Option<String>,
}

impl Shift {
    pub fn new(
        id: impl Into<String>,
        series: impl Into<String>,
        day_of_week: Weekday,
        start_time: NaiveTime,
        end_time: NaiveTime,
        required_tas: u32,
    ) -> Self {
        Self {
            id: id.into(),
            series: series.into(),
            day_of_week,
            start_time,
            end_time,
            week: 0,
            required_tas,
            alias: None,
        }
    }

    pub fn with_week(mut self, week: u32) -> Self {
        self.week = week;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Label used in reports: the alias if present, otherwise the series.
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.series)
    }
}
