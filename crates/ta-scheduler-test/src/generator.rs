//! Seeded random timetables.

use chrono::Weekday;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ta_scheduler_core::{ConstraintParameters, Shift, Ta, Timetable};

use crate::scenario::time;

const DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Shape of a generated timetable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    pub shift_count: usize,
    pub ta_count: usize,
    pub week_count: u32,
    pub max_required: u32,
    pub unavailable_ratio: f64,
    pub desired_ratio: f64,
    pub undesired_ratio: f64,
    pub grad_ratio: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shift_count: 12,
            ta_count: 8,
            week_count: 2,
            max_required: 3,
            unavailable_ratio: 0.1,
            desired_ratio: 0.2,
            undesired_ratio: 0.15,
            grad_ratio: 0.3,
        }
    }
}

impl GeneratorConfig {
    pub fn small() -> Self {
        Self {
            shift_count: 5,
            ta_count: 4,
            week_count: 1,
            max_required: 2,
            ..Self::default()
        }
    }
}

/// Builds a valid timetable from `seed`. Same seed, same timetable.
///
/// Semester quotas split the total seat count across TAs so the instance is
/// balanced, though not necessarily feasible.
pub fn generate_timetable(seed: u64, config: GeneratorConfig) -> Timetable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let shifts: Vec<Shift> = (0..config.shift_count)
        .map(|i| {
            let day = DAYS[i % DAYS.len()];
            let (start, end) = if rng.random_bool(0.5) {
                (time(14, 30), time(17, 30))
            } else {
                (time(18, 30), time(21, 30))
            };
            let required = rng.random_range(1..=config.max_required.max(1));
            let week = (i as u32) % config.week_count.max(1);
            Shift::new(format!("S{i:02}"), format!("L{:02}", i % 7), day, start, end, required)
                .with_week(week)
        })
        .collect();

    let seats: u32 = shifts.iter().map(|s| s.required_tas).sum();
    let ta_count = config.ta_count.max(1) as u32;
    let base = seats / ta_count;
    let extra = seats % ta_count;

    let tas: Vec<Ta> = (0..ta_count)
        .map(|i| {
            let quota = base + u32::from(i < extra);
            let mut desired = Vec::new();
            let mut undesired = Vec::new();
            let mut unavailable = Vec::new();
            for shift in &shifts {
                let roll: f64 = rng.random();
                if roll < config.unavailable_ratio {
                    unavailable.push(shift.id.clone());
                } else if roll < config.unavailable_ratio + config.desired_ratio {
                    desired.push(shift.id.clone());
                } else if roll
                    < config.unavailable_ratio + config.desired_ratio + config.undesired_ratio
                {
                    undesired.push(shift.id.clone());
                }
            }
            let mut ta = Ta::new(format!("ta-{i}"), format!("TA {i}"), quota)
                .with_desired(desired)
                .with_undesired(undesired)
                .with_unavailable(unavailable)
                .with_weekly_bounds(0, quota.max(2));
            if rng.random_bool(config.grad_ratio) {
                ta = ta.grad_student();
            }
            ta
        })
        .collect();

    Timetable::new(
        format!("generated-{seed}"),
        tas,
        shifts,
        ConstraintParameters::default(),
    )
    .expect("generator produces valid timetables")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_timetable() {
        let a = generate_timetable(7, GeneratorConfig::default());
        let b = generate_timetable(7, GeneratorConfig::default());
        assert_eq!(a.shifts(), b.shifts());
        assert_eq!(a.tas(), b.tas());
    }

    #[test]
    fn quotas_cover_every_seat() {
        let tt = generate_timetable(3, GeneratorConfig::default());
        let seats: u32 = tt.shifts().iter().map(|s| s.required_tas).sum();
        let quotas: u32 = tt.tas().iter().map(|t| t.required_shifts_per_semester).sum();
        assert_eq!(seats, quotas);
        assert_eq!(tt.assignments().len(), seats as usize);
    }
}
