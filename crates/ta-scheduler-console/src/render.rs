//! Plain-text reports for solved timetables.

use std::fmt::Write;

use ta_scheduler_core::{ShiftStatus, Timetable};
use ta_scheduler_scoring::ScoreExplanation;

/// One line per shift with its seated TAs, then one line per TA with their
/// load against the semester quota.
///
/// TAs on a desired shift are marked `+`, on an undesired one `-`, and on an
/// unavailable one `!`. Empty seats print as `_`.
pub fn render_timetable(timetable: &Timetable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Timetable '{}'{}",
        timetable.id(),
        timetable
            .score()
            .map(|score| format!(" scored {score}"))
            .unwrap_or_default()
    );

    let mut load = vec![0u32; timetable.tas().len()];
    for (shift_idx, shift) in timetable.shifts().iter().enumerate() {
        let mut seats = Vec::with_capacity(shift.required_tas as usize);
        for &slot in timetable.slots_of_shift(shift_idx) {
            match timetable.assignment(slot).ta {
                Some(ta) => {
                    load[ta] += 1;
                    let mark = match timetable.status(ta, shift_idx) {
                        ShiftStatus::Desired => "+",
                        ShiftStatus::Undesired => "-",
                        ShiftStatus::Unavailable => "!",
                        ShiftStatus::Neutral => "",
                    };
                    seats.push(format!("{}{}", timetable.ta(ta).name, mark));
                }
                None => seats.push("_".to_string()),
            }
        }
        let filled = seats.iter().filter(|seat| *seat != "_").count();
        let _ = writeln!(
            out,
            "  {:<10} {:<8} {:?} {}-{}  w{:<2} [{}/{}]  {}",
            shift.id,
            shift.label(),
            shift.day_of_week,
            shift.start_time.format("%H:%M"),
            shift.end_time.format("%H:%M"),
            shift.week,
            filled,
            shift.required_tas,
            seats.join(", ")
        );
    }

    let _ = writeln!(out, "Load");
    for (ta, count) in timetable.tas().iter().zip(&load) {
        let gap = i64::from(*count) - i64::from(ta.required_shifts_per_semester);
        let _ = writeln!(
            out,
            "  {:<20} {:>3}/{:<3}{}",
            ta.name,
            count,
            ta.required_shifts_per_semester,
            match gap {
                0 => String::new(),
                g if g > 0 => format!("  +{g}"),
                g => format!("  {g}"),
            }
        );
    }
    out
}

/// Score breakdown with up to `max_matches` justifications per broken rule.
pub fn render_explanation(explanation: &ScoreExplanation, max_matches: usize) -> String {
    let mut out = explanation.to_string();
    for analysis in explanation.broken() {
        if analysis.matches.is_empty() || max_matches == 0 {
            continue;
        }
        let _ = writeln!(out, "{} ({}):", analysis.name, analysis.score);
        for m in analysis.matches.iter().take(max_matches) {
            let _ = writeln!(out, "    {:>24}  {}", m.score.to_string(), m.description);
        }
        let hidden = analysis.matches.len().saturating_sub(max_matches);
        if hidden > 0 {
            let _ = writeln!(out, "    ... {hidden} more");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use ta_scheduler_scoring::{explain, RuleSet};
    use ta_scheduler_test::{five_shift_timetable, unstaffable_timetable};

    use super::*;

    #[test]
    fn test_render_marks_preferences_and_empty_seats() {
        let mut tt = five_shift_timetable();
        tt.assign(0, Some(0));
        tt.assign(5, Some(4));
        let text = render_timetable(&tt);

        assert!(text.starts_with("Timetable 'five-shift'"));
        assert!(text.contains("M. Roghani+, _"));
        assert!(text.contains("A. Athar-, _"));
        assert!(text.contains("[1/2]"));
        assert!(text.contains("[0/3]"));
        assert!(text.contains("M. Roghani             1/3    -2"));
    }

    #[test]
    fn test_render_explanation_lists_matches() {
        let tt = unstaffable_timetable();
        let explanation = explain(&tt, &RuleSet::standard());
        let text = render_explanation(&explanation, 1);

        assert!(text.starts_with("Score "));
        assert!(text.contains("shift 'open'"));
        assert!(text.contains("... 1 more"));
        assert!(!render_explanation(&explanation, 0).contains("shift 'open'"));
    }
}
