//! Colorful console output for scheduler runs.
//!
//! Provides a custom `tracing` layer that formats solver events with colors,
//! plus plain-text renderers for solved timetables and score breakdowns.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (job, solve and phase start/end)
//! - **WARN**: Feasibility pre-check findings
//! - **DEBUG**: New best solutions
//! - **TRACE**: Individual step evaluations

mod render;

pub use render::{render_explanation, render_timetable};

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crates whose events the layer formats.
const TARGET_PREFIX: &str = "ta_scheduler";

/// Initializes console output.
///
/// Safe to call multiple times; only the first call has effect. `RUST_LOG`
/// overrides the default `info` level.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SchedulerConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____  _       ____       _              _       _
|_   _|/ \     / ___|  ___| |__   ___  __| |_   _| | ___ _ __
  | | / _ \    \___ \ / __| '_ \ / _ \/ _` | | | | |/ _ \ '__|
  | |/ ___ \    ___) | (__| | | |  __/ (_| | |_| | |  __/ |
  |_/_/   \_\  |____/ \___|_| |_|\___|\__,_|\__,_|_|\___|_|
"#;

    let version_line = format!("                v{} - TA Shift Assignment Solver\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats scheduler events with colors.
pub struct SchedulerConsoleLayer;

impl<S: Subscriber> Layer<S> for SchedulerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(TARGET_PREFIX) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    job_id: Option<String>,
    phase: Option<String>,
    score: Option<String>,
    best_score: Option<String>,
    reason: Option<String>,
    status: Option<String>,
    finding: Option<String>,
    rule_set: Option<String>,
    steps: Option<u64>,
    step: Option<u64>,
    duration_ms: Option<u64>,
    tas: Option<u64>,
    shifts: Option<u64>,
    slots: Option<u64>,
    moves_evaluated: Option<u64>,
    proven_optimal: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "message" => self.message = Some(value),
            "job_id" => self.job_id = Some(value),
            "phase" => self.phase = Some(value),
            "score" => self.score = Some(value),
            "best_score" => self.best_score = Some(value),
            "reason" => self.reason = Some(value),
            "status" => self.status = Some(value),
            "finding" => self.finding = Some(value),
            "rule_set" => self.rule_set = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field, s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "steps" => self.steps = Some(value),
            "step" => self.step = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "tas" => self.tas = Some(value),
            "shifts" => self.shifts = Some(value),
            "slots" => self.slots = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "proven_optimal" {
            self.proven_optimal = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field, value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "job_submitted" | "job_started" | "job_finished" | "job_cancel_requested" => {
            format_job(v)
        }
        "new_best" => format_new_best(v),
        "step" => format_step(v, level),
        _ if level == Level::WARN || level == Level::ERROR => format_warning(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_job_tag(v: &EventVisitor) -> String {
    match v.job_id.as_deref() {
        Some(id) if id != "-" => format!("[{}] ", short_id(id)).bright_black().to_string(),
        _ => String::new(),
    }
}

/// First UUID group keeps log lines narrow.
fn short_id(id: &str) -> &str {
    if id.len() == 36 {
        id.split('-').next().unwrap_or(id)
    } else {
        id
    }
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let tas = v.tas.unwrap_or(0);
    let shifts = v.shifts.unwrap_or(0);
    let slots = v.slots.unwrap_or(0);

    let mut output = format!(
        "{} {}{} Solving │ {} TAs │ {} shifts │ {} seats",
        format_elapsed(),
        format_job_tag(v),
        "▶".bright_green().bold(),
        tas.to_formatted_string(&Locale::en).bright_yellow(),
        shifts.to_formatted_string(&Locale::en).bright_yellow(),
        slots.to_formatted_string(&Locale::en).bright_yellow(),
    );
    if let Some(rule_set) = &v.rule_set {
        output.push_str(&format!(" │ rules {}", rule_set.bright_magenta()));
    }
    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let feasible = is_feasible(score);
    let status = if feasible {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {}{} Solving complete │ {} │ {}",
        format_elapsed(),
        format_job_tag(v),
        "■".bright_cyan().bold(),
        format_score(score),
        status
    );
    if let Some(reason) = &v.reason {
        output.push_str(&format!(" │ {}", reason.white()));
    }
    if v.proven_optimal == Some(true) {
        output.push_str(&format!(" │ {}", "proven optimal".bright_green()));
    }
    if let Some(moves) = v.moves_evaluated {
        output.push_str(&format!(
            " │ {} moves",
            moves.to_formatted_string(&Locale::en).bright_magenta()
        ));
    }
    output
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    format!(
        "{} {}{} {} started",
        format_elapsed(),
        format_job_tag(v),
        "▶".bright_blue(),
        phase.white().bold()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let steps = v.steps.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let score = v.best_score.as_deref().or(v.score.as_deref()).unwrap_or("N/A");

    format!(
        "{} {}{} {} ended │ {} │ {} steps │ {}",
        format_elapsed(),
        format_job_tag(v),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
        format_score(score),
    )
}

fn format_job(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");
    let id = v.job_id.as_deref().unwrap_or("?");
    let mut output = format!(
        "{} {} job {} {}",
        format_elapsed(),
        "●".bright_cyan(),
        short_id(id).bright_white().bold(),
        event.trim_start_matches("job_").replace('_', " ")
    );
    if let Some(status) = &v.status {
        output.push_str(&format!(" │ {}", status.white()));
    }
    if let Some(score) = &v.score {
        output.push_str(&format!(" │ {}", format_score(score)));
    }
    output
}

fn format_new_best(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    format!(
        "{} {}{} new best at step {} │ {}",
        format_elapsed(),
        format_job_tag(v),
        "★".bright_yellow(),
        v.steps.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_score(score)
    )
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    let score = v.score.as_deref().unwrap_or("N/A");
    format!(
        "{} {} Step {:>10} │ {}",
        format_elapsed(),
        "·".bright_black(),
        v.step.unwrap_or(0).to_formatted_string(&Locale::en).bright_black(),
        format_score(score).bright_black()
    )
}

fn format_warning(v: &EventVisitor, level: Level) -> String {
    let text = v
        .finding
        .as_deref()
        .or(v.message.as_deref())
        .unwrap_or("");
    if text.is_empty() {
        return String::new();
    }
    let icon = if level == Level::ERROR {
        "✗".bright_red().bold().to_string()
    } else {
        "!".bright_yellow().bold().to_string()
    };
    format!("{} {}{} {}", format_elapsed(), format_job_tag(v), icon, text.yellow())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Levels of a `Xhard/Ymedium/Zsoft` string, if it is one.
fn parse_levels(score: &str) -> Option<[i64; 3]> {
    let mut parts = score.split('/');
    let hard = parts.next()?.strip_suffix("hard")?.parse().ok()?;
    let medium = parts.next()?.strip_suffix("medium")?.parse().ok()?;
    let soft = parts.next()?.strip_suffix("soft")?.parse().ok()?;
    parts.next().is_none().then_some([hard, medium, soft])
}

fn is_feasible(score: &str) -> bool {
    parse_levels(score).is_some_and(|[hard, _, _]| hard >= 0)
}

fn format_score(score: &str) -> String {
    let Some([hard, medium, soft]) = parse_levels(score) else {
        return score.white().to_string();
    };
    let hard_str = if hard < 0 {
        format!("{hard}hard").bright_red().to_string()
    } else {
        format!("{hard}hard").bright_green().to_string()
    };
    let medium_str = if medium < 0 {
        format!("{medium}medium").bright_yellow().to_string()
    } else {
        format!("{medium}medium").white().to_string()
    };
    let soft_str = if soft < 0 {
        format!("{soft}soft").yellow().to_string()
    } else if soft > 0 {
        format!("{soft}soft").bright_green().to_string()
    } else {
        format!("{soft}soft").white().to_string()
    };
    format!("{hard_str}/{medium_str}/{soft_str}")
}
