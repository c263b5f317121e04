//! TA Scheduler demo
//!
//! Solves the five-lab demo timetable on the job manager and prints the
//! result, either as a colored report or as JSON.
//!
//! Run with: cargo run -p ta-demo -- --config demos/ta-demo/solver.toml [--weeks N] [--exact] [--json]

mod demo_data;

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use tokio::sync::broadcast::error::TryRecvError;

use ta_scheduler::{console, SolverConfig, SolverManager, Strategy};

struct Args {
    weeks: u32,
    config: PathBuf,
    exact: bool,
    json: bool,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let mut args = Args {
            weeks: 1,
            config: PathBuf::from("solver.toml"),
            exact: false,
            json: false,
        };
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--json" => args.json = true,
                "--exact" => args.exact = true,
                "--weeks" => {
                    let value = it.next().ok_or("--weeks needs a value")?;
                    args.weeks = value
                        .parse()
                        .map_err(|_| format!("invalid week count '{value}'"))?;
                }
                "--config" => {
                    args.config = it.next().ok_or("--config needs a path")?.into();
                }
                other => return Err(format!("unknown argument '{other}'")),
            }
        }
        Ok(args)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse()?;
    if !args.json {
        console::init();
    }

    let mut config = if args.config.exists() {
        SolverConfig::load(&args.config)?
    } else {
        SolverConfig::new().with_termination_seconds(5)
    };
    if args.exact {
        config = config.with_strategy(Strategy::Exact);
    }

    let timetable = demo_data::lab_timetable("tabriz-labs", args.weeks)?;
    let manager = SolverManager::new(config)?;
    let (job_id, mut events) = manager.submit_and_listen(timetable)?;
    let summary = manager.wait_for_completion(&job_id)?;

    let mut improvements = 0usize;
    loop {
        match events.try_recv() {
            Ok(_) => improvements += 1,
            Err(TryRecvError::Lagged(skipped)) => improvements += skipped as usize,
            Err(_) => break,
        }
    }

    let best = manager
        .best_solution(&job_id)?
        .ok_or("job finished without a timetable")?;
    let explanation = manager
        .explain(&job_id)?
        .ok_or("job finished without a score breakdown")?;

    if args.json {
        let report = serde_json::json!({
            "job_id": job_id,
            "status": manager.status(&job_id)?.as_str(),
            "score": summary.score.to_string(),
            "termination_reason": summary.termination_reason.as_str(),
            "proven_optimal": summary.proven_optimal,
            "duration_ms": summary.duration.as_millis() as u64,
            "improvements": improvements,
            "feasibility": summary.feasibility,
            "timetable": best,
            "explanation": explanation,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    print!("{}", console::render_timetable(&best));
    println!();
    print!("{}", console::render_explanation(&explanation, 3));
    println!();
    for finding in summary.feasibility.findings() {
        println!("{} {}", "pre-check".bright_black(), finding);
    }
    let verdict = if summary.is_feasible() {
        "feasible".bright_green().bold().to_string()
    } else {
        format!("{} hard violation(s)", summary.hard_violations())
            .bright_red()
            .bold()
            .to_string()
    };
    println!(
        "{} {} │ {} │ {} improvements in {:.2?}{}",
        "■".bright_cyan(),
        summary.score,
        verdict,
        improvements,
        summary.duration,
        if summary.proven_optimal {
            " │ proven optimal"
        } else {
            ""
        }
    );
    Ok(())
}
