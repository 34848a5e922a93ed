//! absence-runner: headless absence cost calculator.
//!
//! Usage:
//!   absence-runner                                  (configured default profile)
//!   absence-runner --profile adam.json --overhead 15 --out adam.csv
//!   absence-runner --batch profiles.csv --overhead 15 --out results.csv
//!   absence-runner --export                         (writes absence_cost_<name>.csv)
//!   absence-runner --ipc-mode

use absence_core::{
    batch::{BatchEvaluator, BatchReport},
    breakdown::CostBreakdown,
    config::EngineConfig,
    cost_engine::{self, CostEvaluator},
    error::AbsenceResult,
    export,
    loader,
    memo::MemoizedEngine,
    profile::{AbsenceProfile, RawProfileFields, RoleCriticality},
    session::ProfileBook,
};
use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Evaluate {
        profile: RawProfileFields,
        #[serde(default)]
        overhead_pct: Option<f64>,
    },
    AddProfile {
        profile: RawProfileFields,
    },
    SelectProfile {
        index: usize,
        #[serde(default)]
        overhead_pct: Option<f64>,
    },
    ListProfiles,
    EvaluateBook {
        #[serde(default)]
        overhead_pct: Option<f64>,
    },
    EvaluateBatch {
        csv: String,
        #[serde(default)]
        overhead_pct: Option<f64>,
    },
    Suggestions {
        criticality: RoleCriticality,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct ProfileResult<'a> {
    name:        &'a str,
    breakdown:   CostBreakdown,
    suggestions: &'a [String],
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = str_arg(&args, "--data-dir").unwrap_or("./data");
    let config = EngineConfig::load_or_default(data_dir);
    let overhead_pct = parse_arg(&args, "--overhead", config.defaults.overhead_pct);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let out = str_arg(&args, "--out");

    if ipc_mode {
        return run_ipc_loop(&config, overhead_pct);
    }

    println!("Employee Absence Cost Analysis");
    println!("  data_dir:  {data_dir}");
    println!("  overhead:  {overhead_pct}%");
    println!();

    if let Some(batch_path) = str_arg(&args, "--batch") {
        let rows = loader::load_batch_path(batch_path)?;
        let report = BatchEvaluator::new(overhead_pct).evaluate_raw(&config.resolver(), &rows);
        print_batch(&report);
        let out = out.or_else(|| {
            args.iter().any(|a| a == "--export").then_some(export::BATCH_FILE_NAME)
        });
        if let Some(out) = out {
            std::fs::write(out, export::export_batch(&report)?)?;
            println!("\n  wrote {out}");
        }
        return Ok(());
    }

    let raw = match str_arg(&args, "--profile") {
        Some(path) => loader::load_profile_json(path)?,
        None => config.defaults.default_profile.clone(),
    };
    let profile = config.resolver().resolve(&raw);
    let breakdown = cost_engine::evaluate(&profile, overhead_pct);
    print_breakdown(&profile, &breakdown, config.mitigation.suggestions_for(profile.role_criticality));

    // --export writes next to the working directory under the default name.
    let out = match out {
        Some(path) => Some(path.to_string()),
        None if args.iter().any(|a| a == "--export") => {
            Some(export::breakdown_file_name(&profile.name))
        }
        None => None,
    };
    if let Some(out) = out {
        std::fs::write(&out, export::export_breakdown(&breakdown)?)?;
        println!("\n  wrote {out}");
    }
    Ok(())
}

fn run_ipc_loop(config: &EngineConfig, default_overhead: f64) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    let resolver = config.resolver();
    let mut book = ProfileBook::new();
    let mut engine = MemoizedEngine::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                reply_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        let response: AbsenceResult<serde_json::Value> = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Evaluate { profile, overhead_pct } => {
                let profile = resolver.resolve(&profile);
                let breakdown = engine.evaluate(&profile, overhead_pct.unwrap_or(default_overhead));
                profile_result(config, &profile, breakdown)
            }
            IpcCommand::AddProfile { profile } => {
                let index = book.add(resolver.resolve(&profile));
                Ok(serde_json::json!({ "index": index, "count": book.len() }))
            }
            IpcCommand::SelectProfile { index, overhead_pct } => {
                book.select(index).and_then(|profile| {
                    let breakdown = engine.evaluate(profile, overhead_pct.unwrap_or(default_overhead));
                    profile_result(config, profile, breakdown)
                })
            }
            IpcCommand::ListProfiles => Ok(serde_json::json!({ "profiles": book.names() })),
            IpcCommand::EvaluateBook { overhead_pct } => {
                let report = BatchEvaluator::new(overhead_pct.unwrap_or(default_overhead))
                    .evaluate_with(&mut engine, book.as_slice());
                serde_json::to_value(&report).map_err(Into::into)
            }
            IpcCommand::EvaluateBatch { csv, overhead_pct } => {
                loader::load_batch_str(&csv).and_then(|rows| {
                    let report = BatchEvaluator::new(overhead_pct.unwrap_or(default_overhead))
                        .evaluate_raw(&resolver, &rows);
                    serde_json::to_value(&report).map_err(Into::into)
                })
            }
            IpcCommand::Suggestions { criticality } => Ok(serde_json::json!({
                "criticality": criticality,
                "suggestions": config.mitigation.suggestions_for(criticality),
            })),
        };

        match response {
            Ok(value) => writeln!(stdout, "{value}")?,
            Err(e) => {
                log::warn!("ipc: {e}");
                reply_error(&mut stdout, &e.to_string())?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn profile_result(
    config: &EngineConfig,
    profile: &AbsenceProfile,
    breakdown: CostBreakdown,
) -> AbsenceResult<serde_json::Value> {
    let result = ProfileResult {
        name: &profile.name,
        breakdown,
        suggestions: config.mitigation.suggestions_for(profile.role_criticality),
    };
    Ok(serde_json::to_value(&result)?)
}

fn reply_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

fn print_breakdown(profile: &AbsenceProfile, breakdown: &CostBreakdown, suggestions: &[String]) {
    println!("=== COST ANALYSIS FOR {} ===", profile.name);
    for (component, amount) in breakdown.iter() {
        println!("  {component:<26} ${amount:>12.2}");
    }
    println!();
    println!("=== MITIGATION SUGGESTIONS ({}) ===", profile.role_criticality);
    for item in suggestions {
        println!("  - {item}");
    }
}

fn print_batch(report: &BatchReport) {
    println!("=== BATCH ANALYSIS RESULTS ===");
    println!("  report_id: {}", report.report_id);
    for row in &report.rows {
        println!(
            "  {:<24} | Per absence: ${:>10.2} | Annualized: ${:>12.2}",
            row.name,
            row.breakdown.total_per_absence(),
            row.breakdown.annualized_cost()
        );
    }
    println!();
    println!("  employees:                {}", report.summary.row_count);
    println!("  mean cost per incident:   ${:.2}", report.summary.mean_cost_per_incident);
    println!("  total annualized cost:    ${:.2}", report.summary.total_annualized_cost);
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
