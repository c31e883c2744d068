//! Engine Twin Simulation
//!
//! Drives one simulated CAT C4.4 engine session and streams telemetry rows
//! to stdout for testing and demonstration. Each tick synthesizes one
//! reading under the regime active on the simulated clock, appends it to
//! the rolling history, and evaluates engine health.
//!
//! # Usage
//! ```bash
//! ./simulation --minutes 15 --speed 10 --format json
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration as StdDuration, Instant};

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use serde::Serialize;

use engine_twin::{
    EngineConfig, EngineSession, HealthAssessment, HealthStatus, RegimeName, SensorReading,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "engine-twin-simulation")]
#[command(about = "Engine digital twin telemetry generator")]
#[command(version = "1.0")]
struct Args {
    /// Simulated duration in minutes (1-1440)
    #[arg(short, long, default_value = "15", value_parser = clap::value_parser!(u32).range(1..=1440))]
    minutes: u32,

    /// Time compression factor (1 = real-time, 100 = 100x faster)
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=1000))]
    speed: u32,

    /// Output format: json or csv
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Seed for the startup history (defaults to the configured seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Synthetic readings to seed before the first tick
    #[arg(long)]
    seed_points: Option<usize>,

    /// Path to a TOML config file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suppress the mission log (only output telemetry rows)
    #[arg(short, long)]
    quiet: bool,
}

// ============================================================================
// Output Row
// ============================================================================

/// One stdout row: the reading plus the signals derived from it.
#[derive(Debug, Serialize)]
struct TelemetryRow<'a> {
    #[serde(flatten)]
    reading: &'a SensorReading,
    regime: RegimeName,
    #[serde(flatten)]
    assessment: &'a HealthAssessment,
    transition_in_seconds: u64,
}

fn write_csv_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "timestamp,oil_temperature,coolant_temperature,egt,oil_pressure,fuel_pressure,vibration,rpm,regime,status,anomaly_score,rul_hours"
    )
}

fn write_csv_row(out: &mut impl Write, row: &TelemetryRow<'_>) -> io::Result<()> {
    writeln!(
        out,
        "{},{:.1},{:.1},{:.1},{:.0},{:.0},{:.2},{:.0},{},{},{:.2},{:.1}",
        row.reading.timestamp.to_rfc3339(),
        row.reading.oil_temperature,
        row.reading.coolant_temperature,
        row.reading.egt,
        row.reading.oil_pressure,
        row.reading.fuel_pressure,
        row.reading.vibration,
        row.reading.rpm,
        row.regime,
        row.assessment.status,
        row.assessment.anomaly_score,
        row.assessment.rul_hours,
    )
}

// ============================================================================
// Logging Utilities
// ============================================================================

fn format_time(seconds: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

fn log_mission(elapsed: u64, message: &str, quiet: bool) {
    if !quiet {
        eprintln!("[{}] {}", format_time(elapsed), message);
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let tick_seconds = config.simulation.tick_seconds;
    let seed = args.seed.unwrap_or(config.simulation.seed);
    let seed_points = args.seed_points.unwrap_or(config.simulation.seed_points);
    let total_ticks = u64::from(args.minutes) * 60 / tick_seconds;

    let mut session = EngineSession::from_config(&config)?;

    // The simulated clock starts at the real wall clock and advances one
    // tick period per iteration, independent of the compression factor.
    let mut sim_now: DateTime<Utc> = Utc::now();
    session.seed_history(seed_points, seed, sim_now);

    // Mission briefing
    log_mission(0, &"=".repeat(70), args.quiet);
    log_mission(0, "ENGINE TWIN SIMULATION v1.0", args.quiet);
    log_mission(0, "Digital twin telemetry and health signal generator", args.quiet);
    log_mission(0, &"=".repeat(70), args.quiet);
    log_mission(0, &format!("  Engine: {} ({})", config.engine.name, config.engine.serial), args.quiet);
    log_mission(0, &format!("  Seeded history: {} readings (seed {})", seed_points, seed), args.quiet);
    log_mission(0, &format!("  Duration: {} min ({} ticks @ {}s)", args.minutes, total_ticks, tick_seconds), args.quiet);
    log_mission(0, &format!("  Speed: {}x compression", args.speed), args.quiet);
    log_mission(0, "REGIME CYCLE:", args.quiet);
    for regime in session.cycle().regimes() {
        log_mission(
            0,
            &format!("  {} {} - {}s", regime.display_emoji, regime.name, regime.duration_seconds),
            args.quiet,
        );
    }
    log_mission(0, &"=".repeat(70), args.quiet);

    let tick_interval_real = StdDuration::from_secs_f64(tick_seconds as f64 / f64::from(args.speed));

    let stdout = io::stdout();
    let mut stdout_lock = stdout.lock();

    if args.format == "csv" {
        write_csv_header(&mut stdout_lock)?;
    }

    let start = Instant::now();
    let mut last_regime: Option<RegimeName> = None;
    let mut anomaly_ticks: u64 = 0;

    for tick_index in 0..total_ticks {
        let loop_start = Instant::now();
        let elapsed_sim = tick_index * tick_seconds;

        let outcome = session.tick(sim_now);

        if outcome.assessment.status != HealthStatus::Normal {
            anomaly_ticks += 1;
        }

        // Regime transition logging
        if last_regime != Some(outcome.regime) {
            let profile = session.current_regime(sim_now);
            log_mission(
                elapsed_sim,
                &format!(
                    ">>> REGIME: {} {} (next transition in {}s)",
                    profile.display_emoji,
                    outcome.regime,
                    session.seconds_until_next_transition(sim_now)
                ),
                args.quiet,
            );
            last_regime = Some(outcome.regime);
        }

        let row = TelemetryRow {
            reading: &outcome.reading,
            regime: outcome.regime,
            assessment: &outcome.assessment,
            transition_in_seconds: session.seconds_until_next_transition(sim_now),
        };

        match args.format.as_str() {
            "csv" => write_csv_row(&mut stdout_lock, &row)?,
            _ => {
                let json = serde_json::to_string(&row)?;
                writeln!(stdout_lock, "{}", json)?;
            }
        }
        stdout_lock.flush()?;

        // Advance simulated time; sleep off the remainder of the
        // compressed real-time budget.
        sim_now += Duration::seconds(tick_seconds as i64);
        let loop_elapsed = loop_start.elapsed();
        if loop_elapsed < tick_interval_real {
            std::thread::sleep(tick_interval_real - loop_elapsed);
        }
    }

    // Mission debrief
    let total_elapsed = start.elapsed();
    let final_assessment = session.latest_assessment();

    log_mission(total_ticks * tick_seconds, &"=".repeat(70), args.quiet);
    log_mission(total_ticks * tick_seconds, "SIMULATION COMPLETE", args.quiet);
    log_mission(
        total_ticks * tick_seconds,
        &format!("  Ticks: {} ({} with non-normal health)", total_ticks, anomaly_ticks),
        args.quiet,
    );
    log_mission(
        total_ticks * tick_seconds,
        &format!("  History length: {}", session.history().len()),
        args.quiet,
    );
    if let Some(assessment) = final_assessment {
        log_mission(
            total_ticks * tick_seconds,
            &format!(
                "  Final health: {} {} | RUL {:.1}h | {}",
                assessment.status.emoji(),
                assessment.status,
                assessment.rul_hours,
                assessment.recommendation
            ),
            args.quiet,
        );
    }
    log_mission(
        total_ticks * tick_seconds,
        &format!("  Real time: {:.1}s", total_elapsed.as_secs_f64()),
        args.quiet,
    );
    log_mission(total_ticks * tick_seconds, &"=".repeat(70), args.quiet);

    Ok(())
}
