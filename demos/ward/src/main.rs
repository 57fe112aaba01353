//! ward — compares a baseline VA hospital against one with every
//! innovation switched on.
//!
//! Runs both configurations on the same seed for one simulated day, then
//! prints a JSON report (final metrics, surfaced insights, and a small agent
//! sample) to stdout.  Progress goes to stderr through `tracing`; set
//! `RUST_LOG=debug` for per-agent detail.

use std::io::Cursor;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vf_core::{SimConfig, Tick};
use vf_insight::Insight;
use vf_schedule::load_shifts_reader;
use vf_sim::{AgentSummary, Innovations, MetricsSnapshot, ModelBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const PATIENTS:    usize = 150;
const PROVIDERS:   u32   = 30;
const SEED:        u64   = 42;
const TOTAL_TICKS: u64   = 1_440; // one day at one tick per minute
const SAMPLE_SIZE: usize = 20;

// Day, evening, and night cover for the first nine providers; everyone else
// works the default day shift.
const ROSTER_CSV: &str = "\
provider_id,shift_start,shift_end\n\
0,7,19\n\
1,19,7\n\
2,0,24\n\
3,8,17\n\
4,12,22\n\
5,22,8\n\
6,8,20\n\
7,20,8\n\
8,0,24\n\
";

// ── Observer ──────────────────────────────────────────────────────────────────

/// Keeps every insight surfaced during the run and counts ticks.
#[derive(Default)]
struct Journal {
    ticks:    u64,
    insights: Vec<Insight>,
}

impl SimObserver for Journal {
    fn on_tick_end(&mut self, _tick: Tick, _metrics: &MetricsSnapshot) {
        self.ticks += 1;
    }

    fn on_insights(&mut self, tick: Tick, found: &[Insight]) {
        info!(tick = tick.0, count = found.len(), "insights surfaced");
        self.insights.extend_from_slice(found);
    }

    fn on_run_end(&mut self, tick: Tick, metrics: &MetricsSnapshot) {
        info!(
            tick = tick.0,
            treated = metrics.patients_treated,
            lwot = metrics.left_without_treatment,
            avg_wait = metrics.avg_wait_time,
            "run finished"
        );
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct RunReport {
    label:       &'static str,
    innovations: Innovations,
    ticks:       u64,
    final_state: MetricsSnapshot,
    insights:    Vec<Insight>,
    sample:      Vec<AgentSummary>,
}

fn run(label: &'static str, innovations: Innovations) -> Result<RunReport> {
    let config = SimConfig { total_ticks: TOTAL_TICKS, seed: SEED, ..SimConfig::default() };
    let provider_count = PROVIDERS as usize;
    let shifts = load_shifts_reader(Cursor::new(ROSTER_CSV), provider_count)
        .context("parsing embedded roster")?;

    let mut model = ModelBuilder::new(PATIENTS, PROVIDERS)
        .shifts(shifts)
        .innovations(innovations.clone())
        .config(config)
        .build()
        .with_context(|| format!("building the {label} model"))?;

    let mut journal = Journal::default();
    let started = Instant::now();
    let final_state = model.run(&mut journal);
    info!(label, elapsed_ms = started.elapsed().as_millis() as u64, "simulated one day");

    Ok(RunReport {
        label,
        innovations,
        ticks: journal.ticks,
        final_state,
        insights: journal.insights,
        sample: model.sample_agents(SAMPLE_SIZE),
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let baseline = run("baseline", Innovations::none())?;
    let modern = run(
        "modernized",
        Innovations {
            vr_stations:        8,
            telehealth_rooms:   12,
            ai_triage_enabled:  true,
            mobile_units:       2,
            robotic_assistants: 4,
        },
    )?;

    let b = &baseline.final_state;
    let m = &modern.final_state;
    info!(
        wait_delta = m.avg_wait_time - b.avg_wait_time,
        satisfaction_delta = m.avg_satisfaction - b.avg_satisfaction,
        mh_access_delta = m.mental_health_access_pct - b.mental_health_access_pct,
        "modernized vs baseline"
    );

    let report = [baseline, modern];
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
