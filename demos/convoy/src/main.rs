//! convoy — scripted skirmish for the rust_drive locomotion engine.
//!
//! Loads a JSON scenario (map, buildings, mines, units and timed orders),
//! runs it to completion, writes CSV output, then re-runs the scenario as
//! lockstep replicas and checks that every replica produced the same
//! trajectory.
//!
//! ```text
//! RUST_LOG=dr_drive=debug cargo run -p convoy -- demos/convoy/scenario.json
//! ```

mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, bail};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dr_core::Tick;
use dr_drive::CellEvent;
use dr_output::{CsvWriter, OutputWriter, SnapshotObserver};
use dr_sim::{SimObserver, TickSummary, TrajectoryDigest, Unit, verify_replicas};

use scenario::Scenario;

const DEFAULT_SCENARIO: &str = "demos/convoy/scenario.json";
const OUTPUT_DIR:       &str = "output/convoy";
const REPLICAS:         usize = 4;

// ── Observer fan-out ──────────────────────────────────────────────────────────

/// Feeds CSV output and the trajectory digest from one run.
struct Recorder<W: OutputWriter> {
    output:    SnapshotObserver<W>,
    digest:    TrajectoryDigest,
    events:    usize,
    destroyed: usize,
}

impl<W: OutputWriter> SimObserver for Recorder<W> {
    fn on_cell_event(&mut self, tick: Tick, event: &CellEvent) {
        self.events += 1;
        self.output.on_cell_event(tick, event);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.destroyed += summary.destroyed;
        self.output.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, units: &[Unit]) {
        self.digest.on_snapshot(tick, units);
        self.output.on_snapshot(tick, units);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.output.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_SCENARIO), PathBuf::from);
    let scenario = Scenario::load(&path)?;
    info!(
        scenario = %path.display(),
        units    = scenario.units.len(),
        orders   = scenario.orders.len(),
        ticks    = scenario.sim.total_ticks,
        "scenario loaded"
    );

    // 1. Run once with output.
    let mut sim = scenario.build()?;
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut recorder = Recorder {
        output:    SnapshotObserver::new(CsvWriter::new(Path::new(OUTPUT_DIR))?),
        digest:    TrajectoryDigest::new(),
        events:    0,
        destroyed: 0,
    };
    let t0 = Instant::now();
    sim.run(&mut recorder)?;
    let elapsed = t0.elapsed();
    if let Some(e) = recorder.output.take_error() {
        bail!("output error: {e}");
    }

    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  cell events : {}", recorder.events);
    println!("  destroyed   : {}", recorder.destroyed);
    println!("  digest      : {:016x}", recorder.digest.finish());
    println!();

    // 2. Final unit table.
    println!("{:<6} {:<6} {:<10} {:<10} {:<6}", "Unit", "House", "Cell", "Status", "Alive");
    println!("{}", "-".repeat(42));
    for u in &sim.units {
        println!(
            "{:<6} {:<6} {:<10} {:<10} {:<6}",
            u.id.0,
            u.house.0,
            u.coord.cell().to_string(),
            u.drive.status().as_str(),
            if u.alive { "yes" } else { "no" },
        );
    }
    println!();

    // 3. Lockstep check.
    let report = verify_replicas(REPLICAS, scenario.sim.num_threads, || scenario.build().map_err(into_sim_error))?;
    if !report.all_agree() {
        bail!("replicas diverged: {:016x?}", report.digests);
    }
    if report.digests.first() != Some(&recorder.digest.finish()) {
        bail!("replica digest differs from the recorded run");
    }
    println!("{REPLICAS} replicas agree ({} snapshots each)", report.snapshots);
    Ok(())
}

fn into_sim_error(e: anyhow::Error) -> dr_sim::SimError {
    dr_sim::SimError::Config(format!("{e:#}"))
}
