//! Simulation observer trait for progress reporting and data collection.

use std::hash::Hasher;

use rustc_hash::FxHasher;

use dr_core::Tick;
use dr_drive::{CellEvent, DriveStatus};

use crate::Unit;

/// Per-tick counts handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickSummary {
    pub tick:      Tick,
    /// Live units on a track at the end of the tick.
    pub moving:    usize,
    pub blocked:   usize,
    /// Cell events raised during the tick.
    pub events:    usize,
    /// Units destroyed during the tick.
    pub destroyed: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any orders are applied.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every cell event, in the order they happened.
    fn on_cell_event(&mut self, _tick: Tick, _event: &CellEvent) {}

    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.snapshot_interval_ticks`)
    /// with every unit, dead or alive, in ascending id order.
    fn on_snapshot(&mut self, _tick: Tick, _units: &[Unit]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

// ── TrajectoryDigest ──────────────────────────────────────────────────────────

/// Folds every snapshot into one `u64`.
///
/// Two peers that ran the same scenario must produce the same digest; any
/// divergence in a coordinate, heading or status changes it.  Use a snapshot
/// interval of 1 to cover every tick.
#[derive(Default)]
pub struct TrajectoryDigest {
    hasher:    FxHasher,
    snapshots: u64,
}

impl TrajectoryDigest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> u64 {
        self.snapshots
    }

    pub fn finish(&self) -> u64 {
        self.hasher.finish()
    }
}

impl SimObserver for TrajectoryDigest {
    fn on_snapshot(&mut self, tick: Tick, units: &[Unit]) {
        self.hasher.write_u64(tick.0);
        for u in units {
            self.hasher.write_u32(u.id.0);
            self.hasher.write_i32(u.coord.x);
            self.hasher.write_i32(u.coord.y);
            self.hasher.write_u8(u.drive.facing.current().0);
            self.hasher.write_u8(status_code(u.drive.status()));
            self.hasher.write_u8(u.alive as u8);
        }
        self.snapshots += 1;
    }
}

fn status_code(status: DriveStatus) -> u8 {
    match status {
        DriveStatus::Idle     => 0,
        DriveStatus::Rotating => 1,
        DriveStatus::OnTrack  => 2,
        DriveStatus::Blocked  => 3,
    }
}
