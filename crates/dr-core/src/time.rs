//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter, one tick per game
//! frame.  All waiting in the locomotion layer is expressed as `Countdown`
//! timers that are decremented once per tick, so no operation ever blocks
//! or depends on wall-clock time.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self` (saturating).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Frame counter with a nominal frame rate for human-readable logging.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Nominal game frames per second.  Default: 15.
    pub ticks_per_second: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            ticks_per_second: ticks_per_second.max(1),
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed game time as (minutes, seconds, tenths).
    pub fn elapsed_mst(&self) -> (u64, u32, u32) {
        let tps = self.ticks_per_second as u64;
        let ticks = self.current_tick.0;
        let secs = ticks / tps;
        let tenths = ((ticks % tps) * 10 / tps) as u32;
        (secs / 60, (secs % 60) as u32, tenths)
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(15)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s, t) = self.elapsed_mst();
        write!(f, "{} ({}:{:02}.{})", self.current_tick, m, s, t)
    }
}

// ── Countdown ─────────────────────────────────────────────────────────────────

/// A tick-driven countdown.  Expired when it reaches zero.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown(u32);

impl Countdown {
    pub const EXPIRED: Countdown = Countdown(0);

    pub fn new(ticks: u32) -> Self {
        Countdown(ticks)
    }

    #[inline]
    pub fn set(&mut self, ticks: u32) {
        self.0 = ticks;
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.0 == 0
    }

    /// Decrement by one tick.  Returns `true` on the tick it expires.
    #[inline]
    pub fn tick(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically loaded from a JSON scenario file by the application crate.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Nominal frames per second, used for logging only.
    pub ticks_per_second: u32,

    /// Emit a unit snapshot every N ticks.  1 = every tick.
    pub snapshot_interval_ticks: u64,

    /// Worker thread count for replica verification.  `None` uses all cores.
    pub num_threads: Option<usize>,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.ticks_per_second)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:             900,
            seed:                    0,
            ticks_per_second:        15,
            snapshot_interval_ticks: 1,
            num_threads:             None,
        }
    }
}
