//! `CommandQueue` — orders scheduled for future ticks.
//!
//! Orders for the same tick are applied in submission order, before any unit
//! moves that tick.

use std::collections::BTreeMap;

use dr_core::{Cell, Facing, Target, Tick, UnitId};

/// An external order for one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Drive to `target` on a move mission.
    Move { unit: UnitId, target: Target },
    /// Follow an explicit list of facings.
    Path { unit: UnitId, steps: Vec<Facing> },
    /// Drop the destination and come to a halt at the next cell.
    Stop { unit: UnitId },
    Teleport { unit: UnitId, cell: Cell },
    /// Teleport, then come back after `ticks`.
    TimedTeleport { unit: UnitId, cell: Cell, ticks: u32 },
}

impl Command {
    pub fn unit(&self) -> UnitId {
        match self {
            Command::Move { unit, .. }
            | Command::Path { unit, .. }
            | Command::Stop { unit }
            | Command::Teleport { unit, .. }
            | Command::TimedTeleport { unit, .. } => *unit,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct CommandQueue {
    inner: BTreeMap<Tick, Vec<Command>>,
    total: usize,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, command: Command) {
        self.inner.entry(tick).or_default().push(command);
        self.total += 1;
    }

    /// Remove and return the orders due at exactly `tick`.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<Command>> {
        let commands = self.inner.remove(&tick)?;
        self.total -= commands.len();
        Some(commands)
    }

    /// The earliest tick with a pending order.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
