//! Collaborators handed to the engine for one call, and what it sends back.

use std::fmt;

use dr_core::{Cell, Coord, UnitId};
use dr_grid::GridService;
use dr_mission::Radio;

use crate::Drivable;

/// Landmark reached by a driving object.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellEventKind {
    /// Mid-track sighting point of a two-cell track.
    During,
    /// Track finished (or jumped) in a cell.
    End,
    /// In-place rotation finished.
    Rotation,
}

impl CellEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CellEventKind::During   => "during",
            CellEventKind::End      => "end",
            CellEventKind::Rotation => "rotation",
        }
    }
}

impl fmt::Display for CellEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellEvent {
    pub kind: CellEventKind,
    pub unit: UnitId,
    pub cell: Cell,
}

/// Owner-supplied hook fired at every [`CellEvent`].
///
/// The hook may destroy the object (a mine, say).  The engine checks
/// `is_alive` after every call and unwinds immediately if it is gone.
pub trait CellEventListener {
    fn on_cell_event(&mut self, unit: &mut dyn Drivable, event: CellEvent, grid: &mut dyn GridService);
}

/// Ignores every event.
pub struct NoopListener;

impl CellEventListener for NoopListener {
    fn on_cell_event(&mut self, _unit: &mut dyn Drivable, _event: CellEvent, _grid: &mut dyn GridService) {}
}

/// Side effects on *other* objects, applied by the owner after the current
/// object's step returns.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveEffect {
    /// Ask `unit` to get out of the way.
    Scatter {
        unit:      UnitId,
        threat:    Option<Coord>,
        forced:    bool,
        nokidding: bool,
    },
    /// Reveal a cloaked object in `cell`.
    Shimmer { cell: Cell },
    /// `victim` was run over by `by`.  Already removed from the grid.
    Crush { victim: UnitId, by: UnitId },
}

/// Mutable access to the world for the duration of one engine call.
pub struct DriveWorld<'w> {
    pub grid:     &'w mut dyn GridService,
    pub radio:    &'w mut dyn Radio,
    pub listener: &'w mut dyn CellEventListener,
    pub effects:  &'w mut Vec<DriveEffect>,
}
