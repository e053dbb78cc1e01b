//! The map, the buildings, and the cell-event sink.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use dr_core::Cell;
use dr_drive::{CellEvent, CellEventKind, CellEventListener, Drivable};
use dr_grid::{GridService, TileGrid};
use dr_mission::BuildingRegistry;

/// Everything the units share.
#[derive(Clone, Debug)]
pub struct World {
    pub grid:  TileGrid,
    pub radio: BuildingRegistry,
    pub mines: MineField,
}

impl World {
    pub fn new(grid: TileGrid) -> Self {
        Self { grid, radio: BuildingRegistry::new(), mines: MineField::default() }
    }
}

/// One-shot mines plus a log of every cell event.
///
/// A unit that finishes a track on a mined cell is destroyed and the mine is
/// spent.  The simulation removes the wreck from the grid after the unit's
/// step returns.
#[derive(Clone, Debug, Default)]
pub struct MineField {
    mines: FxHashSet<Cell>,
    log:   Vec<CellEvent>,
}

impl MineField {
    pub fn lay(&mut self, cell: Cell) {
        self.mines.insert(cell);
    }

    pub fn is_mined(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.mines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mines.is_empty()
    }

    /// Events seen since the log was last drained, in order.
    pub fn log(&self) -> &[CellEvent] {
        &self.log
    }

    /// Drop the event log, returning it.
    pub fn take_log(&mut self) -> Vec<CellEvent> {
        std::mem::take(&mut self.log)
    }
}

impl CellEventListener for MineField {
    fn on_cell_event(&mut self, unit: &mut dyn Drivable, event: CellEvent, _grid: &mut dyn GridService) {
        debug!(unit = %event.unit, cell = %event.cell, kind = %event.kind, "cell event");
        self.log.push(event);
        if event.kind == CellEventKind::End && self.mines.remove(&event.cell) {
            info!(unit = %event.unit, cell = %event.cell, "mine detonated");
            unit.destroy();
        }
    }
}
