//! The grid interface consumed by the drive engine.
//!
//! # Injection
//!
//! The engine receives a `&mut dyn GridService` on every call, so there is no
//! hidden global map.  Tests substitute a small [`TileGrid`](crate::TileGrid)
//! or a scripted fake; a game embeds its own map behind the same trait.
//!
//! # Reservations vs. presence
//!
//! Two separate records live on each cell:
//!
//! - **presence** ([`place`](GridService::place) / [`remove`](GridService::remove)):
//!   which objects physically sit in the cell.  Used for crushing, scatter
//!   requests and the friendly/enemy classification in `can_enter`.
//! - **reservation** ([`set_occupancy`](GridService::set_occupancy)): which
//!   single moving unit has claimed the cell for its current track.  A cell
//!   has at most one holder at any time.

use dr_core::{Cell, Facing, UnitId};

use crate::{LandType, MoveType, Mover, Occupant, Overlay};

pub trait GridService {
    fn in_bounds(&self, cell: Cell) -> bool;

    fn land_type(&self, cell: Cell) -> LandType;

    fn overlay(&self, cell: Cell) -> Overlay;

    fn set_overlay(&mut self, cell: Cell, overlay: Overlay);

    /// Classify entry into `cell` for `mover`, optionally arriving along
    /// `facing`.  The mover's own presence and reservation are ignored.
    fn can_enter(&self, mover: &Mover, cell: Cell, facing: Option<Facing>) -> MoveType;

    /// The unit currently holding the reservation on `cell`.
    fn reservation(&self, cell: Cell) -> Option<UnitId>;

    /// Claim (`reserve = true`) or release the reservation on `cell`.
    ///
    /// Returns `false` when a claim is refused because another unit holds the
    /// cell.  Releasing a cell held by someone else is a no-op and also
    /// returns `false`.
    fn set_occupancy(&mut self, cell: Cell, unit: UnitId, reserve: bool) -> bool;

    /// Drop every reservation held by `unit`.
    fn release_all(&mut self, unit: UnitId);

    /// `true` when `unit` holds at least one reservation.
    fn is_moving(&self, unit: UnitId) -> bool;

    fn occupants(&self, cell: Cell) -> &[Occupant];

    fn place(&mut self, cell: Cell, occupant: Occupant);

    fn remove(&mut self, cell: Cell, unit: UnitId);

    /// The cell `unit` was last placed in.
    fn locate(&self, unit: UnitId) -> Option<Cell>;

    /// The first object in `cell`, if any.
    fn cell_occupant(&self, cell: Cell) -> Option<Occupant> {
        self.occupants(cell).first().copied()
    }

    /// Nearest cell to `cell` that `mover` may enter outright.
    ///
    /// Searches square rings of growing radius and returns the ring cell
    /// closest to `cell`; ties go to the first in row-major order.
    fn nearby_location(&self, mover: &Mover, cell: Cell, max_radius: i32) -> Option<Cell> {
        for r in 1..=max_radius {
            let mut best: Option<(i32, Cell)> = None;
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx.abs().max(dy.abs()) != r {
                        continue;
                    }
                    let c = Cell::new(cell.x + dx, cell.y + dy);
                    if !self.in_bounds(c) || !self.can_enter(mover, c, None).is_ok() {
                        continue;
                    }
                    let d = cell.distance(c);
                    if best.is_none_or(|(bd, _)| d < bd) {
                        best = Some((d, c));
                    }
                }
            }
            if let Some((_, c)) = best {
                return Some(c);
            }
        }
        None
    }
}
