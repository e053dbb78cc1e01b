//! Cell bookkeeping: presence, reservations, overrun, and per-cell events.

use tracing::{debug, trace};

use dr_core::{Cell, Coord, Fixed, Target, UnitId};
use dr_grid::{OccupantKind, Overlay, PathFinder};
use dr_mission::{Mission, Missionable, Positionable, RadioMessage};
use dr_track::{TransitionId, smooth_turn};

use crate::engine::Driver;
use crate::{CellEvent, CellEventKind, DriveEffect};

impl<P: PathFinder> Driver<'_, '_, P> {
    // ── Presence ──────────────────────────────────────────────────────────────

    /// Register the object in the occupant list of its current cell.
    pub(crate) fn mark_down(&mut self) {
        if self.st().is_down || !self.alive() {
            return;
        }
        let occupant = self.unit.occupant();
        let cell = self.unit.cell();
        self.world.grid.place(cell, occupant);
        self.st_mut().is_down = true;
    }

    /// Lift the object out of whichever cell it was last placed in.
    pub(crate) fn mark_up(&mut self) {
        if !self.st().is_down {
            return;
        }
        let id = self.unit.id();
        if let Some(cell) = self.world.grid.locate(id) {
            self.world.grid.remove(cell, id);
        }
        self.st_mut().is_down = false;
    }

    // ── Reservations ──────────────────────────────────────────────────────────

    /// Cell holding the middle of the current two-cell track, while the
    /// object has not reached it yet.
    fn pending_midpoint(&self, head: Cell) -> Option<Cell> {
        let table = self.engine.table();
        let st = self.st();
        if st.on_short_track {
            return None;
        }
        let track = st.track?;
        let raw = table.track_for(track, false)?;
        let ci = raw.cell.filter(|&ci| st.track_index < ci)?;
        let entry = table.entry(track)?;
        let sample = raw.sample(ci)?;
        Some(smooth_turn(entry.flags, head.center(), sample).0.cell())
    }

    /// Claim or release the head-to cell and any pending midpoint.
    ///
    /// A claim is all or nothing: if the midpoint is refused the head-to
    /// claim is rolled back.
    pub(crate) fn mark_track(&mut self, head: Cell, reserve: bool) -> bool {
        let id = self.unit.id();
        let midpoint = self.pending_midpoint(head);

        let ok = self.world.grid.set_occupancy(head, id, reserve);
        if reserve && !ok {
            return false;
        }
        if let Some(mid) = midpoint {
            let ok = self.world.grid.set_occupancy(mid, id, reserve);
            if reserve && !ok {
                self.world.grid.set_occupancy(head, id, false);
                return false;
            }
        }
        true
    }

    /// Reserve the track toward `cell` and start driving.
    pub fn start_driver(&mut self, cell: Cell) -> bool {
        self.stop_driver();
        if !self.mark_track(cell, true) {
            trace!(unit = %self.unit.id(), %cell, "reservation refused");
            return false;
        }
        let st = self.st_mut();
        st.head_to = Some(cell);
        st.is_driving = true;
        true
    }

    /// Release the current reservations and stop.
    pub fn stop_driver(&mut self) {
        if let Some(head) = self.st().head_to {
            self.mark_track(head, false);
        }
        let st = self.st_mut();
        st.head_to = None;
        st.throttle = Fixed::ZERO;
        st.is_driving = false;
    }

    /// Put the object on `track` from its first sample, optionally starting
    /// the driver toward the cell of `coord`.
    pub fn force_track(&mut self, track: Option<TransitionId>, coord: Option<Coord>) {
        let st = self.st_mut();
        st.track = track;
        st.track_index = 0;
        if track.is_none() {
            st.on_short_track = false;
        }
        if let Some(coord) = coord {
            self.start_driver(coord.cell());
        }
    }

    // ── Crushing and scattering ───────────────────────────────────────────────

    /// Crush whatever a crusher can crush in `cell`.
    ///
    /// With `threaten`, infantry in the cell is warned off instead when the
    /// difficulty calls for it, and nothing is crushed yet.
    pub fn overrun_square(&mut self, cell: Cell, threaten: bool) {
        if !self.unit.profile().crusher {
            return;
        }
        let id = self.unit.id();
        let house = self.unit.house();

        if threaten {
            if self.cfg().difficulty.warns_infantry() {
                let here = self.unit.coord();
                let infantry: Vec<UnitId> = self
                    .world
                    .grid
                    .occupants(cell)
                    .iter()
                    .filter(|o| o.kind == OccupantKind::Infantry && o.unit != id)
                    .map(|o| o.unit)
                    .collect();
                for unit in infantry {
                    self.world.effects.push(DriveEffect::Scatter {
                        unit,
                        threat:    Some(here),
                        forced:    true,
                        nokidding: false,
                    });
                }
            }
            return;
        }

        let victims: Vec<UnitId> = self
            .world
            .grid
            .occupants(cell)
            .iter()
            .filter(|o| o.crushable && o.house != house && o.unit != id)
            .map(|o| o.unit)
            .collect();
        for &victim in &victims {
            self.world.grid.remove(cell, victim);
            self.world.effects.push(DriveEffect::Crush { victim, by: id });
        }
        if !victims.is_empty() {
            debug!(unit = %id, %cell, crushed = victims.len(), "overrun");
            self.world.grid.set_overlay(cell, Overlay::Squish);
        }
    }

    /// Ask everything in `cell` other than this object to move aside.
    pub fn incoming(&mut self, cell: Cell, threat: Option<Coord>, forced: bool, nokidding: bool) {
        let id = self.unit.id();
        let others: Vec<UnitId> = self
            .world
            .grid
            .occupants(cell)
            .iter()
            .map(|o| o.unit)
            .filter(|&u| u != id)
            .collect();
        for unit in others {
            trace!(unit = %id, other = %unit, %cell, "incoming");
            self.world.effects.push(DriveEffect::Scatter { unit, threat, forced, nokidding });
        }
    }

    /// Reveal whatever cloaked object sits in `cell`.
    pub fn shimmer(&mut self, cell: Cell) {
        self.world.effects.push(DriveEffect::Shimmer { cell });
    }

    // ── Per-cell processing ───────────────────────────────────────────────────

    /// Landmark handling, then the owner's listener.
    ///
    /// The listener may destroy the object; callers check `is_alive` after.
    pub fn per_cell_process(&mut self, kind: CellEventKind) {
        let id = self.unit.id();
        let cell = self.unit.cell();

        if kind == CellEventKind::End {
            let st = self.st_mut();
            if st.nav_com.as_cell() == Some(cell) {
                st.nav_com = Target::None;
                st.path.clear();
            }
            st.is_scattering = false;

            if self.unit.profile().crusher {
                self.overrun_square(cell, false);
            }

            if self.unit.mission() == Mission::Enter {
                if let Some(b) = self.world.radio.contact_of(id) {
                    if self.world.radio.building(b).is_some_and(|bld| bld.dock == cell) {
                        self.world.radio.transmit(id, RadioMessage::ImIn, b);
                        debug!(unit = %id, building = %b, "docked");
                    }
                }
            }
        }

        let event = CellEvent { kind, unit: id, cell };
        self.world.listener.on_cell_event(&mut *self.unit, event, &mut *self.world.grid);
    }
}
