//! `DriveEngine` and the per-call `Driver`.
//!
//! # Call pattern
//!
//! The engine is shared and immutable.  For each object it drives, the owner
//! builds a [`Driver`] that borrows the engine, the object, and a
//! [`DriveWorld`] for the duration of one call:
//!
//! ```rust,ignore
//! let mut world = DriveWorld { grid: &mut grid, radio: &mut radio, listener: &mut mines, effects: &mut fx };
//! engine.driver(&mut tank, &mut world).ai();
//! ```
//!
//! Objects must be stepped one at a time in a fixed order.  The only shared
//! mutable state is the grid, and every reservation change follows
//! release-old → recompute → reserve-new.

use tracing::{debug, info};

use dr_core::{Cell, Coord, Countdown, Dir, DrResult, Facing, FacingTracker, Fixed, Target};
use dr_grid::{DijkstraPathFinder, MoveType, PathFinder};
use dr_mission::{BuildingKind, Mission, Missionable, Positionable, RadioMessage, Targetable};
use dr_track::TrackTable;

use crate::{CellEventKind, DriveConfig, DriveState, DriveStatus, DriveWorld, Drivable, TeleportReturn};

/// Leptons of accumulated movement spent per track sample.
pub const STEP: i32 = 10;

// ── DriveEngine ───────────────────────────────────────────────────────────────

pub struct DriveEngine<P: PathFinder = DijkstraPathFinder> {
    table:  &'static TrackTable,
    finder: P,
    config: DriveConfig,
}

impl DriveEngine<DijkstraPathFinder> {
    /// Engine with the default path finder and configuration.
    pub fn standard() -> Self {
        Self {
            table:  TrackTable::standard(),
            finder: DijkstraPathFinder::default(),
            config: DriveConfig::default(),
        }
    }
}

impl<P: PathFinder> DriveEngine<P> {
    pub fn new(finder: P, config: DriveConfig) -> DrResult<Self> {
        config.validate()?;
        Ok(Self { table: TrackTable::standard(), finder, config })
    }

    #[inline]
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    #[inline]
    pub fn table(&self) -> &'static TrackTable {
        self.table
    }

    #[inline]
    pub fn finder(&self) -> &P {
        &self.finder
    }

    /// Fresh idle state for an object facing `dir`.
    pub fn new_state(&self, dir: Dir) -> DriveState {
        DriveState::new(FacingTracker::new(dir), self.config.path_retry)
    }

    pub fn driver<'a, 'w>(
        &'a self,
        unit:  &'a mut dyn Drivable,
        world: &'a mut DriveWorld<'w>,
    ) -> Driver<'a, 'w, P> {
        Driver { engine: self, unit, world }
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// One object bound to the engine and the world for a single call.
pub struct Driver<'a, 'w, P: PathFinder> {
    pub(crate) engine: &'a DriveEngine<P>,
    pub(crate) unit:   &'a mut dyn Drivable,
    pub(crate) world:  &'a mut DriveWorld<'w>,
}

impl<P: PathFinder> Driver<'_, '_, P> {
    #[inline]
    pub(crate) fn st(&self) -> &DriveState {
        self.unit.drive()
    }

    #[inline]
    pub(crate) fn st_mut(&mut self) -> &mut DriveState {
        self.unit.drive_mut()
    }

    #[inline]
    pub(crate) fn cfg(&self) -> &DriveConfig {
        &self.engine.config
    }

    #[inline]
    pub(crate) fn alive(&self) -> bool {
        self.unit.is_alive()
    }

    pub fn status(&self) -> DriveStatus {
        self.st().status()
    }

    pub fn is_idle(&self) -> bool {
        self.st().is_idle()
    }

    /// The movement destination (NavCom).
    pub fn current_destination(&self) -> Target {
        self.st().nav_com
    }

    /// Committed coordinate plus the sub-step render offset.
    pub fn render_coord(&self) -> Coord {
        let (dx, dy) = self.st().render_offset;
        self.unit.coord().offset(dx, dy)
    }

    /// Cell a target resolves to on the map, if it still exists.
    pub(crate) fn target_cell(&self, target: Target) -> Option<Cell> {
        match target {
            Target::None => None,
            Target::Cell(c) => Some(c),
            Target::Unit(u) => self.world.grid.locate(u),
            Target::Building(b) => self.world.radio.building(b).map(|b| b.dock),
        }
    }

    /// Lepton distance to the NavCom, or `i32::MAX` without one.
    pub(crate) fn nav_distance(&self) -> i32 {
        self.target_cell(self.st().nav_com)
            .map_or(i32::MAX, |c| self.unit.coord().distance(c.center()))
    }

    /// Replace the queued path wholesale, as an external planner would.
    pub fn queue_path(&mut self, steps: &[Facing]) {
        self.st_mut().path.replace(steps);
    }

    // ── Tick orchestrator ─────────────────────────────────────────────────────

    /// Advance this object by one tick.
    pub fn ai(&mut self) {
        if !self.alive() {
            return;
        }
        self.st_mut().path_delay.tick();

        if let Some(mut ret) = self.st().teleport_return {
            ret.countdown.tick();
            if ret.countdown.is_expired() {
                self.st_mut().teleport_return = None;
                debug!(unit = %self.unit.id(), origin = %ret.origin, "teleport return");
                self.teleport_to(ret.origin);
                if !self.alive() {
                    return;
                }
            } else {
                self.st_mut().teleport_return = Some(ret);
            }
        }

        if self.st().track.is_some() {
            self.while_moving();
            if !self.alive() {
                return;
            }
            let st = self.st();
            if st.track.is_none() && (st.nav_com.is_some() || !st.path.is_empty()) {
                self.start_of_move();
                if !self.alive() {
                    return;
                }
                self.integrate(false);
                if !self.alive() {
                    return;
                }
            }
        } else if self.st().facing.is_rotating() {
            let rate = self.cfg().groundspeed_bias.scale(self.unit.profile().rot as i32).clamp(1, 127) as u8;
            self.st_mut().facing.rotation_adjust(rate);
            if !self.st().facing.is_rotating() {
                self.per_cell_process(CellEventKind::Rotation);
                if !self.alive() {
                    return;
                }
            }
        } else {
            let mission = self.unit.mission();
            let st = self.st();
            if (mission != Mission::Guard || st.nav_com.is_some()) && mission != Mission::Unload {
                if st.nav_com.is_some() || !st.path.is_empty() {
                    self.start_of_move();
                    if !self.alive() {
                        return;
                    }
                    self.while_moving();
                    if !self.alive() {
                        return;
                    }
                } else {
                    self.stop_driver();
                }
            }
        }

        if self.st().track.is_none() {
            let st = self.st_mut();
            st.accumulator = 0;
            st.render_offset = (0, 0);
        }
    }

    // ── Destination manager ───────────────────────────────────────────────────

    /// Set the NavCom.  Assigning the current NavCom again changes nothing.
    ///
    /// A harvester sent to an idle refinery negotiates docking instead and
    /// switches to [`Mission::Enter`]; a unit sent to a free repair bay
    /// reserves the bay before driving to it.
    pub fn assign_destination(&mut self, target: Target) {
        if target == self.st().nav_com {
            return;
        }
        let id = self.unit.id();
        let mut target = target;

        if let Target::Building(b) = target {
            let building = self.world.radio.building(b).copied();
            match building {
                Some(bld) if bld.kind == BuildingKind::Refinery && self.unit.profile().harvester => {
                    let mission = self.unit.mission();
                    if self.world.radio.contact_of(id) == Some(b) && mission == Mission::Enter {
                        return;
                    }
                    if self.world.radio.contact_of(id) != Some(b) && !bld.in_radio_contact()
                        && self.world.radio.transmit(id, RadioMessage::Hello, b) == RadioMessage::Roger
                        && mission != Mission::Enter
                        && mission != Mission::Harvest
                    {
                        debug!(unit = %id, building = %b, "refinery accepted docking");
                        self.unit.assign_mission(Mission::Enter);
                        target = Target::None;
                    }
                }
                Some(bld) if bld.kind == BuildingKind::RepairBay => {
                    let busy = bld.contact().is_some_and(|u| u != id);
                    if busy {
                        debug!(unit = %id, building = %b, "repair bay busy");
                        target = Target::None;
                    } else if self.world.radio.transmit(id, RadioMessage::Hello, b) == RadioMessage::Roger {
                        let loco = self.unit.profile().locomotor;
                        if self.world.grid.land_type(bld.dock).is_passable(loco) {
                            if self.world.radio.transmit(id, RadioMessage::Docking, b) == RadioMessage::Roger {
                                debug!(unit = %id, building = %b, "repair bay reserved");
                                let st = self.st_mut();
                                st.nav_com = target;
                                st.threshold = MoveType::Cloak;
                                st.path.clear();
                                return;
                            }
                            self.world.radio.transmit(id, RadioMessage::OverAndOut, b);
                        }
                    }
                }
                _ => {}
            }
        }

        let retry = self.cfg().path_retry;
        let st = self.st_mut();
        st.nav_com = target;
        st.threshold = MoveType::Cloak;
        st.retry_budget = retry;
        st.path.clear();
        if target.is_none() {
            st.blocked = false;
        }
        if !self.st().is_driving && self.unit.mission() != Mission::Unload {
            self.start_of_move();
        }
    }

    /// Drop the destination after failing to make progress.
    pub(crate) fn abandon(&mut self, reason: &'static str) {
        info!(unit = %self.unit.id(), nav = %self.st().nav_com, reason, "destination abandoned");
        let st = self.st_mut();
        st.path.clear();
        st.blocked = false;
        self.assign_destination(Target::None);
    }

    // ── Teleport ──────────────────────────────────────────────────────────────

    /// Move straight to `cell` (or the nearest enterable cell), bypassing the
    /// track system.
    ///
    /// Returns `false` and leaves the object untouched when neither `cell`
    /// nor any cell within the nearby radius can be entered.
    pub fn teleport_to(&mut self, cell: Cell) -> bool {
        let id = self.unit.id();
        let mover = self.unit.mover();
        let dest = if self.world.grid.can_enter(&mover, cell, None) == MoveType::Ok {
            cell
        } else {
            match self.world.grid.nearby_location(&mover, cell, self.cfg().nearby_radius) {
                Some(alt) => alt,
                None => {
                    debug!(unit = %id, %cell, "teleport refused: no open cell");
                    return false;
                }
            }
        };

        self.stop_driver();
        self.force_track(None, None);
        let desired = self.st().facing.desired();
        self.st_mut().facing.set_current(desired);

        if let Some(b) = self.world.radio.contact_of(id) {
            self.world.radio.transmit(id, RadioMessage::OverAndOut, b);
        }
        self.assign_destination(Target::None);
        self.unit.assign_target(Target::None);
        self.unit.assign_mission(Mission::None);
        self.mark_up();
        debug!(unit = %id, %dest, "teleport");
        self.unit.set_coord(dest.center());
        self.mark_down();
        self.per_cell_process(CellEventKind::End);
        true
    }

    /// Teleport to `cell` and come back to the current cell after `ticks`.
    pub fn teleport_with_return(&mut self, cell: Cell, ticks: u32) -> bool {
        let origin = self.unit.cell();
        let ok = self.teleport_to(cell);
        if ok && self.alive() {
            self.st_mut().teleport_return = Some(TeleportReturn {
                origin,
                countdown: Countdown::new(ticks.max(1)),
            });
        }
        ok
    }

    // ── Scatter ───────────────────────────────────────────────────────────────

    /// Respond to a request to get out of the way.
    ///
    /// Picks the first enterable neighbour, starting from the direction away
    /// from `threat` (or the current heading) with a random one-step jitter.
    pub fn scatter(&mut self, threat: Option<Coord>, forced: bool, nokidding: bool) {
        if self.unit.mission().is_paralyzed() || self.unit.mission() == Mission::Unload {
            return;
        }
        let st = self.st();
        if !(st.nav_com.is_none() || (nokidding && !st.facing.is_rotating())) {
            return;
        }
        if self.unit.tar_com().is_some() && !forced && !self.unit.rng().one_in(4) {
            return;
        }

        let here = self.unit.coord();
        let away = threat
            .and_then(|t| t.facing_to(here))
            .unwrap_or_else(|| self.st().facing.current().to_facing());
        let jitter: i8 = self.unit.rng().gen_range(-1..=1);
        let toface = away.rotate(jitter);

        let mover = self.unit.mover();
        let cell = here.cell();
        let refuge = (0..8).map(|i| cell.adjacent(toface.rotate(i))).find(|&c| {
            self.world.grid.in_bounds(c) && self.world.grid.can_enter(&mover, c, None) == MoveType::Ok
        });
        if let Some(c) = refuge {
            debug!(unit = %self.unit.id(), to = %c, "scatter");
            self.assign_destination(Target::Cell(c));
            self.st_mut().is_scattering = true;
        }
    }

    // ── Placement ─────────────────────────────────────────────────────────────

    /// Put the object on the map at the centre of `cell`.
    pub fn unlimbo(&mut self, cell: Cell) {
        self.mark_up();
        self.unit.set_coord(cell.center());
        self.mark_down();
    }

    /// Take the object off the map, dropping its track and reservations.
    pub fn limbo(&mut self) {
        let id = self.unit.id();
        self.stop_driver();
        self.force_track(None, None);
        self.mark_up();
        self.world.grid.release_all(id);
        let st = self.st_mut();
        st.accumulator = 0;
        st.throttle = Fixed::ZERO;
    }
}
