//! Motion integrator: speed accrual, sample stepping, and mid-track jumps.

use tracing::{debug, trace};

use dr_core::{Cell, Coord};
use dr_grid::{MoveType, PathFinder};
use dr_mission::Positionable;
use dr_track::{TransitionId, smooth_turn};

use crate::engine::{Driver, STEP};
use crate::CellEventKind;

/// Outcome of a jump attempt at a track's jump sample.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Jump {
    /// Switched onto the next turn.
    Taken,
    /// Blocked by something that may clear; hold position this tick.
    Wait,
    /// Carry on along the current track.
    Skip,
}

impl<P: PathFinder> Driver<'_, '_, P> {
    /// Top speed in leptons per tick after every modifier.
    pub fn max_speed(&self) -> i32 {
        let base = self.unit.formation_speed().unwrap_or(self.unit.profile().max_speed);
        let bias = self.cfg().groundspeed_bias * self.unit.speed_bias();
        let speed = bias.scale(base.leptons()).min(255);
        if self.unit.is_carrying_flag() { speed / 2 } else { speed }
    }

    /// Per-tick movement along the current track.
    ///
    /// Returns `false` (and zeroes the accumulator) when the object is not in
    /// a state to move.
    pub fn while_moving(&mut self) -> bool {
        let st = self.st();
        if !st.is_driving || st.track.is_none() || st.facing.is_rotating() {
            let st = self.st_mut();
            st.accumulator = 0;
            st.render_offset = (0, 0);
            return false;
        }
        self.integrate(true)
    }

    /// Spend the accumulator on track samples.
    ///
    /// With `accrue` the throttle-scaled speed is added first.  A pass with
    /// `accrue == false` spends only the remainder carried over from a track
    /// that just completed.
    pub(crate) fn integrate(&mut self, accrue: bool) -> bool {
        if !self.alive() {
            return false;
        }
        if accrue {
            let gain = self.st().throttle.scale(self.max_speed());
            self.st_mut().accumulator += gain;
        }

        let id = self.unit.id();
        let table = self.engine.table();
        let mut moved = false;

        self.mark_up();
        loop {
            let st = self.st();
            let (Some(track), Some(head)) = (st.track, st.head_to) else { break };
            if st.accumulator < STEP {
                break;
            }
            let short = st.on_short_track;
            let idx = st.track_index;
            let (Some(entry), Some(raw)) = (table.entry(track).copied(), table.track_for(track, short)) else {
                break;
            };

            self.st_mut().accumulator -= STEP;
            moved = true;

            if raw.is_complete_at(idx) {
                self.complete_track(head, raw.sample(idx).map(|s| smooth_turn(entry.flags, head.center(), s).1));
                break;
            }
            let Some(sample) = raw.sample(idx) else { break };
            let (coord, dir) = smooth_turn(entry.flags, head.center(), sample);
            self.unit.set_coord(coord);
            self.st_mut().facing.set(dir);
            trace!(unit = %id, track = track.0, idx, %coord, "step");

            if idx > 0 && raw.cell == Some(idx) {
                // Reached the middle cell of a two-cell track.
                self.world.grid.set_occupancy(coord.cell(), id, false);
                self.mark_down();
                self.per_cell_process(CellEventKind::During);
                if !self.alive() {
                    return moved;
                }
                self.mark_up();
            }

            if idx > 0 && raw.jump == Some(idx) && !short {
                match self.try_jump() {
                    Jump::Taken => {
                        if !self.alive() {
                            return moved;
                        }
                        continue;
                    }
                    Jump::Wait => {
                        let st = self.st_mut();
                        st.accumulator = st.accumulator.min(STEP - 1);
                        break;
                    }
                    Jump::Skip => {}
                }
            }

            self.st_mut().track_index = idx + 1;
        }

        if self.alive() {
            self.mark_down();
            self.update_render_offset();
        }
        moved
    }

    fn complete_track(&mut self, head: Cell, final_dir: Option<dr_core::Dir>) {
        self.unit.set_coord(head.center());
        if let Some(dir) = final_dir {
            self.st_mut().facing.set(dir);
        }
        self.stop_driver();
        let st = self.st_mut();
        st.track = None;
        st.track_index = 0;
        st.on_short_track = false;
        st.jump_wait = 0;
        debug!(unit = %self.unit.id(), cell = %head, "track complete");

        self.mark_down();
        self.per_cell_process(CellEventKind::End);
        if self.alive() {
            self.mark_up();
        }
    }

    /// Try to switch onto the turn toward the next queued facing without
    /// finishing the current track.
    pub(crate) fn try_jump(&mut self) -> Jump {
        let table = self.engine.table();
        let st = self.st();
        let (Some(track), Some(head), Some(next)) = (st.track, st.head_to, st.path.first()) else {
            return Jump::Skip;
        };
        let old_index = st.track_index;
        let throttle = st.throttle;

        let Some(entry) = table.entry(track) else { return Jump::Skip };
        let track_face = entry.facing.to_facing();
        if next == track_face {
            return Jump::Skip;
        }
        let new_id = TransitionId::between(track_face, next);
        let Some(new_entry) = table.entry(new_id).copied().filter(|e| e.is_valid()) else {
            return Jump::Skip;
        };
        let Some(new_raw) = table.raw_track(new_entry.track) else { return Jump::Skip };
        let Some(land) = new_raw.entry else { return Jump::Skip };

        let id = self.unit.id();
        let mover = self.unit.mover();
        let c = head.adjacent(next);

        match self.world.grid.can_enter(&mover, c, Some(next)) {
            MoveType::Ok => {
                let midpoint = new_raw
                    .cell
                    .filter(|&ci| land < ci)
                    .and_then(|ci| new_raw.sample(ci))
                    .map(|s| smooth_turn(new_entry.flags, c.center(), s).0.cell());
                let landing = new_raw.sample(land).map(|s| smooth_turn(new_entry.flags, c.center(), s).0.cell());
                let held = |cell: Option<Cell>| {
                    cell.and_then(|m| self.world.grid.reservation(m)).is_some_and(|u| u != id)
                };
                if held(midpoint) || held(landing) {
                    trace!(unit = %id, track = new_id.0, "jump cells held");
                    return Jump::Skip;
                }

                self.stop_driver();
                let st = self.st_mut();
                st.track = Some(new_id);
                st.on_short_track = false;
                st.track_index = land;
                st.jump_wait = 0;

                self.mark_down();
                self.per_cell_process(CellEventKind::End);
                if !self.alive() {
                    return Jump::Taken;
                }
                self.mark_up();

                if self.start_driver(c) {
                    let st = self.st_mut();
                    st.throttle = throttle;
                    st.path.shift(1);
                    debug!(unit = %id, from = track.0, to = new_id.0, land, "jump");
                    Jump::Taken
                } else {
                    let st = self.st_mut();
                    st.track = Some(track);
                    st.track_index = old_index;
                    self.start_driver(head);
                    self.st_mut().throttle = throttle;
                    Jump::Skip
                }
            }
            MoveType::Cloak => {
                self.shimmer(c);
                Jump::Skip
            }
            verdict @ (MoveType::Temp | MoveType::MovingBlock) => {
                let waited = self.st().jump_wait;
                if waited == 0 && verdict == MoveType::Temp {
                    let here = self.unit.coord();
                    self.incoming(c, Some(here), true, true);
                }
                if waited < self.cfg().jump_wait_ticks {
                    self.st_mut().jump_wait = waited + 1;
                    Jump::Wait
                } else {
                    debug!(unit = %id, cell = %c, "jump abandoned");
                    self.st_mut().jump_wait = 0;
                    Jump::Skip
                }
            }
            _ => Jump::Skip,
        }
    }

    fn update_render_offset(&mut self) {
        let table = self.engine.table();
        let st = self.st();
        let next: Option<Coord> = match (st.track, st.head_to) {
            (Some(track), Some(head)) => table
                .entry(track)
                .zip(table.track_for(track, st.on_short_track))
                .and_then(|(e, raw)| raw.sample(st.track_index).map(|s| smooth_turn(e.flags, head.center(), s).0)),
            _ => None,
        };
        let here = self.unit.coord();
        let accum = st.accumulator;
        let offset = next.map_or((0, 0), |n| ((n.x - here.x) * accum / STEP, (n.y - here.y) * accum / STEP));
        self.st_mut().render_offset = offset;
    }
}
