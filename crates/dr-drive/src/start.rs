//! Starting the next track: path acquisition, turning, and track selection.

use tracing::{debug, trace};

use dr_core::{CELL_LEPTONS, Cell, Dir, Facing, Fixed, Locomotor, Target};
use dr_grid::{MoveType, Overlay, PathFinder};
use dr_mission::{Mission, Missionable, Positionable};
use dr_track::TransitionId;

use crate::engine::Driver;
use crate::PathBuffer;

/// Arc-replacement steps for wheeled units turning through `|diff|` eighths
/// from a cardinal heading.  Each step is a rotation in eighths applied to
/// the running facing.
const CARDINAL_ARCS: [&[i8]; 4] = [&[0, 2], &[0, 2, 2], &[0, 2, 2, 0], &[0, 2, 2, 1]];

/// Same as [`CARDINAL_ARCS`] starting from a diagonal heading.
const DIAGONAL_ARCS: [&[i8]; 4] = [&[], &[0, 2, 2], &[0, 2, 2, 1], &[0, 2, 2, 1, 0]];

impl<P: PathFinder> Driver<'_, '_, P> {
    /// Pick and commit the next track.
    ///
    /// A refused step costs one path retry; the destination is dropped once
    /// the budget runs out.  The budget refills only when a track is
    /// committed.
    pub fn start_of_move(&mut self) {
        let id = self.unit.id();
        let nav = self.st().nav_com;

        if nav.is_none() && self.st().path.is_empty() {
            self.stop_driver();
            if self.unit.mission() == Mission::Move {
                self.unit.assign_mission(Mission::Guard);
            }
            return;
        }

        if nav.is_mobile() {
            let cells = (self.nav_distance() / CELL_LEPTONS).max(1) as usize;
            self.st_mut().path.truncate(cells);
        }

        if self.st().path.is_empty() {
            if !self.st().path_delay.is_expired() {
                return;
            }
            if !self.basic_path() {
                let close = self.nav_distance() <= self.cfg().close_enough;
                if close && self.unit.mission().accepts_close_enough() {
                    debug!(unit = %id, "close enough");
                    self.assign_destination(Target::None);
                } else {
                    let ahead = self.unit.cell().adjacent(self.st().facing.current().to_facing());
                    if self.world.grid.can_enter(&self.unit.mover(), ahead, None) == MoveType::Temp {
                        let here = self.unit.coord();
                        self.incoming(ahead, Some(here), false, false);
                    }
                    if close && self.world.radio.contact_of(id).is_none() {
                        self.abandon("unreachable but close");
                    } else {
                        let st = self.st_mut();
                        st.retry_budget = st.retry_budget.saturating_sub(1);
                        if st.retry_budget == 0 {
                            self.abandon("path retries exhausted");
                        }
                    }
                }
                self.stop_driver();
                let st = self.st_mut();
                st.track = None;
                st.blocked = st.nav_com.is_some();
                return;
            }

            if let Some(first) = self.st().path.first() {
                let step = self.unit.cell().adjacent(first);
                if self.world.grid.can_enter(&self.unit.mover(), step, Some(first)) == MoveType::Temp {
                    let here = self.unit.coord();
                    self.incoming(step, Some(here), false, false);
                }
            }
        }

        let Some(facing) = self.st().path.first() else { return };

        let current = self.st().facing.current();
        if facing.to_dir() != current {
            self.do_turn(facing.to_dir());
            return;
        }

        let cell = self.unit.cell();
        let dest = cell.adjacent(facing);
        let mover = self.unit.mover();
        let verdict = self.world.grid.can_enter(&mover, dest, Some(facing));
        if verdict != MoveType::Ok {
            let near = self.unit.mission() == Mission::Move && self.nav_distance() <= self.cfg().close_enough;
            if near {
                self.abandon("blocked near destination");
            }
            self.react_to_blocker(dest, verdict);
            self.stop_driver();
            let st = self.st_mut();
            if verdict != MoveType::MovingBlock {
                st.path.clear();
            }
            st.track = None;
            trace!(unit = %id, cell = %dest, %verdict, "start blocked");
            let gave_up = near || self.charge_retry(verdict);
            self.st_mut().blocked = !gave_up;
            return;
        }

        let loco = self.unit.profile().locomotor;
        let cost = self.world.grid.land_type(dest).cost(loco);
        let mut throttle = if cost.is_zero() { Fixed::HALF } else { cost };
        if self.unit.is_damaged() {
            throttle = throttle.three_quarters();
        }

        self.overrun_square(dest, true);

        let next = self.st().path.get(1).unwrap_or(facing);
        let track = TransitionId::between(facing, next);
        let Some(entry) = self.engine.table().entry(track).copied().filter(|e| e.is_valid()) else {
            self.st_mut().path.clear();
            return;
        };

        let st = self.st_mut();
        st.on_short_track = false;
        st.track = Some(track);
        st.track_index = 0;

        let mut head = dest;
        if entry.is_double() {
            let second = dest.adjacent(next);
            let verdict = self.world.grid.can_enter(&mover, second, Some(next));
            if verdict != MoveType::Ok {
                self.react_to_blocker(second, verdict);
                let st = self.st_mut();
                st.path.clear();
                st.track = None;
                if verdict == MoveType::Destroyable {
                    return;
                }
                st.throttle = Fixed::ZERO;
                let gave_up = self.charge_retry(verdict);
                self.st_mut().blocked = !gave_up;
                return;
            }
            head = second;
            self.st_mut().path.shift(2);
        } else {
            self.st_mut().path.shift(1);
        }

        self.st_mut().blocked = false;
        if self.start_driver(head) {
            let retry = self.cfg().path_retry;
            let st = self.st_mut();
            st.throttle = throttle;
            st.retry_budget = retry;
            debug!(unit = %id, track = track.0, %head, %throttle, "track committed");
        } else {
            let st = self.st_mut();
            st.track = None;
            st.path.clear();
            st.throttle = Fixed::ZERO;
        }
    }

    /// Spend one path retry on a refused step.  Returns `true` when that
    /// used up the budget and the move was dropped.
    ///
    /// A refusal that keeps the path (a unit still on its way out) is charged
    /// at most once per path delay, so a column of followers keeps its budget
    /// while the leader pulls away.  Every other refusal clears the path and
    /// recurs only after the next search.
    fn charge_retry(&mut self, verdict: MoveType) -> bool {
        if verdict == MoveType::Destroyable {
            return false;
        }
        if !self.st().path.is_empty() {
            if !self.st().path_delay.is_expired() {
                return false;
            }
            let delay = self.cfg().path_delay_ticks;
            self.st_mut().path_delay.set(delay);
        }
        let st = self.st_mut();
        st.retry_budget = st.retry_budget.saturating_sub(1);
        trace!(unit = %self.unit.id(), budget = self.st().retry_budget, %verdict, "retry charged");
        if self.st().retry_budget > 0 {
            return false;
        }
        self.abandon("blocked");
        true
    }

    /// React to a non-`Ok` verdict for `cell`.
    fn react_to_blocker(&mut self, cell: Cell, verdict: MoveType) {
        match verdict {
            MoveType::Temp => {
                let here = self.unit.coord();
                self.incoming(cell, Some(here), true, true);
            }
            MoveType::Cloak => self.shimmer(cell),
            MoveType::Destroyable => {
                let house = self.unit.house();
                let enemy = self
                    .world
                    .grid
                    .occupants(cell)
                    .iter()
                    .find(|o| o.house != house)
                    .map(|o| Target::Unit(o.unit));
                let target = enemy.or_else(|| {
                    (self.world.grid.overlay(cell) == Overlay::Wall).then_some(Target::Cell(cell))
                });
                if let Some(target) = target {
                    debug!(unit = %self.unit.id(), %target, "attacking blocker");
                    self.unit.override_mission(Mission::Attack, target);
                }
            }
            _ => {}
        }
    }

    /// Fill the path buffer toward the NavCom.  Returns `false` on failure.
    pub(crate) fn basic_path(&mut self) -> bool {
        let id = self.unit.id();
        self.st_mut().path.clear();

        let Some(mut goal) = self.target_cell(self.st().nav_com) else {
            return false;
        };
        let mover = self.unit.mover();
        let here = self.unit.cell();

        if self.world.grid.can_enter(&mover, goal, None) > MoveType::Cloak
            && self.nav_distance() > self.cfg().close_enough
        {
            let radius = self.cfg().nearby_radius;
            if let Some(alt) = self.world.grid.nearby_location(&mover, goal, radius) {
                if alt.distance(here) < goal.distance(here) {
                    goal = alt;
                }
            }
        }

        let steps = loop {
            let threshold = self.st().threshold;
            match self.engine.finder().find_path(&*self.world.grid, &mover, here, goal, threshold) {
                Ok(steps) => break steps,
                Err(err) => match threshold.escalate().filter(|t| *t <= MoveType::Temp) {
                    Some(next) => {
                        trace!(unit = %id, %err, %next, "escalating path threshold");
                        self.st_mut().threshold = next;
                    }
                    None => {
                        debug!(unit = %id, %err, "no path");
                        break Vec::new();
                    }
                },
            }
        };

        let delay = self.cfg().path_delay_ticks;
        self.st_mut().path_delay.set(delay);
        if steps.is_empty() {
            return false;
        }

        let mut buf = PathBuffer::from_steps(&steps);
        if self.cfg().fixup_paths && self.unit.profile().locomotor == Locomotor::Wheel {
            self.fixup_path(&mut buf);
        }
        self.st_mut().path = buf;
        debug!(unit = %id, %goal, steps = buf.len(), "path found");
        true
    }

    /// Replace a sharp initial turn with an arc for wheeled units.
    pub(crate) fn fixup_path(&mut self, path: &mut PathBuffer) {
        let Some(first) = path.first() else { return };
        let face = self.st().facing.current().to_facing();
        let diff = face.difference(first);
        if diff == 0 {
            return;
        }
        let rows = if face.is_diagonal() { &DIAGONAL_ARCS } else { &CARDINAL_ARCS };
        let row = rows[(diff.unsigned_abs() as usize - 1).min(3)];
        if row.is_empty() {
            return;
        }

        let sign: i8 = if diff > 0 { 1 } else { -1 };
        let mut candidates = vec![sign];
        if diff.unsigned_abs() == 4 {
            candidates.push(-sign);
        }

        let mover = self.unit.mover();
        let start = self.unit.cell();
        for sign in candidates {
            let mut staged = Vec::with_capacity(row.len());
            let mut heading = face;
            let mut cell = start;
            let ok = row.iter().all(|&delta| {
                heading = heading.rotate(delta * sign);
                cell = cell.adjacent(heading);
                staged.push(heading);
                self.world.grid.can_enter(&mover, cell, Some(heading)) == MoveType::Ok
            });
            if ok {
                let rest: Vec<Facing> = path.iter().skip(1).collect();
                staged.extend(rest);
                path.replace(&staged);
                trace!(unit = %self.unit.id(), path = ?path, "path fixed up");
                return;
            }
        }
    }

    /// Turn toward `dir`, either in place or through a short pivot track.
    pub fn do_turn(&mut self, dir: Dir) {
        let st = self.st();
        if st.facing.current() == dir {
            return;
        }
        let wheeled = self.unit.profile().locomotor == Locomotor::Wheel;
        if self.cfg().three_point_turns && st.track.is_none() && wheeled {
            let facediff = (st.facing.difference_to(dir) >> 5).clamp(-2, 2);
            if facediff != 0 {
                let face = st.facing.current().to_facing();
                let track = TransitionId::between(face, face.rotate(facediff));
                let coord = self.unit.coord();
                self.st_mut().on_short_track = true;
                self.force_track(Some(track), Some(coord));
                self.st_mut().throttle = Fixed::ONE;
                debug!(unit = %self.unit.id(), track = track.0, "three-point turn");
                return;
            }
        }
        self.st_mut().facing.set_desired(dir);
    }
}
