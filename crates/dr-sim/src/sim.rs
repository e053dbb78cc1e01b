//! The `Sim` struct and its tick loop.

use tracing::{debug, info, warn};

use dr_core::{SimClock, SimConfig, Target, Tick, UnitId};
use dr_drive::{DriveEffect, DriveEngine, DriveStatus, DriveWorld, Driver};
use dr_grid::{DijkstraPathFinder, GridService, PathFinder};
use dr_mission::{Mission, Missionable};

use crate::{Command, CommandQueue, SimError, SimObserver, SimResult, TickSummary, Unit, World};

/// Effects can cause further effects (a scatter that crushes, say).  Rounds
/// beyond this are dropped.
const MAX_EFFECT_ROUNDS: usize = 8;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs three phases, always in the same order:
///
/// 1. **Orders**: apply the commands queued for this tick, in submission
///    order.
/// 2. **Drive**: call the engine's `ai` for every live unit, ascending
///    `UnitId`.
/// 3. **Timers**: count down shimmer visibility.
///
/// After every order and every unit step the sim *settles*: destroyed units
/// are lifted off the map and out of radio contact, then the scatter,
/// shimmer and crush requests raised by that step are applied.
///
/// Nothing in the loop reads the wall clock or a shared RNG, so two runs with
/// the same inputs produce identical trajectories.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: PathFinder = DijkstraPathFinder> {
    pub config:   SimConfig,
    pub clock:    SimClock,
    pub engine:   DriveEngine<P>,
    pub world:    World,

    /// Every unit ever created, indexed by `UnitId`.  Dead units stay in the
    /// table with `alive == false`.
    pub units:    Vec<Unit>,

    pub commands: CommandQueue,

    effects:      Vec<DriveEffect>,
}

impl<P: PathFinder> Sim<P> {
    pub(crate) fn from_parts(
        config: SimConfig,
        engine: DriveEngine<P>,
        world:  World,
        units:  Vec<Unit>,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            engine,
            world,
            units,
            commands: CommandQueue::new(),
            effects: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            units = self.units.len(),
            ticks = self.config.total_ticks,
            seed  = self.config.seed,
            "simulation start"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            tick  = self.clock.current_tick.0,
            alive = self.live_units(),
            "simulation end"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Queue `command` for `tick`.  Orders for a tick already processed are
    /// applied at the start of the next tick.
    pub fn command(&mut self, tick: Tick, command: Command) -> SimResult<()> {
        let unit = command.unit();
        if unit.index() >= self.units.len() {
            return Err(SimError::UnknownUnit(unit));
        }
        let tick = tick.max(self.clock.current_tick);
        self.commands.push(tick, command);
        Ok(())
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index())
    }

    pub fn live_units(&self) -> usize {
        self.units.iter().filter(|u| u.alive).count()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let destroyed = self.process_tick(now)?;

        let events = self.world.mines.take_log();
        for event in &events {
            observer.on_cell_event(now, event);
        }
        let summary = TickSummary {
            tick:      now,
            moving:    self.count_status(DriveStatus::OnTrack),
            blocked:   self.count_status(DriveStatus::Blocked),
            events:    events.len(),
            destroyed,
        };
        observer.on_tick_end(&summary);

        let every = self.config.snapshot_interval_ticks;
        if every > 0 && now.0 % every == 0 {
            observer.on_snapshot(now, &self.units);
        }
        self.clock.advance();
        Ok(())
    }

    /// One tick.  Returns the number of units destroyed.
    fn process_tick(&mut self, now: Tick) -> SimResult<usize> {
        let mut destroyed = 0;

        // ── Phase 1: orders ───────────────────────────────────────────────
        if let Some(commands) = self.commands.drain_tick(now) {
            for command in commands {
                self.apply_command(command)?;
                destroyed += self.settle(now);
            }
        }

        // ── Phase 2: drive, ascending UnitId ──────────────────────────────
        //
        // Effects raised by one unit land before the next unit moves, so a
        // unit told to scatter by a lower id can react this same tick.
        for i in 0..self.units.len() {
            if !self.units[i].alive {
                continue;
            }
            self.drive(i, |d| d.ai());
            destroyed += self.settle(now);
        }

        // ── Phase 3: timers ───────────────────────────────────────────────
        for unit in &mut self.units {
            unit.revealed.tick();
        }

        Ok(destroyed)
    }

    /// Retire the dead, then apply pending effects until none remain.
    /// Returns the number of units retired.
    fn settle(&mut self, now: Tick) -> usize {
        let mut destroyed = self.retire_dead();
        let mut rounds = 0;
        while !self.effects.is_empty() {
            if rounds == MAX_EFFECT_ROUNDS {
                warn!(tick = now.0, dropped = self.effects.len(), "effect rounds exhausted");
                self.effects.clear();
                break;
            }
            let pending = std::mem::take(&mut self.effects);
            for effect in pending {
                self.apply_effect(effect);
            }
            destroyed += self.retire_dead();
            rounds += 1;
        }
        destroyed
    }

    fn apply_command(&mut self, command: Command) -> SimResult<()> {
        let id = command.unit();
        let index = id.index();
        if !self.units.get(index).ok_or(SimError::UnknownUnit(id))?.alive {
            debug!(unit = %id, "order for a dead unit ignored");
            return Ok(());
        }
        match command {
            Command::Move { target, .. } => {
                self.units[index].assign_mission(Mission::Move);
                self.drive(index, |d| d.assign_destination(target));
            }
            Command::Path { steps, .. } => {
                self.units[index].assign_mission(Mission::Move);
                self.drive(index, |d| d.queue_path(&steps));
            }
            Command::Stop { .. } => self.drive(index, |d| {
                d.queue_path(&[]);
                d.assign_destination(Target::None);
            }),
            Command::Teleport { cell, .. } => {
                if !self.drive(index, |d| d.teleport_to(cell)) {
                    debug!(unit = %id, %cell, "teleport order refused");
                }
            }
            Command::TimedTeleport { cell, ticks, .. } => {
                if !self.drive(index, |d| d.teleport_with_return(cell, ticks)) {
                    debug!(unit = %id, %cell, "timed teleport order refused");
                }
            }
        }
        Ok(())
    }

    fn apply_effect(&mut self, effect: DriveEffect) {
        match effect {
            DriveEffect::Scatter { unit, threat, forced, nokidding } => {
                let index = unit.index();
                if self.units.get(index).is_some_and(|u| u.alive) {
                    self.drive(index, |d| d.scatter(threat, forced, nokidding));
                }
            }
            DriveEffect::Shimmer { cell } => {
                let cloaked: Vec<UnitId> = self
                    .world
                    .grid
                    .occupants(cell)
                    .iter()
                    .filter(|o| o.cloaked)
                    .map(|o| o.unit)
                    .collect();
                for id in cloaked {
                    if let Some(unit) = self.units.get_mut(id.index()) {
                        unit.shimmer();
                    }
                }
            }
            DriveEffect::Crush { victim, by } => {
                if let Some(unit) = self.units.get_mut(victim.index()) {
                    if unit.alive {
                        info!(unit = %victim, %by, "crushed");
                        unit.alive = false;
                    }
                }
            }
        }
    }

    /// Take every newly destroyed unit off the map.
    fn retire_dead(&mut self) -> usize {
        let mut count = 0;
        for i in 0..self.units.len() {
            let unit = &self.units[i];
            if unit.alive || unit.retired {
                continue;
            }
            let id = unit.id;
            self.drive(i, |d| d.limbo());
            self.world.radio.sign_off(id);
            self.units[i].retired = true;
            debug!(unit = %id, "retired");
            count += 1;
        }
        count
    }

    fn count_status(&self, status: DriveStatus) -> usize {
        self.units.iter().filter(|u| u.alive && u.drive.status() == status).count()
    }

    /// Bind unit `index` to the engine and the world for one call.
    pub(crate) fn drive<R>(&mut self, index: usize, f: impl FnOnce(&mut Driver<'_, '_, P>) -> R) -> R {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let mut world = DriveWorld {
            grid:     &mut self.world.grid,
            radio:    &mut self.world.radio,
            listener: &mut self.world.mines,
            effects:  &mut self.effects,
        };
        let mut driver = self.engine.driver(&mut self.units[index], &mut world);
        f(&mut driver)
    }
}
