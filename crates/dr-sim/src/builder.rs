//! Fluent builder for constructing a [`Sim`].

use tracing::debug;

use dr_core::{Cell, SimConfig, UnitId};
use dr_drive::{Drivable, DriveConfig, DriveEngine};
use dr_grid::{DijkstraPathFinder, GridService, MoveType, PathFinder, TileGrid};
use dr_mission::Building;

use crate::{Sim, SimError, SimResult, Unit, UnitSpec, World};

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, snapshot interval
/// - [`TileGrid`]: the map
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                   |
/// |----------------------|---------------------------|
/// | `.unit(s)`/`.units`  | No units                  |
/// | `.building(b)`       | No buildings              |
/// | `.mine(c)`           | No mines                  |
/// | `.drive_config(c)`   | `DriveConfig::default()`  |
/// | `.finder(f)`         | `DijkstraPathFinder`      |
///
/// Units get `UnitId`s in the order they were added, starting at 0.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, TileGrid::new(32, 32))
///     .unit(UnitSpec::new(HouseId(0), DriveProfile::default(), Cell::new(2, 2), Dir::N))
///     .build()?;
/// sim.command(Tick(0), Command::Move { unit: UnitId(0), target: Target::Cell(Cell::new(9, 2)) })?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: PathFinder = DijkstraPathFinder> {
    config:    SimConfig,
    grid:      TileGrid,
    units:     Vec<UnitSpec>,
    buildings: Vec<Building>,
    mines:     Vec<Cell>,
    drive:     DriveConfig,
    finder:    P,
}

impl SimBuilder<DijkstraPathFinder> {
    pub fn new(config: SimConfig, grid: TileGrid) -> Self {
        Self {
            config,
            grid,
            units:     Vec::new(),
            buildings: Vec::new(),
            mines:     Vec::new(),
            drive:     DriveConfig::default(),
            finder:    DijkstraPathFinder::default(),
        }
    }
}

impl<P: PathFinder> SimBuilder<P> {
    pub fn unit(mut self, spec: UnitSpec) -> Self {
        self.units.push(spec);
        self
    }

    pub fn units(mut self, specs: impl IntoIterator<Item = UnitSpec>) -> Self {
        self.units.extend(specs);
        self
    }

    pub fn building(mut self, building: Building) -> Self {
        self.buildings.push(building);
        self
    }

    pub fn mine(mut self, cell: Cell) -> Self {
        self.mines.push(cell);
        self
    }

    pub fn drive_config(mut self, config: DriveConfig) -> Self {
        self.drive = config;
        self
    }

    /// Swap in a different path finder.
    pub fn finder<Q: PathFinder>(self, finder: Q) -> SimBuilder<Q> {
        SimBuilder {
            config:    self.config,
            grid:      self.grid,
            units:     self.units,
            buildings: self.buildings,
            mines:     self.mines,
            drive:     self.drive,
            finder,
        }
    }

    /// Validate inputs, place every unit on the map, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        let engine = DriveEngine::new(self.finder, self.drive)?;
        let mut world = World::new(self.grid);

        for building in self.buildings {
            if !world.grid.in_bounds(building.dock) {
                return Err(SimError::Config(format!(
                    "{} docks off the map at {}",
                    building.id, building.dock
                )));
            }
            world.radio.add(building)?;
        }
        for cell in self.mines {
            if !world.grid.in_bounds(cell) {
                return Err(SimError::Config(format!("mine off the map at {cell}")));
            }
            world.mines.lay(cell);
        }

        let mut units = Vec::with_capacity(self.units.len());
        for (i, spec) in self.units.iter().enumerate() {
            let id = UnitId::try_from(i)
                .map_err(|_| SimError::Config(format!("too many units ({})", self.units.len())))?;
            let unit = Unit::new(id, spec, engine.config(), self.config.seed);
            let cell = spec.cell;
            if !world.grid.in_bounds(cell)
                || world.grid.can_enter(&unit.mover(), cell, None) == MoveType::No
            {
                return Err(SimError::Placement { unit: id, cell });
            }
            units.push(unit);
        }

        let mut sim = Sim::from_parts(self.config, engine, world, units);
        for i in 0..sim.units.len() {
            let cell = self.units[i].cell;
            sim.drive(i, |d| d.unlimbo(cell));
        }
        debug!(units = sim.units.len(), mines = sim.world.mines.len(), "simulation built");
        Ok(sim)
    }
}
