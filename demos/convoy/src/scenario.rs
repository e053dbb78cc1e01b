//! JSON scenario file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use dr_core::{BuildingId, Cell, HouseId, SimConfig, Tick};
use dr_drive::DriveConfig;
use dr_grid::TileGrid;
use dr_mission::{Building, BuildingKind};
use dr_sim::{Command, Sim, SimBuilder, UnitSpec};

#[derive(Debug, Deserialize)]
pub struct BuildingSpec {
    pub kind:  BuildingKind,
    pub house: HouseId,
    pub dock:  Cell,
}

#[derive(Debug, Deserialize)]
pub struct Order {
    pub tick:    u64,
    pub command: Command,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub sim:       SimConfig,
    #[serde(default)]
    pub drive:     DriveConfig,
    /// One string per map row, one land glyph per cell.
    pub map:       Vec<String>,
    #[serde(default)]
    pub buildings: Vec<BuildingSpec>,
    #[serde(default)]
    pub mines:     Vec<Cell>,
    pub units:     Vec<UnitSpec>,
    #[serde(default)]
    pub orders:    Vec<Order>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build a ready-to-run sim with every order queued.
    pub fn build(&self) -> Result<Sim> {
        let grid = TileGrid::from_ascii(&self.map.join("\n"))?;
        let mut builder = SimBuilder::new(self.sim.clone(), grid)
            .drive_config(self.drive.clone())
            .units(self.units.iter().cloned());
        for (i, b) in self.buildings.iter().enumerate() {
            let id = BuildingId::try_from(i)?;
            builder = builder.building(Building::new(id, b.kind, b.house, b.dock));
        }
        for &cell in &self.mines {
            builder = builder.mine(cell);
        }
        let mut sim = builder.build()?;
        for order in &self.orders {
            sim.command(Tick(order.tick), order.command.clone())?;
        }
        Ok(sim)
    }
}
