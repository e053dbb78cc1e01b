//! Dock-capable buildings and the reference radio implementation.

use std::fmt;

use tracing::debug;

use dr_core::{BuildingId, Cell, HouseId, UnitId};

use crate::{MissionError, MissionResult, Radio, RadioMessage};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    Refinery,
    RepairBay,
    WeaponsFactory,
}

impl BuildingKind {
    /// Whether this kind answers docking requests at all.
    #[inline]
    pub fn accepts_docking(self) -> bool {
        !matches!(self, BuildingKind::WeaponsFactory)
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildingKind::Refinery       => "refinery",
            BuildingKind::RepairBay      => "repair_bay",
            BuildingKind::WeaponsFactory => "weapons_factory",
        })
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub id:    BuildingId,
    pub kind:  BuildingKind,
    pub house: HouseId,
    /// Cell a docking unit drives onto.
    pub dock:  Cell,
    contact:   Option<UnitId>,
    docked:    bool,
}

impl Building {
    pub fn new(id: BuildingId, kind: BuildingKind, house: HouseId, dock: Cell) -> Self {
        Self { id, kind, house, dock, contact: None, docked: false }
    }

    /// The unit holding this building's channel.
    #[inline]
    pub fn contact(&self) -> Option<UnitId> {
        self.contact
    }

    #[inline]
    pub fn in_radio_contact(&self) -> bool {
        self.contact.is_some()
    }

    /// `true` after the contact has reported `ImIn`.
    #[inline]
    pub fn is_docked(&self) -> bool {
        self.docked
    }

    fn receive(&mut self, from: UnitId, message: RadioMessage) -> RadioMessage {
        let ours = self.contact == Some(from);
        match message {
            RadioMessage::Hello if self.kind.accepts_docking() && (ours || self.contact.is_none()) => {
                self.contact = Some(from);
                RadioMessage::Roger
            }
            RadioMessage::Docking | RadioMessage::ImIn if ours => {
                if message == RadioMessage::ImIn {
                    self.docked = true;
                }
                RadioMessage::Roger
            }
            RadioMessage::OverAndOut if ours => {
                self.contact = None;
                self.docked = false;
                RadioMessage::Roger
            }
            RadioMessage::OverAndOut | RadioMessage::Roger | RadioMessage::Negative | RadioMessage::Static => {
                RadioMessage::Static
            }
            _ => RadioMessage::Negative,
        }
    }
}

// ── BuildingRegistry ──────────────────────────────────────────────────────────

/// All dock-capable buildings on the map, answering radio traffic.
#[derive(Clone, Debug, Default)]
pub struct BuildingRegistry {
    buildings: Vec<Building>,
}

impl BuildingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, building: Building) -> MissionResult<()> {
        if self.buildings.iter().any(|b| b.id == building.id) {
            return Err(MissionError::DuplicateBuilding(building.id));
        }
        self.buildings.push(building);
        Ok(())
    }

    pub fn get(&self, id: BuildingId) -> MissionResult<&Building> {
        self.building(id).ok_or(MissionError::UnknownBuilding(id))
    }

    /// Close any channel `unit` holds, e.g. when it is destroyed.
    pub fn sign_off(&mut self, unit: UnitId) {
        for b in self.buildings.iter_mut().filter(|b| b.contact == Some(unit)) {
            b.contact = None;
            b.docked = false;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

impl Radio for BuildingRegistry {
    fn transmit(&mut self, from: UnitId, message: RadioMessage, to: BuildingId) -> RadioMessage {
        let Some(b) = self.buildings.iter_mut().find(|b| b.id == to) else {
            return RadioMessage::Static;
        };
        let reply = b.receive(from, message);
        debug!(unit = %from, building = %to, ?message, ?reply, "radio");
        reply
    }

    fn contact_of(&self, unit: UnitId) -> Option<BuildingId> {
        self.buildings.iter().find(|b| b.contact == Some(unit)).map(|b| b.id)
    }

    fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }
}
