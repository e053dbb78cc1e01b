//! What sits in a cell, and who is asking to enter it.

use dr_core::{HouseId, Locomotor, UnitId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OccupantKind {
    Vehicle,
    Infantry,
    Vessel,
}

/// An object physically present in a cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupant {
    pub unit:      UnitId,
    pub house:     HouseId,
    pub kind:      OccupantKind,
    pub cloaked:   bool,
    pub crushable: bool,
}

/// Cell decoration that affects passability or records an event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overlay {
    #[default]
    None,
    /// Blocks movement; may be attacked.
    Wall,
    /// Left behind where something was crushed.
    Squish,
}

/// The identity and abilities of the unit asking to move.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Mover {
    pub unit:      UnitId,
    pub house:     HouseId,
    pub locomotor: Locomotor,
    pub crusher:   bool,
}

impl Mover {
    #[inline]
    pub fn is_ally(&self, house: HouseId) -> bool {
        self.house == house
    }
}
