//! Capability traits.
//!
//! Each trait covers one narrow concern.  A game object implements the ones
//! it has; the drive engine's own `Drivable` contract builds on all three.

use dr_core::{Cell, Coord, HouseId, Target, UnitId};

use crate::Mission;

/// Something with an identity and a place on the map.
pub trait Positionable {
    fn id(&self) -> UnitId;

    fn house(&self) -> HouseId;

    fn coord(&self) -> Coord;

    fn set_coord(&mut self, coord: Coord);

    #[inline]
    fn cell(&self) -> Cell {
        self.coord().cell()
    }

    /// `false` once the object has been destroyed.  Multi-step routines must
    /// re-check this after every call that can kill.
    fn is_alive(&self) -> bool;
}

/// Something that can hold a combat target (TarCom).
pub trait Targetable {
    fn tar_com(&self) -> Target;

    fn assign_target(&mut self, target: Target);
}

/// Something driven by a mission.
pub trait Missionable {
    fn mission(&self) -> Mission;

    fn assign_mission(&mut self, mission: Mission);

    /// Switch to `mission` against `tar_com`, remembering the current mission
    /// so [`restore_mission`](Self::restore_mission) can resume it.
    fn override_mission(&mut self, mission: Mission, tar_com: Target);

    fn restore_mission(&mut self);
}
