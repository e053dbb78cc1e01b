//! The contract between the engine and the object it drives.

use dr_core::{Fixed, Locomotor, Mph, UnitRng};
use dr_grid::{Mover, Occupant, OccupantKind};
use dr_mission::{Missionable, Positionable, Targetable};

use crate::DriveState;

/// Static movement characteristics of a vehicle type.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveProfile {
    pub locomotor: Locomotor,
    pub max_speed: Mph,
    /// Body rotation rate in 256ths of a turn per tick.
    pub rot:       u8,
    pub crusher:   bool,
    pub harvester: bool,
}

impl Default for DriveProfile {
    fn default() -> Self {
        Self {
            locomotor: Locomotor::Track,
            max_speed: Mph::SLOW_ISH,
            rot:       5,
            crusher:   false,
            harvester: false,
        }
    }
}

/// A movable object as the drive engine sees it.
///
/// The engine reads and writes only what this trait exposes: identity and
/// coordinate, the embedded [`DriveState`], speed modifiers, and liveness.
pub trait Drivable: Positionable + Targetable + Missionable {
    fn profile(&self) -> &DriveProfile;

    fn drive(&self) -> &DriveState;

    fn drive_mut(&mut self) -> &mut DriveState;

    /// Per-object random stream (scatter jitter).
    fn rng(&mut self) -> &mut UnitRng;

    /// Mark the object destroyed.  `is_alive` must return `false` afterwards.
    fn destroy(&mut self);

    /// Damaged objects drive at three-quarter throttle.
    fn is_damaged(&self) -> bool {
        false
    }

    /// Per-object multiplier on top speed.
    fn speed_bias(&self) -> Fixed {
        Fixed::ONE
    }

    /// Speed imposed by a formation move, replacing the object's own.
    fn formation_speed(&self) -> Option<Mph> {
        None
    }

    /// Flag carriers drive at half speed.
    fn is_carrying_flag(&self) -> bool {
        false
    }

    fn is_cloaked(&self) -> bool {
        false
    }

    fn mover(&self) -> Mover {
        let p = self.profile();
        Mover {
            unit:      self.id(),
            house:     self.house(),
            locomotor: p.locomotor,
            crusher:   p.crusher,
        }
    }

    /// How this object appears in its cell's occupant list.
    fn occupant(&self) -> Occupant {
        let kind = match self.profile().locomotor {
            Locomotor::Foot => OccupantKind::Infantry,
            Locomotor::Float => OccupantKind::Vessel,
            _ => OccupantKind::Vehicle,
        };
        Occupant {
            unit:      self.id(),
            house:     self.house(),
            kind,
            cloaked:   self.is_cloaked(),
            crushable: kind == OccupantKind::Infantry,
        }
    }
}
