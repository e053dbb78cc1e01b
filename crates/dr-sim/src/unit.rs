//! The simulation's concrete movable object.

use dr_core::{Cell, Coord, Countdown, Dir, FacingTracker, HouseId, Target, UnitId, UnitRng};
use dr_drive::{DriveConfig, DriveProfile, DriveState, Drivable};
use dr_mission::{Mission, MissionControl, Missionable, Positionable, Targetable};

/// Ticks a cloaked unit stays visible after something bumps into it.
pub const SHIMMER_TICKS: u32 = 15;

/// Everything needed to create a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub house:   HouseId,
    pub profile: DriveProfile,
    pub cell:    Cell,
    pub facing:  Dir,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mission: Mission,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damaged: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cloaked: bool,
}

impl UnitSpec {
    pub fn new(house: HouseId, profile: DriveProfile, cell: Cell, facing: Dir) -> Self {
        Self {
            house,
            profile,
            cell,
            facing,
            mission: Mission::Guard,
            damaged: false,
            cloaked: false,
        }
    }
}

/// A ground vehicle (or infantry squad) driven by the engine.
#[derive(Clone, Debug)]
pub struct Unit {
    pub id:       UnitId,
    pub house:    HouseId,
    pub coord:    Coord,
    pub alive:    bool,
    pub damaged:  bool,
    pub cloaked:  bool,
    pub control:  MissionControl,
    pub profile:  DriveProfile,
    pub drive:    DriveState,
    /// Time left visible after a shimmer.
    pub revealed: Countdown,
    pub(crate) retired: bool,
    rng:          UnitRng,
}

impl Unit {
    pub fn new(id: UnitId, spec: &UnitSpec, drive: &DriveConfig, seed: u64) -> Self {
        Self {
            id,
            house:    spec.house,
            coord:    spec.cell.center(),
            alive:    true,
            damaged:  spec.damaged,
            cloaked:  spec.cloaked,
            control:  MissionControl::new(spec.mission),
            profile:  spec.profile,
            drive:    DriveState::new(FacingTracker::new(spec.facing), drive.path_retry),
            revealed: Countdown::EXPIRED,
            retired:  false,
            rng:      UnitRng::new(seed, id),
        }
    }

    /// Make a cloaked unit visible for [`SHIMMER_TICKS`].
    pub fn shimmer(&mut self) {
        self.revealed.set(SHIMMER_TICKS);
    }
}

impl Positionable for Unit {
    #[inline]
    fn id(&self) -> UnitId {
        self.id
    }

    #[inline]
    fn house(&self) -> HouseId {
        self.house
    }

    #[inline]
    fn coord(&self) -> Coord {
        self.coord
    }

    fn set_coord(&mut self, coord: Coord) {
        self.coord = coord;
    }

    #[inline]
    fn is_alive(&self) -> bool {
        self.alive
    }
}

impl Targetable for Unit {
    fn tar_com(&self) -> Target {
        self.control.tar_com()
    }

    fn assign_target(&mut self, target: Target) {
        self.control.assign_target(target);
    }
}

impl Missionable for Unit {
    fn mission(&self) -> Mission {
        self.control.mission()
    }

    fn assign_mission(&mut self, mission: Mission) {
        self.control.assign_mission(mission);
    }

    fn override_mission(&mut self, mission: Mission, tar_com: Target) {
        self.control.override_mission(mission, tar_com);
    }

    fn restore_mission(&mut self) {
        self.control.restore_mission();
    }
}

impl Drivable for Unit {
    #[inline]
    fn profile(&self) -> &DriveProfile {
        &self.profile
    }

    #[inline]
    fn drive(&self) -> &DriveState {
        &self.drive
    }

    #[inline]
    fn drive_mut(&mut self) -> &mut DriveState {
        &mut self.drive
    }

    fn rng(&mut self) -> &mut UnitRng {
        &mut self.rng
    }

    fn destroy(&mut self) {
        self.alive = false;
    }

    fn is_damaged(&self) -> bool {
        self.damaged
    }

    fn is_cloaked(&self) -> bool {
        self.cloaked && self.revealed.is_expired()
    }
}
