//! Missions.

use std::fmt;

use dr_core::Target;

use crate::{Missionable, Targetable};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mission {
    #[default]
    None,
    Sleep,
    Guard,
    GuardArea,
    Move,
    Attack,
    Enter,
    Harvest,
    Unload,
    Hunt,
}

impl Mission {
    /// Paralyzed missions ignore scatter requests.
    #[inline]
    pub fn is_paralyzed(self) -> bool {
        matches!(self, Mission::Sleep)
    }

    /// Missions where stopping short of the destination is acceptable.
    #[inline]
    pub fn accepts_close_enough(self) -> bool {
        matches!(self, Mission::Move | Mission::GuardArea)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mission::None      => "none",
            Mission::Sleep     => "sleep",
            Mission::Guard     => "guard",
            Mission::GuardArea => "guard_area",
            Mission::Move      => "move",
            Mission::Attack    => "attack",
            Mission::Enter     => "enter",
            Mission::Harvest   => "harvest",
            Mission::Unload    => "unload",
            Mission::Hunt      => "hunt",
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── MissionControl ────────────────────────────────────────────────────────────

/// Plain mission and combat-target state.
///
/// Implements [`Missionable`] and [`Targetable`] so an object can embed one
/// and delegate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissionControl {
    pub mission:   Mission,
    pub suspended: Option<(Mission, Target)>,
    pub tar_com:   Target,
}

impl MissionControl {
    pub fn new(mission: Mission) -> Self {
        Self { mission, ..Self::default() }
    }
}

impl Missionable for MissionControl {
    #[inline]
    fn mission(&self) -> Mission {
        self.mission
    }

    fn assign_mission(&mut self, mission: Mission) {
        self.mission = mission;
    }

    fn override_mission(&mut self, mission: Mission, tar_com: Target) {
        if self.suspended.is_none() {
            self.suspended = Some((self.mission, self.tar_com));
        }
        self.mission = mission;
        self.tar_com = tar_com;
    }

    fn restore_mission(&mut self) {
        if let Some((mission, tar_com)) = self.suspended.take() {
            self.mission = mission;
            self.tar_com = tar_com;
        }
    }
}

impl Targetable for MissionControl {
    #[inline]
    fn tar_com(&self) -> Target {
        self.tar_com
    }

    fn assign_target(&mut self, target: Target) {
        self.tar_com = target;
    }
}
