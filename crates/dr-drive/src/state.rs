//! Per-object drive state.

use std::fmt;

use dr_core::{Cell, Countdown, FacingTracker, Fixed, Target};
use dr_grid::MoveType;
use dr_track::TransitionId;

use crate::PathBuffer;

/// Observable phase of the tick orchestrator.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriveStatus {
    #[default]
    Idle,
    Rotating,
    OnTrack,
    Blocked,
}

impl DriveStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DriveStatus::Idle     => "idle",
            DriveStatus::Rotating => "rotating",
            DriveStatus::OnTrack  => "on_track",
            DriveStatus::Blocked  => "blocked",
        }
    }
}

impl fmt::Display for DriveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pending return trip after a timed teleport.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeleportReturn {
    pub origin:    Cell,
    pub countdown: Countdown,
}

/// Everything the engine keeps about one moving object.
///
/// Created idle with the object and mutated only by the engine.  `track` is
/// either `None` or a valid transition id; `track_index` never runs past the
/// selected raw track; `accumulator` stays below one track step between
/// ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveState {
    /// Body heading (PrimaryFacing).
    pub facing:          FacingTracker,
    pub track:           Option<TransitionId>,
    pub track_index:     usize,
    pub on_short_track:  bool,
    /// Cell the current track ends in.
    pub head_to:         Option<Cell>,
    pub is_driving:      bool,
    /// Fraction of top speed for the current track.
    pub throttle:        Fixed,
    /// Leptons of movement not yet spent on a track step.
    pub accumulator:     i32,
    /// Sub-step offset toward the next sample, for rendering only.
    pub render_offset:   (i32, i32),
    pub path:            PathBuffer,
    /// Movement destination (NavCom).
    pub nav_com:         Target,
    /// Tolerance of the next path search.
    pub threshold:       MoveType,
    pub retry_budget:    u8,
    /// Ticks until another path search is allowed.
    pub path_delay:      Countdown,
    /// Ticks spent holding at a jump sample for a blocker to clear.
    pub jump_wait:       u8,
    pub is_scattering:   bool,
    pub blocked:         bool,
    /// Whether the object is currently registered in its cell's occupant list.
    pub is_down:         bool,
    pub teleport_return: Option<TeleportReturn>,
}

impl DriveState {
    pub fn new(facing: FacingTracker, retry_budget: u8) -> Self {
        Self {
            facing,
            track:           None,
            track_index:     0,
            on_short_track:  false,
            head_to:         None,
            is_driving:      false,
            throttle:        Fixed::ZERO,
            accumulator:     0,
            render_offset:   (0, 0),
            path:            PathBuffer::new(),
            nav_com:         Target::None,
            threshold:       MoveType::Cloak,
            retry_budget,
            path_delay:      Countdown::EXPIRED,
            jump_wait:       0,
            is_scattering:   false,
            blocked:         false,
            is_down:         false,
            teleport_return: None,
        }
    }

    pub fn status(&self) -> DriveStatus {
        if self.track.is_some() {
            DriveStatus::OnTrack
        } else if self.facing.is_rotating() {
            DriveStatus::Rotating
        } else if self.blocked {
            DriveStatus::Blocked
        } else {
            DriveStatus::Idle
        }
    }

    /// No track, no rotation, nothing queued and nowhere to go.
    pub fn is_idle(&self) -> bool {
        self.track.is_none()
            && !self.facing.is_rotating()
            && self.nav_com.is_none()
            && self.path.is_empty()
    }
}
