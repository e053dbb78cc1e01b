//! Engine tuning.

use dr_core::{Difficulty, DrError, DrResult, Fixed};

/// Rule values shared by every unit the engine drives.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveConfig {
    /// Failed path searches tolerated before the destination is dropped.
    pub path_retry: u8,

    /// Minimum ticks between two path searches by the same unit.
    pub path_delay_ticks: u32,

    /// Leptons from the destination at which a move counts as done.
    pub close_enough: i32,

    /// Global multiplier on ground unit speed and rotation rate.
    pub groundspeed_bias: Fixed,

    pub difficulty: Difficulty,

    /// Wheeled units turn through short pivot tracks instead of in place.
    pub three_point_turns: bool,

    /// Prefix wheeled paths with an arc instead of a standing turn.
    pub fixup_paths: bool,

    /// Ticks to hold at a jump sample while a blocker clears the way.
    pub jump_wait_ticks: u8,

    /// Ring radius searched for a substitute cell.
    pub nearby_radius: i32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            path_retry:        10,
            path_delay_ticks:  15,
            close_enough:      576,
            groundspeed_bias:  Fixed::ONE,
            difficulty:        Difficulty::Normal,
            three_point_turns: true,
            fixup_paths:       false,
            jump_wait_ticks:   8,
            nearby_radius:     8,
        }
    }
}

impl DriveConfig {
    pub fn validate(&self) -> DrResult<()> {
        if self.path_retry == 0 && self.path_delay_ticks == 0 {
            return Err(DrError::Config(
                "path_retry and path_delay_ticks cannot both be zero".into(),
            ));
        }
        if self.groundspeed_bias.is_zero() {
            return Err(DrError::Config("groundspeed_bias must be positive".into()));
        }
        if self.nearby_radius < 1 {
            return Err(DrError::Config(format!(
                "nearby_radius must be at least 1, got {}",
                self.nearby_radius
            )));
        }
        Ok(())
    }
}
