//! The facing transition matrix.

use std::fmt;

use dr_core::{Dir, Facing};

use crate::TrackFlags;

/// Index into the transition matrix.
///
/// Ids `0..64` are `current * 8 + next`; `64..67` are docking manoeuvres.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionId(pub u8);

impl TransitionId {
    pub const COUNT: usize = 67;

    /// Back a harvester into a refinery.
    pub const REFINERY_REVERSE: TransitionId = TransitionId(64);
    /// Drive forward back into a refinery.
    pub const REFINERY_RETURN:  TransitionId = TransitionId(65);
    /// Roll out of a weapons factory.
    pub const FACTORY_EXIT:     TransitionId = TransitionId(66);

    #[inline]
    pub const fn between(current: Facing, next: Facing) -> TransitionId {
        TransitionId((current as u8) * 8 + next as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_docking(self) -> bool {
        self.0 >= 64
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 64 {
            let from = Facing::from_index(self.0 / 8);
            let to = Facing::from_index(self.0 % 8);
            write!(f, "{from}-{to}")
        } else {
            write!(f, "dock#{}", self.0 - 64)
        }
    }
}

/// One cell of the transition matrix.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TransitionEntry {
    /// 1-based raw track number; `0` for facing pairs no single track covers.
    pub track:       u8,
    /// Raw track used for the in-place pivot variant; `0` for none.
    pub short_track: u8,
    /// Body heading when the track completes.
    pub facing:      Dir,
    pub flags:       TrackFlags,
}

impl TransitionEntry {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.track != 0
    }

    #[inline]
    pub fn is_double(&self) -> bool {
        self.flags.contains(TrackFlags::DOUBLE)
    }

    /// Raw track number for the regular or short variant.
    #[inline]
    pub fn track_number(&self, short: bool) -> u8 {
        if short { self.short_track } else { self.track }
    }
}
