//! Table lookups and the reflection transform.

use dr_core::{Coord, Dir, Facing};

use crate::data::{RAW_TRACKS, TRANSITIONS};
use crate::{RawTrack, TrackFlags, TrackSample, TransitionEntry, TransitionId};

/// Read-only view over the raw tracks and the transition matrix.
#[derive(Debug)]
pub struct TrackTable {
    raw:         &'static [RawTrack; 13],
    transitions: &'static [TransitionEntry; TransitionId::COUNT],
}

static STANDARD: TrackTable = TrackTable {
    raw:         &RAW_TRACKS,
    transitions: &TRANSITIONS,
};

impl TrackTable {
    /// The built-in table.
    pub fn standard() -> &'static TrackTable {
        &STANDARD
    }

    /// Transition for moving toward `current` with `next` queued after it.
    #[inline]
    pub fn lookup(&self, current: Facing, next: Facing) -> &TransitionEntry {
        &self.transitions[TransitionId::between(current, next).index()]
    }

    #[inline]
    pub fn entry(&self, id: TransitionId) -> Option<&TransitionEntry> {
        self.transitions.get(id.index())
    }

    /// Raw track by its 1-based number.  `0` and out-of-range give `None`.
    #[inline]
    pub fn raw_track(&self, number: u8) -> Option<&RawTrack> {
        (number as usize).checked_sub(1).and_then(|i| self.raw.get(i))
    }

    /// The raw track a unit following `id` walks, honouring the short variant.
    pub fn track_for(&self, id: TransitionId, short: bool) -> Option<&RawTrack> {
        self.entry(id).and_then(|e| self.raw_track(e.track_number(short)))
    }

    /// Iterate the 64 regular transitions with their ids.
    pub fn regular(&self) -> impl Iterator<Item = (TransitionId, &TransitionEntry)> {
        self.transitions[..64]
            .iter()
            .enumerate()
            .map(|(i, e)| (TransitionId(i as u8), e))
    }
}

/// Position and heading for `sample` re-oriented by `flags` around `head_to`.
///
/// Pure: the same inputs always produce the same output on every peer.
pub fn smooth_turn(flags: TrackFlags, head_to: Coord, sample: &TrackSample) -> (Coord, Dir) {
    let mut x = sample.x as i32;
    let mut y = sample.y as i32;
    let mut dir = sample.dir.0;

    if flags.contains(TrackFlags::TRANSPOSE) {
        std::mem::swap(&mut x, &mut y);
        dir = Dir::W.0.wrapping_sub(dir);
    }
    if flags.contains(TrackFlags::MIRROR_X) {
        x = -x;
        dir = dir.wrapping_neg();
    }
    if flags.contains(TrackFlags::MIRROR_Y) {
        y = -y;
        dir = Dir::S.0.wrapping_sub(dir);
    }

    (head_to.offset(x, y), Dir(dir))
}
