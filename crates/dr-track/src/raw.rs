//! Raw trajectory data.

use dr_core::Dir;

/// One point along a trajectory, relative to the head-to cell centre.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TrackSample {
    pub x:   i16,
    pub y:   i16,
    pub dir: Dir,
}

impl TrackSample {
    /// `true` for the `(0, 0)` sample that terminates every track.
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// A stored trajectory plus its landmark indices.
#[derive(Copy, Clone, Debug)]
pub struct RawTrack {
    pub samples: &'static [TrackSample],
    /// Sample at which a mid-track switch to the next turn may happen.
    pub jump:    Option<usize>,
    /// Sample a jumping unit lands on when it switches onto this track.
    pub entry:   Option<usize>,
    /// Sample at which the unit counts as having reached the middle cell.
    pub cell:    Option<usize>,
}

impl RawTrack {
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn sample(&self, index: usize) -> Option<&TrackSample> {
        self.samples.get(index)
    }

    /// `true` once `index` has walked onto the terminator (or past the end).
    pub fn is_complete_at(&self, index: usize) -> bool {
        match self.samples.get(index) {
            Some(s) => index > 0 && s.is_origin(),
            None => true,
        }
    }
}
