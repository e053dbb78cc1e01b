//! Bounded queue of upcoming facings.

use std::fmt;

use dr_core::Facing;

const PATH_CAPACITY: usize = 9;

/// Up to [`CAPACITY`](Self::CAPACITY) queued steps, consumed from the front.
///
/// Entries are always contiguous from index 0: consuming shifts the rest
/// forward and replanning replaces the whole queue, so there is never a gap
/// followed by live entries.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathBuffer {
    steps: [Option<Facing>; PATH_CAPACITY],
}

impl PathBuffer {
    pub const CAPACITY: usize = PATH_CAPACITY;

    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding the first `CAPACITY` entries of `steps`.
    pub fn from_steps(steps: &[Facing]) -> Self {
        let mut buf = Self::new();
        buf.replace(steps);
        buf
    }

    /// Discard the queue and load the prefix of `steps` that fits.
    pub fn replace(&mut self, steps: &[Facing]) {
        self.steps = [None; Self::CAPACITY];
        for (slot, &f) in self.steps.iter_mut().zip(steps) {
            *slot = Some(f);
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.steps = [None; Self::CAPACITY];
    }

    #[inline]
    pub fn first(&self) -> Option<Facing> {
        self.steps[0]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Facing> {
        self.steps.get(index).copied().flatten()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps[0].is_none()
    }

    pub fn len(&self) -> usize {
        self.steps.iter().take_while(|s| s.is_some()).count()
    }

    /// Drop the first `n` steps.
    pub fn shift(&mut self, n: usize) {
        let n = n.min(Self::CAPACITY);
        self.steps.rotate_left(n);
        for slot in &mut self.steps[Self::CAPACITY - n..] {
            *slot = None;
        }
    }

    /// Keep at most `len` steps.
    pub fn truncate(&mut self, len: usize) {
        for slot in self.steps.iter_mut().skip(len) {
            *slot = None;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Facing> + '_ {
        self.steps.iter().map_while(|s| *s)
    }

    pub fn to_vec(&self) -> Vec<Facing> {
        self.iter().collect()
    }
}

impl fmt::Debug for PathBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
