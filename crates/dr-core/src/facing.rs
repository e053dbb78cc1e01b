//! Directions and facings.
//!
//! Two granularities are used:
//!
//! - [`Dir`]: a 256-step compass heading (`0` = north, clockwise).  Track
//!   samples and body orientation use this resolution; all arithmetic wraps
//!   modulo 256.
//! - [`Facing`]: one of the eight cell neighbours.  Paths are sequences of
//!   `Facing`s and the transition matrix is indexed by them.

use std::fmt;

// ── Dir ───────────────────────────────────────────────────────────────────────

/// 256-step heading.  `Dir(64)` is east, `Dir(128)` south.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dir(pub u8);

impl Dir {
    pub const N:  Dir = Dir(0);
    pub const NE: Dir = Dir(32);
    pub const E:  Dir = Dir(64);
    pub const SE: Dir = Dir(96);
    pub const S:  Dir = Dir(128);
    pub const SW: Dir = Dir(160);
    pub const W:  Dir = Dir(192);
    pub const NW: Dir = Dir(224);

    /// Nearest of the eight facings (ties round clockwise).
    #[inline]
    pub const fn to_facing(self) -> Facing {
        Facing::from_index(self.0.wrapping_add(16) >> 5)
    }

    /// Signed shortest rotation from `self` to `to`, in `-128..=127`.
    #[inline]
    pub const fn difference(self, to: Dir) -> i8 {
        to.0.wrapping_sub(self.0) as i8
    }

    #[inline]
    pub const fn rotate(self, amount: i16) -> Dir {
        Dir((self.0 as i16).wrapping_add(amount) as u8)
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

// ── Facing ────────────────────────────────────────────────────────────────────

/// One of the eight compass neighbours.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Facing {
    #[default]
    N  = 0,
    NE = 1,
    E  = 2,
    SE = 3,
    S  = 4,
    SW = 5,
    W  = 6,
    NW = 7,
}

impl Facing {
    pub const COUNT: usize = 8;

    pub const ALL: [Facing; 8] = [
        Facing::N,
        Facing::NE,
        Facing::E,
        Facing::SE,
        Facing::S,
        Facing::SW,
        Facing::W,
        Facing::NW,
    ];

    /// Facing for `index` modulo 8.
    #[inline]
    pub const fn from_index(index: u8) -> Facing {
        Self::ALL[(index & 7) as usize]
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn to_dir(self) -> Dir {
        Dir((self as u8) << 5)
    }

    /// Rotate clockwise by `steps` eighths (negative = counter-clockwise).
    #[inline]
    pub const fn rotate(self, steps: i8) -> Facing {
        Facing::from_index((self as u8).wrapping_add(steps as u8))
    }

    #[inline]
    pub const fn opposite(self) -> Facing {
        self.rotate(4)
    }

    /// Signed eighth-turns from `self` to `to`, in `-4..=3`.
    #[inline]
    pub const fn difference(self, to: Facing) -> i8 {
        self.to_dir().difference(to.to_dir()) >> 5
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        (self as u8) & 1 == 1
    }

    /// Cell step for this facing as `(dx, dy)`.
    #[inline]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Facing::N  => (0, -1),
            Facing::NE => (1, -1),
            Facing::E  => (1, 0),
            Facing::SE => (1, 1),
            Facing::S  => (0, 1),
            Facing::SW => (-1, 1),
            Facing::W  => (-1, 0),
            Facing::NW => (-1, -1),
        }
    }

    /// Inverse of [`delta`](Self::delta) for unit steps.
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Facing> {
        match (dx, dy) {
            (0, -1)  => Some(Facing::N),
            (1, -1)  => Some(Facing::NE),
            (1, 0)   => Some(Facing::E),
            (1, 1)   => Some(Facing::SE),
            (0, 1)   => Some(Facing::S),
            (-1, 1)  => Some(Facing::SW),
            (-1, 0)  => Some(Facing::W),
            (-1, -1) => Some(Facing::NW),
            _        => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::N  => "N",
            Facing::NE => "NE",
            Facing::E  => "E",
            Facing::SE => "SE",
            Facing::S  => "S",
            Facing::SW => "SW",
            Facing::W  => "W",
            Facing::NW => "NW",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── FacingTracker ─────────────────────────────────────────────────────────────

/// Current and desired heading of a rotating body.
///
/// The body is "rotating" whenever the two differ.  Rotation is advanced by
/// [`rotation_adjust`](Self::rotation_adjust) once per tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacingTracker {
    current: Dir,
    desired: Dir,
}

impl FacingTracker {
    pub fn new(dir: Dir) -> Self {
        Self { current: dir, desired: dir }
    }

    #[inline]
    pub fn current(&self) -> Dir {
        self.current
    }

    #[inline]
    pub fn desired(&self) -> Dir {
        self.desired
    }

    /// Snap both current and desired heading to `dir`.
    pub fn set(&mut self, dir: Dir) {
        self.current = dir;
        self.desired = dir;
    }

    /// Set only the current heading, leaving any pending rotation target.
    pub fn set_current(&mut self, dir: Dir) {
        self.current = dir;
    }

    /// Request a rotation toward `dir`.  Returns `true` if the target changed.
    pub fn set_desired(&mut self, dir: Dir) -> bool {
        let changed = self.desired != dir;
        self.desired = dir;
        changed
    }

    #[inline]
    pub fn is_rotating(&self) -> bool {
        self.current != self.desired
    }

    /// Signed rotation still to go.
    #[inline]
    pub fn difference(&self) -> i8 {
        self.current.difference(self.desired)
    }

    /// Signed rotation from the current heading to `dir`.
    #[inline]
    pub fn difference_to(&self, dir: Dir) -> i8 {
        self.current.difference(dir)
    }

    /// Step the current heading toward the desired one by at most `rate`
    /// (clamped to `1..=127`).  Returns `true` if the heading changed.
    pub fn rotation_adjust(&mut self, rate: u8) -> bool {
        if !self.is_rotating() {
            return false;
        }
        let rate = rate.clamp(1, 127) as i16;
        let diff = self.difference() as i16;
        if diff.abs() < rate {
            self.current = self.desired;
        } else {
            self.current = self.current.rotate(rate * diff.signum());
        }
        true
    }
}
