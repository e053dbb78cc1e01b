//! Lepton coordinates and map cells.
//!
//! A cell is 256 leptons on a side.  `+x` is east and `+y` is south, so the
//! facing `N` moves toward negative `y`.  A coordinate is always absolute; the
//! track tables express offsets relative to a cell centre and are added to
//! `Cell::center()`.

use std::fmt;

use crate::Facing;

/// Leptons per cell edge.
pub const CELL_LEPTONS: i32 = 256;

/// Distance from a cell edge to its centre.
pub const HALF_CELL: i32 = CELL_LEPTONS / 2;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One map cell, addressed by column and row.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate of this cell's exact centre.
    #[inline]
    pub const fn center(self) -> Coord {
        Coord {
            x: self.x * CELL_LEPTONS + HALF_CELL,
            y: self.y * CELL_LEPTONS + HALF_CELL,
        }
    }

    /// The neighbouring cell one step toward `facing`.
    #[inline]
    pub fn adjacent(self, facing: Facing) -> Cell {
        let (dx, dy) = facing.delta();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// Lepton distance between the two cell centres.
    #[inline]
    pub fn distance(self, other: Cell) -> i32 {
        self.center().distance(other.center())
    }

    /// Chebyshev distance in whole cells.
    #[inline]
    pub fn cell_distance(self, other: Cell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

// ── Coord ─────────────────────────────────────────────────────────────────────

/// An absolute position in leptons.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing this coordinate.
    #[inline]
    pub const fn cell(self) -> Cell {
        Cell {
            x: self.x.div_euclid(CELL_LEPTONS),
            y: self.y.div_euclid(CELL_LEPTONS),
        }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Coord {
        Coord { x: self.x + dx, y: self.y + dy }
    }

    /// The same sub-cell position one cell over toward `facing`.
    #[inline]
    pub fn adjacent(self, facing: Facing) -> Coord {
        let (dx, dy) = facing.delta();
        self.offset(dx * CELL_LEPTONS, dy * CELL_LEPTONS)
    }

    /// `true` when this coordinate sits exactly on its cell's centre.
    #[inline]
    pub fn is_centered(self) -> bool {
        self == self.cell().center()
    }

    /// Approximate distance: the longer axis plus half the shorter one.
    ///
    /// Cheap and integer-only; overestimates a true diagonal by at most ~12%.
    pub fn distance(self, other: Coord) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        if dy > dx { dy + dx / 2 } else { dx + dy / 2 }
    }

    /// Coarse 8-way facing from `self` toward `other`.  `None` when equal.
    pub fn facing_to(self, other: Coord) -> Option<Facing> {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0 && dy == 0 {
            return None;
        }
        // Treat an axis as zero when it is under half of the other axis
        // (a 22.5°-ish cone around each cardinal direction).
        let sx = if dx.abs() * 2 < dy.abs() { 0 } else { dx.signum() };
        let sy = if dy.abs() * 2 < dx.abs() { 0 } else { dy.signum() };
        Facing::from_delta(sx, sy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
