//! 8.8 fixed-point multiplier.
//!
//! Used for throttle, speed bias, and terrain cost.  `Fixed::ONE` is `256`.
//! Multiplying an integer by a `Fixed` truncates toward zero, exactly like
//! every peer would.

use std::fmt;
use std::ops::Mul;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixed(pub u16);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const HALF: Fixed = Fixed(128);
    pub const THREE_QUARTERS: Fixed = Fixed(192);
    pub const ONE: Fixed = Fixed(256);

    /// `percent / 100`, truncated to the nearest 1/256.
    #[inline]
    pub const fn from_percent(percent: u16) -> Fixed {
        Fixed(((percent as u32 * 256) / 100) as u16)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `value * self`, truncated.
    #[inline]
    pub const fn scale(self, value: i32) -> i32 {
        ((value as i64 * self.0 as i64) >> 8) as i32
    }

    /// Reduce by a quarter (damaged-unit penalty).
    #[inline]
    pub const fn three_quarters(self) -> Fixed {
        Fixed(self.0 - self.0 / 4)
    }
}

impl Default for Fixed {
    fn default() -> Self {
        Fixed::ONE
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as u32 * rhs.0 as u32) >> 8).min(u16::MAX as u32) as u16)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 >> 8;
        let frac = (self.0 & 0xFF) as u32 * 100 / 256;
        write!(f, "{whole}.{frac:02}")
    }
}
