//! Speed ratings.
//!
//! An `Mph` value is the number of leptons a unit would advance per tick at
//! full throttle with no bias applied.  `LIGHT_SPEED` is also the cap on any
//! biased speed.

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mph(pub u8);

impl Mph {
    pub const IMMOBILE:      Mph = Mph(0);
    pub const VERY_SLOW:     Mph = Mph(5);
    pub const KINDA_SLOW:    Mph = Mph(6);
    pub const SLOW:          Mph = Mph(8);
    pub const SLOW_ISH:      Mph = Mph(10);
    pub const MEDIUM_SLOW:   Mph = Mph(12);
    pub const MEDIUM:        Mph = Mph(18);
    pub const MEDIUM_FAST:   Mph = Mph(30);
    pub const MEDIUM_FASTER: Mph = Mph(35);
    pub const FAST:          Mph = Mph(40);
    pub const ROCKET:        Mph = Mph(60);
    pub const VERY_FAST:     Mph = Mph(100);
    pub const LIGHT_SPEED:   Mph = Mph(255);

    #[inline]
    pub const fn leptons(self) -> i32 {
        self.0 as i32
    }
}
