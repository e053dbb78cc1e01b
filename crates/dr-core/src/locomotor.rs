//! Locomotion class of a unit.
//!
//! The class selects terrain costs and whether the body can pivot in place.
//! Wheeled units cannot: they turn through short pivot tracks instead.

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Locomotor {
    /// Infantry.
    Foot,
    /// Tracked vehicle.
    #[default]
    Track,
    /// Wheeled vehicle.
    Wheel,
    /// Hovercraft (land and water).
    Hover,
    /// Naval vessel.
    Float,
}

impl Locomotor {
    pub const ALL: [Locomotor; 5] = [
        Locomotor::Foot,
        Locomotor::Track,
        Locomotor::Wheel,
        Locomotor::Hover,
        Locomotor::Float,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `false` only for wheeled vehicles.
    #[inline]
    pub fn rotates_in_place(self) -> bool {
        !matches!(self, Locomotor::Wheel)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locomotor::Foot  => "foot",
            Locomotor::Track => "track",
            Locomotor::Wheel => "wheel",
            Locomotor::Hover => "hover",
            Locomotor::Float => "float",
        }
    }
}

impl std::fmt::Display for Locomotor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
