//! Terrain classes and their speed cost.

use dr_core::{Fixed, Locomotor};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LandType {
    #[default]
    Clear,
    Road,
    Rough,
    Ore,
    Beach,
    Water,
    River,
    Rock,
    Wall,
}

/// Percent of full speed per locomotor, in `Locomotor::ALL` order
/// (foot, track, wheel, hover, float).
const COST: [[u16; 5]; 9] = [
    [90, 80, 60, 80, 0],    // Clear
    [100, 100, 100, 100, 0], // Road
    [80, 70, 40, 60, 0],    // Rough
    [90, 70, 50, 70, 0],    // Ore
    [80, 70, 40, 80, 0],    // Beach
    [0, 0, 0, 100, 100],    // Water
    [0, 0, 0, 0, 0],        // River
    [0, 0, 0, 0, 0],        // Rock
    [0, 0, 0, 0, 0],        // Wall
];

impl LandType {
    /// Speed multiplier for `locomotor`.  Zero means impassable.
    #[inline]
    pub fn cost(self, locomotor: Locomotor) -> Fixed {
        Fixed::from_percent(COST[self as usize][locomotor.index()])
    }

    #[inline]
    pub fn is_passable(self, locomotor: Locomotor) -> bool {
        !self.cost(locomotor).is_zero()
    }

    /// One-character map glyph, inverse of [`from_glyph`](Self::from_glyph).
    pub fn glyph(self) -> char {
        match self {
            LandType::Clear => '.',
            LandType::Road  => '=',
            LandType::Rough => '^',
            LandType::Ore   => '$',
            LandType::Beach => ',',
            LandType::Water => '~',
            LandType::River => '-',
            LandType::Rock  => '#',
            LandType::Wall  => 'W',
        }
    }

    pub fn from_glyph(c: char) -> Option<LandType> {
        Some(match c {
            '.' => LandType::Clear,
            '=' => LandType::Road,
            '^' => LandType::Rough,
            '$' => LandType::Ore,
            ',' => LandType::Beach,
            '~' => LandType::Water,
            '-' => LandType::River,
            '#' => LandType::Rock,
            'W' => LandType::Wall,
            _ => return None,
        })
    }
}
