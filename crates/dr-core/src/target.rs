//! Target references used for navigation and combat.

use std::fmt;

use crate::{BuildingId, Cell, UnitId};

/// What a unit is heading for (NavCom) or shooting at (TarCom).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    #[default]
    None,
    Cell(Cell),
    Unit(UnitId),
    Building(BuildingId),
}

impl Target {
    #[inline]
    pub fn is_none(self) -> bool {
        matches!(self, Target::None)
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    /// `true` for targets that move on their own.
    #[inline]
    pub fn is_mobile(self) -> bool {
        matches!(self, Target::Unit(_))
    }

    #[inline]
    pub fn as_cell(self) -> Option<Cell> {
        match self {
            Target::Cell(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Cell> for Target {
    fn from(cell: Cell) -> Self {
        Target::Cell(cell)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::None        => f.write_str("none"),
            Target::Cell(c)     => write!(f, "cell{c}"),
            Target::Unit(u)     => write!(f, "{u}"),
            Target::Building(b) => write!(f, "{b}"),
        }
    }
}
