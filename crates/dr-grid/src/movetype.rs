//! Cell-entry verdicts.

/// Result of asking whether a mover may enter a cell.
///
/// Variants are ordered by severity.  A path search run at threshold `t`
/// treats every cell whose verdict is `<= t` as passable.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveType {
    /// Free to enter.
    #[default]
    Ok,
    /// A cloaked enemy is in the way.
    Cloak,
    /// A unit that is itself on the move holds the cell.
    MovingBlock,
    /// An enemy object or wall that can be attacked.
    Destroyable,
    /// A stationary friendly unit that could be asked to move.
    Temp,
    /// Impassable terrain or off the map.
    No,
}

impl MoveType {
    #[inline]
    pub fn is_ok(self) -> bool {
        self == MoveType::Ok
    }

    /// The next, more tolerant search threshold.  `None` past `No`.
    pub fn escalate(self) -> Option<MoveType> {
        match self {
            MoveType::Ok          => Some(MoveType::Cloak),
            MoveType::Cloak       => Some(MoveType::MovingBlock),
            MoveType::MovingBlock => Some(MoveType::Destroyable),
            MoveType::Destroyable => Some(MoveType::Temp),
            MoveType::Temp        => Some(MoveType::No),
            MoveType::No          => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoveType::Ok          => "ok",
            MoveType::Cloak       => "cloak",
            MoveType::MovingBlock => "moving_block",
            MoveType::Destroyable => "destroyable",
            MoveType::Temp        => "temp",
            MoveType::No          => "no",
        }
    }
}

impl std::fmt::Display for MoveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
