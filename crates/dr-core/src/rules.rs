//! Game-rule knobs shared by several crates.

/// Skill level of the session.  Only affects courtesy behaviour such as
/// whether infantry get warned before a vehicle rolls over them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Whether infantry in a vehicle's path are told to scatter first.
    #[inline]
    pub fn warns_infantry(self) -> bool {
        !matches!(self, Difficulty::Hard)
    }
}
