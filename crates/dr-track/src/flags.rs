//! Reflection flags applied to raw samples.

use bitflags::bitflags;

bitflags! {
    /// How a raw track is re-oriented for a particular transition.
    ///
    /// Applied in declaration order: transpose, then mirror-x, then mirror-y.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TrackFlags: u8 {
        /// Swap x and y; heading becomes `W - heading`.
        const TRANSPOSE = 0b0001;
        /// Negate x; heading becomes `-heading`.
        const MIRROR_X  = 0b0010;
        /// Negate y; heading becomes `S - heading`.
        const MIRROR_Y  = 0b0100;
        /// The track spans two cells and consumes two path steps.
        const DOUBLE    = 0b1000;
    }
}
