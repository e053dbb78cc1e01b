//! Radio messages between units and buildings.

use dr_core::{BuildingId, UnitId};

use crate::Building;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadioMessage {
    /// Open a channel.
    Hello,
    /// Request permission to dock.
    Docking,
    /// The unit has arrived on the dock cell.
    ImIn,
    /// Close the channel.
    OverAndOut,
    Roger,
    Negative,
    /// No reply.
    Static,
}

/// The docking collaborator consumed by the drive engine.
pub trait Radio {
    /// Send `message` from `from` to building `to` and return the reply.
    fn transmit(&mut self, from: UnitId, message: RadioMessage, to: BuildingId) -> RadioMessage;

    /// The building `unit` currently has an open channel with.
    fn contact_of(&self, unit: UnitId) -> Option<BuildingId>;

    fn building(&self, id: BuildingId) -> Option<&Building>;
}
