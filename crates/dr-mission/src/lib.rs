//! `dr-mission` — the narrow contracts between a moving object and the rest
//! of the game.
//!
//! The drive engine never sees a full object hierarchy.  It sees a handful of
//! capability traits, a mission enum it can override when an obstacle should
//! be attacked, and a radio it uses to negotiate docking with buildings.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`capability`] | `Positionable`, `Targetable`, `Missionable`               |
//! | [`mission`]    | `Mission` enum, `MissionControl` reference state          |
//! | [`radio`]      | `RadioMessage`, `Radio` trait                             |
//! | [`building`]   | `BuildingKind`, `Building`, `BuildingRegistry`            |
//! | [`error`]      | `MissionError`, `MissionResult<T>`                        |
//!
//! # Radio protocol
//!
//! | Sent         | Reply when accepted | Reply otherwise |
//! |--------------|---------------------|-----------------|
//! | `Hello`      | `Roger`             | `Negative`      |
//! | `Docking`    | `Roger`             | `Negative`      |
//! | `ImIn`       | `Roger`             | `Negative`      |
//! | `OverAndOut` | `Roger`             | `Static`        |
//!
//! A building talks to one unit at a time.  `Hello` opens the channel and
//! `OverAndOut` closes it.

pub mod building;
pub mod capability;
pub mod error;
pub mod mission;
pub mod radio;

#[cfg(test)]
mod tests;

pub use building::{Building, BuildingKind, BuildingRegistry};
pub use capability::{Missionable, Positionable, Targetable};
pub use error::{MissionError, MissionResult};
pub use mission::{Mission, MissionControl};
pub use radio::{Radio, RadioMessage};
