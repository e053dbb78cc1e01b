//! `dr-drive` — track-following locomotion for ground vehicles.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`path`]      | `PathBuffer` — bounded queue of upcoming facings                |
//! | [`state`]     | `DriveState`, `DriveStatus`, `TeleportReturn`                   |
//! | [`config`]    | `DriveConfig` — rule values shared by every driven object       |
//! | [`drivable`]  | `Drivable` contract, `DriveProfile`                             |
//! | [`world`]     | `DriveWorld`, cell events and their listener, `DriveEffect`     |
//! | [`engine`]    | `DriveEngine<P>`, `Driver` — tick orchestrator and destinations |
//! | `start`       | path acquisition, turning, track selection                      |
//! | `motion`      | speed accrual, sample stepping, mid-track jumps                 |
//! | `cells`       | presence, reservations, overrun, per-cell processing            |
//!
//! # Movement model
//!
//! An object moves by walking precomputed tracks: one per cell-to-cell
//! manoeuvre, selected from the current facing and the next queued one.
//! Each tick the throttle-scaled top speed is added to an accumulator and
//! every [`STEP`] leptons in it buys one track sample.  Reaching the end of a
//! track puts the object on its head-to cell centre and immediately selects
//! the next track, carrying any remainder over.
//!
//! Before committing to a track the object reserves its head-to cell (and,
//! on a two-cell track, the middle cell) through the grid.  A cell is
//! reserved by at most one object at a time.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on state and config types. |

mod cells;
pub mod config;
pub mod drivable;
pub mod engine;
mod motion;
pub mod path;
mod start;
pub mod state;
pub mod world;

#[cfg(test)]
mod tests;

pub use config::DriveConfig;
pub use drivable::{Drivable, DriveProfile};
pub use engine::{DriveEngine, Driver, STEP};
pub use path::PathBuffer;
pub use state::{DriveState, DriveStatus, TeleportReturn};
pub use world::{CellEvent, CellEventKind, CellEventListener, DriveEffect, DriveWorld, NoopListener};
