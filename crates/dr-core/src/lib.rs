//! `dr-core` — foundational types for the `rust_drive` locomotion framework.
//!
//! This crate is a dependency of every other `dr-*` crate.  It intentionally
//! has no `dr-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `UnitId`, `HouseId`, `BuildingId`                     |
//! | [`coord`]       | `Coord` (leptons), `Cell`, adjacency, distance        |
//! | [`facing`]      | `Dir` (256-step), `Facing` (8-way), `FacingTracker`   |
//! | [`fixed`]       | `Fixed` 8.8 fixed-point multiplier                    |
//! | [`mph`]         | `Mph` speed ratings                                   |
//! | [`locomotor`]   | `Locomotor` enum                                      |
//! | [`target`]      | `Target` reference (cell, unit, building)             |
//! | [`rules`]       | `Difficulty`                                          |
//! | [`time`]        | `Tick`, `SimClock`, `Countdown`, `SimConfig`          |
//! | [`rng`]         | `UnitRng` per-unit scatter stream                     |
//! | [`error`]       | `DrError`, `DrResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |
//!
//! All arithmetic in this crate is integer.  Nothing here touches floating
//! point, so every peer in a lockstep session computes identical values.

pub mod coord;
pub mod error;
pub mod facing;
pub mod fixed;
pub mod ids;
pub mod locomotor;
pub mod mph;
pub mod rng;
pub mod rules;
pub mod target;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::{CELL_LEPTONS, Cell, Coord, HALF_CELL};
pub use error::{DrError, DrResult};
pub use facing::{Dir, Facing, FacingTracker};
pub use fixed::Fixed;
pub use ids::{BuildingId, HouseId, UnitId};
pub use locomotor::Locomotor;
pub use mph::Mph;
pub use rng::UnitRng;
pub use rules::Difficulty;
pub use target::Target;
pub use time::{Countdown, SimClock, SimConfig, Tick};
