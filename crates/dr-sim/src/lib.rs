//! `dr-sim` — deterministic tick loop for the rust_drive framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Orders   — apply the commands queued for this tick.
//!   ② Drive    — DriveEngine::ai for each live unit, ascending UnitId.
//!   ③ Timers   — count down shimmer visibility.
//!
//! after every order and every unit step, settle:
//!   Retire     — lift destroyed units off the map, sign them off the radio.
//!   Effects    — Scatter  → Driver::scatter on the target unit
//!                Shimmer  → reveal cloaked units in the cell
//!                Crush    → destroy the victim
//!                (repeat until no effects remain, at most 8 rounds)
//! ```
//!
//! # Modules
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | [`unit`]     | `Unit`, `UnitSpec`                                   |
//! | [`world`]    | `World`, `MineField`                                 |
//! | [`command`]  | `Command`, `CommandQueue`                            |
//! | [`observer`] | `SimObserver`, `TickSummary`, `TrajectoryDigest`     |
//! | [`replica`]  | `verify_replicas`, `ReplicaReport`                   |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs replica verification on Rayon's thread pool.      |
//! | `serde`    | Derives `Serialize`/`Deserialize` on specs and orders. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dr_core::{Cell, Dir, HouseId, SimConfig, Target, Tick, UnitId};
//! use dr_drive::DriveProfile;
//! use dr_grid::TileGrid;
//! use dr_sim::{Command, NoopObserver, SimBuilder, UnitSpec};
//!
//! let mut sim = SimBuilder::new(SimConfig::default(), TileGrid::new(16, 16))
//!     .unit(UnitSpec::new(HouseId(0), DriveProfile::default(), Cell::new(2, 8), Dir::E))
//!     .build()?;
//! sim.command(Tick(0), Command::Move { unit: UnitId(0), target: Target::Cell(Cell::new(12, 8)) })?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod command;
pub mod error;
pub mod observer;
pub mod replica;
pub mod sim;
pub mod unit;
pub mod world;


pub use builder::SimBuilder;
pub use command::{Command, CommandQueue};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary, TrajectoryDigest};
pub use replica::{verify_replicas, ReplicaReport};
pub use sim::Sim;
pub use unit::{Unit, UnitSpec, SHIMMER_TICKS};
pub use world::{MineField, World};
