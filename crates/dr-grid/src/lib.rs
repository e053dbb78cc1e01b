//! `dr-grid` — the map as seen by the drive engine.
//!
//! The engine never touches map storage directly.  It talks to a
//! [`GridService`], which answers "may this mover enter that cell?" with a
//! [`MoveType`] and keeps the per-cell reservation flags that stop two
//! vehicles from committing to the same cell.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`movetype`]  | `MoveType` entry verdicts, ordered by severity            |
//! | [`land`]      | `LandType`, per-locomotor speed cost                      |
//! | [`occupant`]  | `Occupant`, `OccupantKind`, `Overlay`, `Mover`            |
//! | [`service`]   | `GridService` trait                                       |
//! | [`tile`]      | `TileGrid` — dense reference implementation               |
//! | [`path`]      | `PathFinder` trait, `DijkstraPathFinder`                  |
//! | [`error`]     | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public value types.     |

pub mod error;
pub mod land;
pub mod movetype;
pub mod occupant;
pub mod path;
pub mod service;
pub mod tile;


pub use error::{GridError, GridResult};
pub use land::LandType;
pub use movetype::MoveType;
pub use occupant::{Mover, Occupant, OccupantKind, Overlay};
pub use path::{DijkstraPathFinder, PathFinder};
pub use service::GridService;
pub use tile::TileGrid;
