//! `dr-track` — the static track table.
//!
//! Thirteen raw trajectories cover every legal cell-to-cell manoeuvre.  The
//! 67-entry transition matrix maps a `(current, next)` facing pair onto one
//! of them plus a set of reflections, so that e.g. a south-to-west turn is
//! the north-to-east data transposed and mirrored.
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`raw`]         | `TrackSample`, `RawTrack`                             |
//! | [`flags`]       | `TrackFlags` (transpose / mirror / double-cell)       |
//! | [`transition`]  | `TransitionId`, `TransitionEntry`                     |
//! | [`table`]       | `TrackTable` lookups and [`smooth_turn`]              |
//!
//! Everything here is immutable `'static` data; lookups never fail except
//! for out-of-range ids, which return `None`.

mod data;
pub mod flags;
pub mod raw;
pub mod table;
pub mod transition;


pub use flags::TrackFlags;
pub use raw::{RawTrack, TrackSample};
pub use table::{TrackTable, smooth_turn};
pub use transition::{TransitionEntry, TransitionId};
