//! Plain data row types written by output backends.

/// One unit's committed position and drive status at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSnapshotRow {
    pub tick:    u64,
    pub unit_id: u32,
    pub house:   u8,
    /// Committed coordinate in leptons, without the render offset.
    pub x:       i32,
    pub y:       i32,
    /// Current body heading, 0..=255.
    pub facing:  u8,
    pub status:  &'static str,
    /// Track number (transition id); `None` when not on a track.
    pub track:   Option<u8>,
    pub alive:   bool,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub moving:    u64,
    pub blocked:   u64,
    pub events:    u64,
    pub destroyed: u64,
}

/// A landmark reached by a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellEventRow {
    pub tick:    u64,
    pub unit_id: u32,
    pub kind:    &'static str,
    pub cell_x:  i32,
    pub cell_y:  i32,
}
