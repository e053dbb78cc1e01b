//! `TileGrid` — dense rectangular map implementing [`GridService`].

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use dr_core::{Cell, Facing, UnitId};

use crate::{GridError, GridResult, GridService, LandType, MoveType, Mover, Occupant, Overlay};

#[derive(Clone, Debug, Default)]
struct Tile {
    land:      LandType,
    overlay:   Overlay,
    occupants: Vec<Occupant>,
    reserved:  Option<UnitId>,
}

/// Row-major grid of tiles.
///
/// Cells outside `0..width × 0..height` read as `Rock` with no occupants.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width:    i32,
    height:   i32,
    tiles:    Vec<Tile>,
    /// Reservations per holder, in claim order.
    holdings: FxHashMap<UnitId, Vec<Cell>>,
    positions: FxHashMap<UnitId, Cell>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            tiles: vec![Tile::default(); (width * height) as usize],
            holdings: FxHashMap::default(),
            positions: FxHashMap::default(),
        }
    }

    /// A grid covered entirely by `land`.
    pub fn filled(width: i32, height: i32, land: LandType) -> Self {
        let mut grid = Self::new(width, height);
        for tile in &mut grid.tiles {
            tile.land = land;
        }
        grid
    }

    /// Parse a map from one glyph per cell, one row per line.
    ///
    /// Glyphs are those of [`LandType::glyph`].  Leading and trailing blank
    /// lines are ignored; all rows must have the same width.
    pub fn from_ascii(map: &str) -> GridResult<Self> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as i32;
        let mut grid = TileGrid::new(width, height);

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return Err(GridError::Parse {
                    row: y,
                    msg: format!("expected {width} cells, found {}", row.chars().count()),
                });
            }
            for (x, c) in row.chars().enumerate() {
                let land = LandType::from_glyph(c).ok_or_else(|| GridError::Parse {
                    row: y,
                    msg: format!("unknown glyph {c:?}"),
                })?;
                grid.set_land(Cell::new(x as i32, y as i32), land)?;
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set_land(&mut self, cell: Cell, land: LandType) -> GridResult<()> {
        let tile = self.tile_mut(cell).ok_or(GridError::OutOfBounds(cell))?;
        tile.land = land;
        Ok(())
    }

    /// Cells currently reserved by `unit`, in claim order.
    pub fn holdings(&self, unit: UnitId) -> &[Cell] {
        self.holdings.get(&unit).map_or(&[], Vec::as_slice)
    }

    /// Total number of reserved cells on the map.
    pub fn reserved_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.reserved.is_some()).count()
    }

    #[inline]
    fn index(&self, cell: Cell) -> Option<usize> {
        if self.in_bounds(cell) {
            Some((cell.y * self.width + cell.x) as usize)
        } else {
            None
        }
    }

    #[inline]
    fn tile(&self, cell: Cell) -> Option<&Tile> {
        self.index(cell).map(|i| &self.tiles[i])
    }

    #[inline]
    fn tile_mut(&mut self, cell: Cell) -> Option<&mut Tile> {
        self.index(cell).map(|i| &mut self.tiles[i])
    }

    fn terrain_blocks(&self, mover: &Mover, cell: Cell) -> bool {
        !self.in_bounds(cell) || !self.land_type(cell).is_passable(mover.locomotor)
    }
}

impl GridService for TileGrid {
    #[inline]
    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn land_type(&self, cell: Cell) -> LandType {
        self.tile(cell).map_or(LandType::Rock, |t| t.land)
    }

    fn overlay(&self, cell: Cell) -> Overlay {
        self.tile(cell).map_or(Overlay::None, |t| t.overlay)
    }

    fn set_overlay(&mut self, cell: Cell, overlay: Overlay) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.overlay = overlay;
        }
    }

    fn can_enter(&self, mover: &Mover, cell: Cell, facing: Option<Facing>) -> MoveType {
        let Some(tile) = self.tile(cell) else {
            return MoveType::No;
        };
        if !tile.land.is_passable(mover.locomotor) {
            return MoveType::No;
        }

        // No squeezing diagonally between two impassable corners.
        if let Some(f) = facing.filter(|f| f.is_diagonal()) {
            let back = cell.adjacent(f.opposite());
            if self.terrain_blocks(mover, back.adjacent(f.rotate(-1)))
                && self.terrain_blocks(mover, back.adjacent(f.rotate(1)))
            {
                return MoveType::No;
            }
        }

        let mut verdict = MoveType::Ok;
        if tile.overlay == Overlay::Wall {
            verdict = verdict.max(MoveType::Destroyable);
        }

        for occ in tile.occupants.iter().filter(|o| o.unit != mover.unit) {
            let v = if mover.is_ally(occ.house) {
                if self.is_moving(occ.unit) { MoveType::MovingBlock } else { MoveType::Temp }
            } else if occ.cloaked {
                MoveType::Cloak
            } else if occ.crushable && mover.crusher {
                MoveType::Ok
            } else {
                MoveType::Destroyable
            };
            verdict = verdict.max(v);
        }

        if tile.reserved.is_some_and(|u| u != mover.unit) {
            verdict = verdict.max(MoveType::MovingBlock);
        }
        verdict
    }

    fn reservation(&self, cell: Cell) -> Option<UnitId> {
        self.tile(cell).and_then(|t| t.reserved)
    }

    fn set_occupancy(&mut self, cell: Cell, unit: UnitId, reserve: bool) -> bool {
        let Some(tile) = self.tile_mut(cell) else {
            return false;
        };
        match (reserve, tile.reserved) {
            (true, Some(holder)) if holder != unit => {
                warn!(%cell, %unit, %holder, "reservation refused");
                false
            }
            (true, Some(_)) => true,
            (true, None) => {
                tile.reserved = Some(unit);
                self.holdings.entry(unit).or_default().push(cell);
                trace!(%cell, %unit, "reserve");
                true
            }
            (false, Some(holder)) if holder == unit => {
                tile.reserved = None;
                if let Some(held) = self.holdings.get_mut(&unit) {
                    held.retain(|&c| c != cell);
                    if held.is_empty() {
                        self.holdings.remove(&unit);
                    }
                }
                trace!(%cell, %unit, "release");
                true
            }
            (false, _) => false,
        }
    }

    fn release_all(&mut self, unit: UnitId) {
        let Some(held) = self.holdings.remove(&unit) else {
            return;
        };
        for cell in held {
            if let Some(tile) = self.tile_mut(cell) {
                tile.reserved = None;
            }
        }
    }

    #[inline]
    fn is_moving(&self, unit: UnitId) -> bool {
        self.holdings.contains_key(&unit)
    }

    fn occupants(&self, cell: Cell) -> &[Occupant] {
        self.tile(cell).map_or(&[], |t| t.occupants.as_slice())
    }

    fn place(&mut self, cell: Cell, occupant: Occupant) {
        if let Some(tile) = self.tile_mut(cell) {
            if !tile.occupants.iter().any(|o| o.unit == occupant.unit) {
                tile.occupants.push(occupant);
            }
            self.positions.insert(occupant.unit, cell);
        }
    }

    fn remove(&mut self, cell: Cell, unit: UnitId) {
        if let Some(tile) = self.tile_mut(cell) {
            tile.occupants.retain(|o| o.unit != unit);
            if self.positions.get(&unit) == Some(&cell) {
                self.positions.remove(&unit);
            }
        }
    }

    fn locate(&self, unit: UnitId) -> Option<Cell> {
        self.positions.get(&unit).copied()
    }
}
