//! Path-search trait and default grid Dijkstra.
//!
//! # Pluggability
//!
//! The drive engine only needs a queue of facings.  It asks a [`PathFinder`]
//! for one whenever its own queue runs dry, passing a tolerance threshold:
//! every cell whose [`MoveType`] is at or below the threshold counts as
//! passable.  The engine escalates the threshold itself when a search fails.
//!
//! # Thread safety
//!
//! Implementations must be `Send + Sync` so one finder can be shared by
//! replica simulations running on separate worker threads.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use dr_core::{Cell, Facing};

use crate::{GridError, GridResult, GridService, MoveType, Mover};

// ── PathFinder trait ──────────────────────────────────────────────────────────

pub trait PathFinder: Send + Sync {
    /// Facings leading from `from` to `to`, first step first.
    ///
    /// `from == to` yields an empty path.  The result may be longer than the
    /// caller's buffer; callers keep the prefix they can hold.
    fn find_path(
        &self,
        grid: &dyn GridService,
        mover: &Mover,
        from: Cell,
        to: Cell,
        threshold: MoveType,
    ) -> GridResult<Vec<Facing>>;
}

// ── DijkstraPathFinder ────────────────────────────────────────────────────────

/// Uniform-cost search over the 8-connected cell graph.
///
/// | Step         | Cost |
/// |--------------|------|
/// | cardinal     | 10   |
/// | diagonal     | 14   |
/// | non-`Ok` cell| +20  |
///
/// The penalty keeps the search on clear ground when an equally short route
/// exists.  Expansion stops after `max_expansions` settled cells.
#[derive(Clone, Debug)]
pub struct DijkstraPathFinder {
    pub max_expansions: usize,
}

impl Default for DijkstraPathFinder {
    fn default() -> Self {
        Self { max_expansions: 4096 }
    }
}

const CARDINAL_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;
const CONTESTED_PENALTY: u32 = 20;

impl PathFinder for DijkstraPathFinder {
    fn find_path(
        &self,
        grid: &dyn GridService,
        mover: &Mover,
        from: Cell,
        to: Cell,
        threshold: MoveType,
    ) -> GridResult<Vec<Facing>> {
        if from == to {
            return Ok(Vec::new());
        }
        if !grid.in_bounds(to) {
            return Err(GridError::OutOfBounds(to));
        }

        // dist[c] = best known cost; prev[c] = facing that reached c.
        let mut dist: FxHashMap<Cell, u32> = FxHashMap::default();
        let mut prev: FxHashMap<Cell, Facing> = FxHashMap::default();
        dist.insert(from, 0);

        // Secondary key `Cell` makes tie-breaking deterministic.
        let mut heap: BinaryHeap<Reverse<(u32, Cell)>> = BinaryHeap::new();
        heap.push(Reverse((0, from)));
        let mut settled = 0usize;

        while let Some(Reverse((cost, cell))) = heap.pop() {
            if cell == to {
                return Ok(reconstruct(&prev, from, to));
            }
            if dist.get(&cell).is_some_and(|&d| cost > d) {
                continue;
            }
            settled += 1;
            if settled > self.max_expansions {
                break;
            }

            for facing in Facing::ALL {
                let next = cell.adjacent(facing);
                let verdict = grid.can_enter(mover, next, Some(facing));
                if verdict > threshold {
                    continue;
                }
                let step = if facing.is_diagonal() { DIAGONAL_COST } else { CARDINAL_COST };
                let penalty = if verdict.is_ok() { 0 } else { CONTESTED_PENALTY };
                let new_cost = cost.saturating_add(step + penalty);

                if dist.get(&next).is_none_or(|&d| new_cost < d) {
                    dist.insert(next, new_cost);
                    prev.insert(next, facing);
                    heap.push(Reverse((new_cost, next)));
                }
            }
        }

        Err(GridError::NoPath { from, to })
    }
}

fn reconstruct(prev: &FxHashMap<Cell, Facing>, from: Cell, to: Cell) -> Vec<Facing> {
    let mut steps = Vec::new();
    let mut cur = to;
    while cur != from {
        let Some(&f) = prev.get(&cur) else { break };
        steps.push(f);
        cur = cur.adjacent(f.opposite());
    }
    steps.reverse();
    steps
}
