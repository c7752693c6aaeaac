// Shortest-path search over a single snapshot
//
// Every edge costs one step, so the frontier is a plain FIFO queue: tiles come
// off it in increasing distance, ties in discovery order. Combined with the
// grid's priority-ordered neighbor lists this makes every search deterministic.

use std::collections::VecDeque;

use crate::grid::{Grid, TileId};
use crate::snapshot::{SnapshotId, SnapshotSet};

const UNREACHED: u32 = u32::MAX;

/// Goal of a path search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Reach the food tile
    ToFood,
    /// Reach the snake's own tail; the tail tile is passable even if occupied
    ToTail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Found,
    NoPath,
}

/// Result of a path search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOutcome {
    pub status: PathStatus,
    /// Steps from the first move to the goal, start excluded
    pub path: Vec<TileId>,
}

impl PathOutcome {
    pub fn found(&self) -> bool {
        self.status == PathStatus::Found
    }

    fn no_path() -> Self {
        PathOutcome {
            status: PathStatus::NoPath,
            path: Vec::new(),
        }
    }
}

/// Reusable breadth-first path search.
///
/// Distances, predecessors and the explored set are scratch state owned by this
/// instance and reset at the start of every `solve`.
#[derive(Debug, Clone)]
pub struct Pathfinder {
    dist: Vec<u32>,
    prev: Vec<Option<TileId>>,
    explored: Vec<bool>,
    frontier: VecDeque<TileId>,
    explored_order: Vec<TileId>,
}

impl Pathfinder {
    pub fn new(tile_count: usize) -> Self {
        Pathfinder {
            dist: vec![UNREACHED; tile_count],
            prev: vec![None; tile_count],
            explored: vec![false; tile_count],
            frontier: VecDeque::with_capacity(tile_count),
            explored_order: Vec::with_capacity(tile_count),
        }
    }

    fn reset(&mut self) {
        self.dist.fill(UNREACHED);
        self.prev.fill(None);
        self.explored.fill(false);
        self.frontier.clear();
        self.explored_order.clear();
    }

    /// Tiles added to the explored set by the last search, in discovery order
    pub fn explored(&self) -> &[TileId] {
        &self.explored_order
    }

    /// Searches for the shortest path from `start` to `end` on `snapshot`
    pub fn solve(
        &mut self,
        grid: &Grid,
        boards: &SnapshotSet,
        start: TileId,
        end: TileId,
        snapshot: SnapshotId,
        mode: PathMode,
    ) -> PathOutcome {
        assert_ne!(start, end, "path search from a tile to itself");
        self.reset();

        self.dist[start.0] = 0;
        self.explored[start.0] = true;
        self.frontier.push_back(start);

        while let Some(tile) = self.frontier.pop_front() {
            if tile == end {
                return PathOutcome {
                    status: PathStatus::Found,
                    path: self.trace_back(start, end),
                };
            }

            let next_dist = self.dist[tile.0] + 1;
            for &neighbor in grid.neighbors(tile) {
                let passable = boards.is_free(snapshot, neighbor)
                    || (mode == PathMode::ToTail && neighbor == end);
                if !passable || self.explored[neighbor.0] {
                    continue;
                }
                self.explored[neighbor.0] = true;
                self.explored_order.push(neighbor);
                if self.dist[neighbor.0] > next_dist {
                    self.dist[neighbor.0] = next_dist;
                    self.prev[neighbor.0] = Some(tile);
                }
                self.frontier.push_back(neighbor);
            }
        }

        PathOutcome::no_path()
    }

    /// Follows predecessors from `end` back to `start`, first step first
    fn trace_back(&self, start: TileId, end: TileId) -> Vec<TileId> {
        let mut path = Vec::with_capacity(self.dist[end.0] as usize);
        let mut tile = end;
        while tile != start {
            path.push(tile);
            tile = self.prev[tile.0].expect("explored tile without predecessor");
        }
        path.reverse();
        path
    }
}
