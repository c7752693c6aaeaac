// Reachable free-space estimate
//
// Flood fill over Free tiles. The start tile is the snake's head in practice,
// so it is never counted even when the snapshot marks it Free.

use std::collections::VecDeque;

use crate::grid::{Grid, TileId};
use crate::snapshot::{SnapshotId, SnapshotSet};

#[derive(Debug, Clone)]
pub struct FreeSpace {
    explored: Vec<bool>,
    frontier: VecDeque<TileId>,
    explored_order: Vec<TileId>,
}

impl FreeSpace {
    pub fn new(tile_count: usize) -> Self {
        FreeSpace {
            explored: vec![false; tile_count],
            frontier: VecDeque::with_capacity(tile_count),
            explored_order: Vec::with_capacity(tile_count),
        }
    }

    /// Tiles counted by the last fill, in discovery order
    pub fn explored(&self) -> &[TileId] {
        &self.explored_order
    }

    /// Counts the Free tiles reachable from `start` on `snapshot`
    pub fn solve(
        &mut self,
        grid: &Grid,
        boards: &SnapshotSet,
        start: TileId,
        snapshot: SnapshotId,
    ) -> usize {
        self.explored.fill(false);
        self.frontier.clear();
        self.explored_order.clear();

        self.explored[start.0] = true;
        self.frontier.push_back(start);

        while let Some(tile) = self.frontier.pop_front() {
            for neighbor in boards.free_neighbors(grid, snapshot, tile) {
                if !self.explored[neighbor.0] {
                    self.explored[neighbor.0] = true;
                    self.explored_order.push(neighbor);
                    self.frontier.push_back(neighbor);
                }
            }
        }

        self.explored_order.len()
    }
}
