// Recursive lookahead over prioritized neighbors
//
// Depth-first over the scratch snapshots: ply N projects onto snapshot N. The
// first neighbor (in direction priority order) whose whole subtree stays safe
// for `lookahead_depth` plies wins; deeper plies only validate the first move,
// which is read back from snapshot 1 once the bottom is reached.

use log::{debug, warn};
use std::time::Instant;

use crate::autopilot::Autopilot;
use crate::grid::{Grid, TileId};
use crate::safety::Safety;
use crate::snapshot::{projected_snake, SnapshotId, SnapshotSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead {
    /// Safe first move
    Pass(TileId),
    Failed,
}

impl Autopilot {
    /// Searches for a first move that stays safe for every lookahead ply
    pub fn plan(
        &mut self,
        grid: &Grid,
        boards: &mut SnapshotSet,
        snake_length: usize,
        deadline: Option<Instant>,
    ) -> Lookahead {
        assert!(
            boards.snapshot_count() > self.settings.lookahead_depth,
            "not enough snapshots for {} plies",
            self.settings.lookahead_depth
        );
        let result = self.plan_from(grid, boards, SnapshotId::LIVE, snake_length, deadline);
        debug!("[Recursive Search] {:?}", result);
        result
    }

    fn plan_from(
        &mut self,
        grid: &Grid,
        boards: &mut SnapshotSet,
        ply: SnapshotId,
        snake_length: usize,
        deadline: Option<Instant>,
    ) -> Lookahead {
        if ply.0 == self.settings.lookahead_depth {
            // Zero plies never projected a first move
            if ply == SnapshotId::LIVE {
                return Lookahead::Failed;
            }
            return match boards.head(SnapshotId(1)) {
                Some(first_move) => Lookahead::Pass(first_move),
                None => Lookahead::Failed,
            };
        }

        if deadline.is_some_and(|d| Instant::now() >= d) {
            warn!("Lookahead budget exhausted at ply {}", ply.0);
            return Lookahead::Failed;
        }

        let head = boards.head(ply).expect("ply snapshot has no snake");
        let candidates: Vec<TileId> = boards.free_neighbors(grid, ply, head).collect();
        let next = ply.next();

        for tile in candidates {
            let projected = projected_snake(&[tile], boards.snake(ply), snake_length);
            boards.project(next, projected, snake_length);

            if self.check_safety(grid, boards, next, snake_length) != Safety::Safe {
                continue;
            }
            let result = self.plan_from(grid, boards, next, snake_length, deadline);
            if let Lookahead::Pass(first_move) = result {
                return Lookahead::Pass(first_move);
            }
        }

        Lookahead::Failed
    }
}
