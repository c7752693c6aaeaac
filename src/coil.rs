// Corner coil fallback
//
// Used only when neither the food path nor the lookahead can certify a move.
// Follows the direction priority (which coils toward the nearest corner) as
// long as the move keeps most of the best achievable free space. No safety
// guarantee: this can walk into a dead end.

use log::debug;

use crate::autopilot::Autopilot;
use crate::grid::{Grid, TileId};
use crate::snapshot::{projected_snake, SnapshotId, SnapshotSet};

/// Picks the first candidate, in the given order, whose space is at least
/// `ratio` of the best space. A best space of 0 accepts the first candidate.
pub fn select_by_space<T: Copy>(candidates: &[(T, usize)], ratio: f64) -> Option<T> {
    let max_space = candidates.iter().map(|&(_, space)| space).max()?;
    candidates
        .iter()
        .find(|&&(_, space)| max_space == 0 || space as f64 / max_space as f64 >= ratio)
        .map(|&(candidate, _)| candidate)
}

impl Autopilot {
    /// Best-guess move for the live snake, `None` when the head is boxed in
    pub fn choose_fallback(
        &mut self,
        grid: &Grid,
        boards: &mut SnapshotSet,
        snake_length: usize,
    ) -> Option<TileId> {
        let head = boards.head(SnapshotId::LIVE)?;
        let candidates: Vec<TileId> = boards.free_neighbors(grid, SnapshotId::LIVE, head).collect();
        let scratch = SnapshotId(1);

        let mut spaces = Vec::with_capacity(candidates.len());
        for tile in candidates {
            let projected = projected_snake(&[tile], boards.snake(SnapshotId::LIVE), snake_length);
            boards.project(scratch, projected, snake_length);
            let space = self.measure_free_space(grid, boards, tile, scratch);
            debug!("[Fallback] {:?} keeps {} free tiles", grid.coord(tile), space);
            spaces.push((tile, space));
        }

        select_by_space(&spaces, self.settings.coil_space_ratio)
    }
}
