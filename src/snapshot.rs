// Board snapshot layer
//
// A fixed set of independent occupancy layers over the same grid. Layer 0 is the
// live board; the remaining layers are scratch boards the search rebuilds to
// simulate hypothetical futures. Tile state is stored flat, one row of
// `tile_count` entries per snapshot.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, TileId};

/// Occupancy of one tile on one snapshot
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Free,
    Snake,
    Wall,
}

/// Index of a snapshot layer
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(pub usize);

impl SnapshotId {
    pub const LIVE: SnapshotId = SnapshotId(0);

    pub fn next(self) -> SnapshotId {
        SnapshotId(self.0 + 1)
    }
}

/// Whether the tail leaves its tile on the snake's next step.
///
/// A snake that still has growth pending keeps its tail in place, and a
/// two-tile snake could only reach its tail by reversing.
pub fn tail_vacates(body_len: usize, snake_length: usize) -> bool {
    snake_length > 2 && body_len >= snake_length
}

/// Snake that has walked `path` from `current`, truncated to `length`.
///
/// `path` is in travel order (first step first), so it is laid down reversed
/// in front of the current body.
pub fn projected_snake(path: &[TileId], current: &[TileId], length: usize) -> Vec<TileId> {
    path.iter()
        .rev()
        .chain(current.iter())
        .take(length)
        .copied()
        .collect()
}

#[derive(Debug, Clone)]
pub struct SnapshotSet {
    tile_count: usize,
    cells: Vec<TileState>,
    snakes: Vec<Vec<TileId>>,
}

impl SnapshotSet {
    pub fn new(tile_count: usize, snapshot_count: usize) -> Self {
        assert!(snapshot_count >= 2, "need the live board and at least one scratch board");
        SnapshotSet {
            tile_count,
            cells: vec![TileState::Free; tile_count * snapshot_count],
            snakes: vec![Vec::new(); snapshot_count],
        }
    }

    pub fn snapshot_count(&self) -> usize {
        self.snakes.len()
    }

    /// Last layer, reserved for checking the position after a food path
    pub fn food_check(&self) -> SnapshotId {
        SnapshotId(self.snakes.len() - 1)
    }

    fn row(&self, snapshot: SnapshotId) -> std::ops::Range<usize> {
        let start = snapshot.0 * self.tile_count;
        start..start + self.tile_count
    }

    pub fn state(&self, snapshot: SnapshotId, tile: TileId) -> TileState {
        self.cells[snapshot.0 * self.tile_count + tile.0]
    }

    pub fn set_state(&mut self, snapshot: SnapshotId, tile: TileId, state: TileState) {
        self.cells[snapshot.0 * self.tile_count + tile.0] = state;
    }

    pub fn is_free(&self, snapshot: SnapshotId, tile: TileId) -> bool {
        self.state(snapshot, tile) == TileState::Free
    }

    /// Free neighbors of `tile` on `snapshot`, in priority order
    pub fn free_neighbors<'a>(
        &'a self,
        grid: &'a Grid,
        snapshot: SnapshotId,
        tile: TileId,
    ) -> impl Iterator<Item = TileId> + 'a {
        grid.neighbors(tile)
            .iter()
            .copied()
            .filter(move |&n| self.is_free(snapshot, n))
    }

    pub fn snake(&self, snapshot: SnapshotId) -> &[TileId] {
        &self.snakes[snapshot.0]
    }

    pub fn snake_mut(&mut self, snapshot: SnapshotId) -> &mut Vec<TileId> {
        &mut self.snakes[snapshot.0]
    }

    pub fn head(&self, snapshot: SnapshotId) -> Option<TileId> {
        self.snakes[snapshot.0].first().copied()
    }

    pub fn tail(&self, snapshot: SnapshotId) -> Option<TileId> {
        self.snakes[snapshot.0].last().copied()
    }

    /// Marks every tile Free and forgets the snapshot's snake
    pub fn clear(&mut self, snapshot: SnapshotId) {
        let row = self.row(snapshot);
        self.cells[row].fill(TileState::Free);
        self.snakes[snapshot.0].clear();
    }

    /// Clears the snapshot, then copies permanent walls from the live board
    pub fn derive_from_walls(&mut self, snapshot: SnapshotId) {
        debug_assert_ne!(snapshot, SnapshotId::LIVE, "deriving the live board from itself");
        self.clear(snapshot);
        for tile in 0..self.tile_count {
            if self.cells[tile] == TileState::Wall {
                self.cells[snapshot.0 * self.tile_count + tile] = TileState::Wall;
            }
        }
    }

    /// Rebuilds `snapshot` as the wall layout plus `snake`, applying the tail rule
    pub fn project(&mut self, snapshot: SnapshotId, snake: Vec<TileId>, snake_length: usize) {
        self.derive_from_walls(snapshot);
        for &tile in &snake {
            self.set_state(snapshot, tile, TileState::Snake);
        }
        self.snakes[snapshot.0] = snake;
        self.apply_tail_rule(snapshot, snake_length);
    }

    /// Frees the tail tile when it vacates next step, otherwise keeps it occupied
    pub fn apply_tail_rule(&mut self, snapshot: SnapshotId, snake_length: usize) {
        let body_len = self.snakes[snapshot.0].len();
        if let Some(tail) = self.tail(snapshot) {
            let state = if tail_vacates(body_len, snake_length) {
                TileState::Free
            } else {
                TileState::Snake
            };
            self.set_state(snapshot, tail, state);
        }
    }

    /// Number of tiles with the given state on a snapshot
    pub fn count(&self, snapshot: SnapshotId, state: TileState) -> usize {
        self.cells[self.row(snapshot)].iter().filter(|&&s| s == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn ids(grid: &Grid, coords: &[(i32, i32)]) -> Vec<TileId> {
        coords.iter().map(|&(x, y)| grid.tile(Coord::new(x, y))).collect()
    }

    #[test]
    fn test_snapshots_are_independent() {
        let grid = Grid::new(4, 4, 25);
        let mut boards = SnapshotSet::new(grid.tile_count(), 10);
        let tile = grid.tile(Coord::new(1, 1));

        boards.set_state(SnapshotId(3), tile, TileState::Snake);

        assert_eq!(boards.state(SnapshotId(3), tile), TileState::Snake);
        assert_eq!(boards.state(SnapshotId::LIVE, tile), TileState::Free);
        assert_eq!(boards.state(SnapshotId(4), tile), TileState::Free);
    }

    #[test]
    fn test_derive_copies_walls_only() {
        let grid = Grid::new(4, 4, 25);
        let mut boards = SnapshotSet::new(grid.tile_count(), 10);
        let wall = grid.tile(Coord::new(2, 2));
        let body = grid.tile(Coord::new(0, 0));
        boards.set_state(SnapshotId::LIVE, wall, TileState::Wall);
        boards.set_state(SnapshotId::LIVE, body, TileState::Snake);
        boards.set_state(SnapshotId(5), grid.tile(Coord::new(3, 3)), TileState::Snake);

        boards.derive_from_walls(SnapshotId(5));

        assert_eq!(boards.state(SnapshotId(5), wall), TileState::Wall);
        assert_eq!(boards.state(SnapshotId(5), body), TileState::Free);
        assert_eq!(boards.count(SnapshotId(5), TileState::Snake), 0);
    }

    #[test]
    fn test_project_frees_vacating_tail() {
        let grid = Grid::new(4, 4, 25);
        let mut boards = SnapshotSet::new(grid.tile_count(), 10);
        let snake = ids(&grid, &[(0, 0), (1, 0), (2, 0)]);

        boards.project(SnapshotId(1), snake.clone(), 3);

        assert_eq!(boards.state(SnapshotId(1), snake[0]), TileState::Snake);
        assert_eq!(boards.state(SnapshotId(1), snake[1]), TileState::Snake);
        assert_eq!(boards.state(SnapshotId(1), snake[2]), TileState::Free);
        assert_eq!(boards.snake(SnapshotId(1)), snake.as_slice());
    }

    #[test]
    fn test_project_keeps_tail_of_short_or_growing_snake() {
        let grid = Grid::new(4, 4, 25);
        let mut boards = SnapshotSet::new(grid.tile_count(), 10);

        let short = ids(&grid, &[(0, 0), (1, 0)]);
        boards.project(SnapshotId(1), short.clone(), 2);
        assert_eq!(boards.state(SnapshotId(1), short[1]), TileState::Snake);

        let growing = ids(&grid, &[(0, 0), (1, 0), (2, 0)]);
        boards.project(SnapshotId(2), growing.clone(), 4);
        assert_eq!(boards.state(SnapshotId(2), growing[2]), TileState::Snake);
    }

    #[test]
    fn test_project_overwrites_previous_state() {
        let grid = Grid::new(4, 4, 25);
        let mut boards = SnapshotSet::new(grid.tile_count(), 10);
        boards.project(SnapshotId(1), ids(&grid, &[(0, 3), (1, 3), (2, 3)]), 3);
        boards.project(SnapshotId(1), ids(&grid, &[(0, 0), (1, 0), (2, 0)]), 3);

        assert!(boards.is_free(SnapshotId(1), grid.tile(Coord::new(0, 3))));
        assert_eq!(boards.count(SnapshotId(1), TileState::Snake), 2);
    }

    #[test]
    fn test_projected_snake_lays_path_reversed() {
        let grid = Grid::new(8, 1, 25);
        let current = ids(&grid, &[(1, 0), (0, 0)]);
        let path = ids(&grid, &[(2, 0), (3, 0), (4, 0)]);

        let projected = projected_snake(&path, &current, 3);

        assert_eq!(projected, ids(&grid, &[(4, 0), (3, 0), (2, 0)]));
    }

    #[test]
    fn test_free_neighbors_skip_occupied() {
        let grid = Grid::new(3, 3, 25);
        let mut boards = SnapshotSet::new(grid.tile_count(), 10);
        let center = grid.tile(Coord::new(1, 1));
        boards.set_state(SnapshotId::LIVE, grid.tile(Coord::new(1, 2)), TileState::Wall);
        boards.set_state(SnapshotId::LIVE, grid.tile(Coord::new(0, 1)), TileState::Snake);

        let free: Vec<Coord> = boards
            .free_neighbors(&grid, SnapshotId::LIVE, center)
            .map(|t| grid.coord(t))
            .collect();

        assert_eq!(free.len(), 2);
        assert!(free.contains(&Coord::new(2, 1)));
        assert!(free.contains(&Coord::new(1, 0)));
    }
}
