// Grid model: fixed tiles, quadrants and priority-ordered neighbor lists
//
// Everything here is computed once when the grid is built and never changes.
// Search code refers to tiles by `TileId`, an index into the grid's tile table.

use serde::{Deserialize, Serialize};

use crate::types::{Coord, Direction, Quadrant};

/// Index of a tile inside its grid
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

/// Static per-tile data
#[derive(Debug, Clone)]
pub struct Tile {
    pub coord: Coord,
    pub quadrant: Quadrant,
    pub priority: [Direction; 4],
    neighbors: Vec<TileId>,
}

/// Square (or rectangular) board of tiles
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cell_size: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Builds a grid of `width` x `height` cells
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one tile");

        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let quadrant = Self::quadrant_for(x, y, width, height);
                tiles.push(Tile {
                    coord: Coord { x, y },
                    quadrant,
                    priority: quadrant.direction_priority(),
                    neighbors: Vec::with_capacity(4),
                });
            }
        }

        let mut grid = Grid {
            width,
            height,
            cell_size,
            tiles,
        };

        for index in 0..grid.tiles.len() {
            let coord = grid.tiles[index].coord;
            let neighbors: Vec<TileId> = grid.tiles[index]
                .priority
                .iter()
                .filter_map(|dir| grid.tile_at(dir.apply(&coord)))
                .collect();
            grid.tiles[index].neighbors = neighbors;
        }

        grid
    }

    /// Builds the grid that covers a canvas of the given size
    pub fn from_canvas(canvas_width: i32, canvas_height: i32, cell_size: i32) -> Self {
        assert!(cell_size > 0, "cell size must be positive");
        Self::new(canvas_width / cell_size, canvas_height / cell_size, cell_size)
    }

    /// A cell is on the right (top) half when its center is at or past the midline
    fn quadrant_for(x: i32, y: i32, width: i32, height: i32) -> Quadrant {
        let right = 2 * x + 1 >= width;
        let top = 2 * y + 1 >= height;
        match (right, top) {
            (true, true) => Quadrant::TopRight,
            (false, true) => Quadrant::TopLeft,
            (false, false) => Quadrant::BottomLeft,
            (true, false) => Quadrant::BottomRight,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> {
        (0..self.tiles.len()).map(TileId)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Looks up the tile at a coordinate, `None` when off the board
    pub fn tile_at(&self, coord: Coord) -> Option<TileId> {
        if self.contains(coord) {
            Some(TileId((coord.y * self.width + coord.x) as usize))
        } else {
            None
        }
    }

    /// Looks up the tile at a coordinate that must be on the board
    pub fn tile(&self, coord: Coord) -> TileId {
        self.tile_at(coord).unwrap_or_else(|| {
            panic!("coordinate {:?} is outside the {}x{} grid", coord, self.width, self.height)
        })
    }

    pub fn get(&self, id: TileId) -> &Tile {
        &self.tiles[id.0]
    }

    pub fn coord(&self, id: TileId) -> Coord {
        self.tiles[id.0].coord
    }

    pub fn quadrant(&self, id: TileId) -> Quadrant {
        self.tiles[id.0].quadrant
    }

    pub fn priority(&self, id: TileId) -> [Direction; 4] {
        self.tiles[id.0].priority
    }

    /// Orthogonal neighbors in the tile's direction priority order
    pub fn neighbors(&self, id: TileId) -> &[TileId] {
        &self.tiles[id.0].neighbors
    }

    /// Canvas position of a cell center, y measured upward from the bottom edge
    pub fn pixel_center(&self, id: TileId) -> (i32, i32) {
        let coord = self.coord(id);
        let half = self.cell_size / 2;
        (coord.x * self.cell_size + half, coord.y * self.cell_size + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_canvas_has_256_tiles() {
        let grid = Grid::from_canvas(400, 400, 25);
        assert_eq!(grid.width(), 16);
        assert_eq!(grid.height(), 16);
        assert_eq!(grid.tile_count(), 256);
    }

    #[test]
    fn test_neighbors_are_adjacent_and_exclude_self() {
        for (width, height) in [(1, 1), (1, 5), (2, 2), (3, 7), (5, 5), (16, 16), (9, 4)] {
            let grid = Grid::new(width, height, 25);
            for id in grid.tile_ids() {
                let coord = grid.coord(id);
                for &neighbor in grid.neighbors(id) {
                    assert_ne!(neighbor, id, "tile listed as its own neighbor");
                    assert!(
                        coord.is_adjacent(&grid.coord(neighbor)),
                        "{:?} is not adjacent to {:?} on {}x{}",
                        grid.coord(neighbor),
                        coord,
                        width,
                        height
                    );
                }
            }
        }
    }

    #[test]
    fn test_edge_tiles_have_fewer_neighbors() {
        let grid = Grid::new(16, 16, 25);
        assert_eq!(grid.neighbors(grid.tile(Coord::new(0, 0))).len(), 2);
        assert_eq!(grid.neighbors(grid.tile(Coord::new(0, 7))).len(), 3);
        assert_eq!(grid.neighbors(grid.tile(Coord::new(7, 7))).len(), 4);
    }

    #[test]
    fn test_quadrants_split_at_midlines() {
        let grid = Grid::new(16, 16, 25);
        assert_eq!(grid.quadrant(grid.tile(Coord::new(8, 8))), Quadrant::TopRight);
        assert_eq!(grid.quadrant(grid.tile(Coord::new(7, 8))), Quadrant::TopLeft);
        assert_eq!(grid.quadrant(grid.tile(Coord::new(7, 7))), Quadrant::BottomLeft);
        assert_eq!(grid.quadrant(grid.tile(Coord::new(8, 7))), Quadrant::BottomRight);
        assert_eq!(grid.quadrant(grid.tile(Coord::new(15, 0))), Quadrant::BottomRight);
    }

    #[test]
    fn test_neighbors_follow_direction_priority() {
        let grid = Grid::new(16, 16, 25);
        let id = grid.tile(Coord::new(12, 12));
        let coords: Vec<Coord> = grid.neighbors(id).iter().map(|&n| grid.coord(n)).collect();
        // Top right quadrant: up, right, left, down
        assert_eq!(
            coords,
            vec![
                Coord::new(12, 13),
                Coord::new(13, 12),
                Coord::new(11, 12),
                Coord::new(12, 11),
            ]
        );
    }

    #[test]
    fn test_tile_at_rejects_off_grid() {
        let grid = Grid::new(4, 4, 25);
        assert_eq!(grid.tile_at(Coord::new(-1, 0)), None);
        assert_eq!(grid.tile_at(Coord::new(0, 4)), None);
        assert_eq!(grid.coord(grid.tile(Coord::new(3, 2))), Coord::new(3, 2));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_tile_panics_off_grid() {
        let grid = Grid::new(4, 4, 25);
        grid.tile(Coord::new(4, 0));
    }

    #[test]
    fn test_pixel_center() {
        let grid = Grid::from_canvas(400, 400, 25);
        assert_eq!(grid.pixel_center(grid.tile(Coord::new(0, 0))), (12, 12));
        assert_eq!(grid.pixel_center(grid.tile(Coord::new(2, 1))), (62, 37));
    }
}
