// Shared value types for the autopilot
// Coordinates, directions and the outcome enums passed between the search stages

use serde::{Deserialize, Serialize};

/// 2D coordinate on the board, y grows upward
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// True when the two coordinates share an edge
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan(other) == 1
    }
}

/// Represents the four possible movement directions for the snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to its lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }

    /// Direction of a single step between two adjacent coordinates
    pub fn between(from: &Coord, to: &Coord) -> Option<Direction> {
        Direction::all().into_iter().find(|dir| dir.apply(from) == *to)
    }
}

/// Board quadrant, decides which corner a tile coils toward
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Direction priority biased toward the quadrant's nearest corner
    pub fn direction_priority(&self) -> [Direction; 4] {
        use Direction::*;
        match self {
            Quadrant::TopRight => [Up, Right, Left, Down],
            Quadrant::TopLeft => [Up, Left, Right, Down],
            Quadrant::BottomLeft => [Down, Left, Right, Up],
            Quadrant::BottomRight => [Down, Right, Left, Up],
        }
    }
}

/// Which strategy produced the committed move
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveMethod {
    /// First step of a food path whose end position was checked safe
    FoodPath,
    /// Neighbor certified safe by the recursive lookahead
    RecursiveCoil,
    /// Best-guess corner coil with no safety guarantee
    FallbackCoil,
}

impl MoveMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveMethod::FoodPath => "food_path",
            MoveMethod::RecursiveCoil => "recursive_coil",
            MoveMethod::FallbackCoil => "fallback_coil",
        }
    }
}

/// Life cycle state of the live game
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Win,
    GameOver,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_matches_apply() {
        let origin = Coord::new(4, 4);
        for dir in Direction::all() {
            let next = dir.apply(&origin);
            assert_eq!(Direction::between(&origin, &next), Some(dir));
        }
        assert_eq!(Direction::between(&origin, &Coord::new(6, 4)), None);
    }

    #[test]
    fn test_priority_lists_are_permutations() {
        for quadrant in [
            Quadrant::TopRight,
            Quadrant::TopLeft,
            Quadrant::BottomLeft,
            Quadrant::BottomRight,
        ] {
            let priority = quadrant.direction_priority();
            for dir in Direction::all() {
                assert_eq!(
                    priority.iter().filter(|&&d| d == dir).count(),
                    1,
                    "{:?} must list {:?} exactly once",
                    quadrant,
                    dir
                );
            }
        }
    }

    #[test]
    fn test_direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"left\"");
    }
}
