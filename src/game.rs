// Live game state
//
// Owns the grid, the snapshot stack and the live snake, and drives one
// autopilot decision per tick. Food, growth, walls and terminal detection all
// act on snapshot 0 only; every other snapshot is scratch for the search.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::autopilot::{Autopilot, Decision};
use crate::config::Config;
use crate::grid::{Grid, TileId};
use crate::snapshot::{SnapshotId, SnapshotSet, TileState};
use crate::types::{Coord, GameStatus, MoveMethod};

/// Outcome of a single tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    /// Committed move, `None` when the game was already over or the head is boxed in
    pub decision: Option<Decision>,
    /// Food on the board when the move was chosen
    pub food: Option<Coord>,
    pub ate_food: bool,
    pub status: GameStatus,
}

/// Per-game counters
#[derive(Deserialize, Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameStats {
    pub ticks: u64,
    pub food_eaten: u64,
    pub food_path: u64,
    pub recursive_coil: u64,
    pub fallback_coil: u64,
}

impl GameStats {
    fn record(&mut self, method: MoveMethod) {
        self.ticks += 1;
        match method {
            MoveMethod::FoodPath => self.food_path += 1,
            MoveMethod::RecursiveCoil => self.recursive_coil += 1,
            MoveMethod::FallbackCoil => self.fallback_coil += 1,
        }
    }

    pub fn count(&self, method: MoveMethod) -> u64 {
        match method {
            MoveMethod::FoodPath => self.food_path,
            MoveMethod::RecursiveCoil => self.recursive_coil,
            MoveMethod::FallbackCoil => self.fallback_coil,
        }
    }
}

pub struct Game {
    config: Config,
    grid: Grid,
    boards: SnapshotSet,
    autopilot: Autopilot,
    snake_length: usize,
    food: Option<TileId>,
    rng: StdRng,
    tick: u64,
    status: GameStatus,
    stats: GameStats,
}

impl Game {
    /// New game seeded from `game.seed`, or from the OS when no seed is configured
    pub fn new(config: Config) -> Self {
        let rng = match config.game.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::build(config, rng)
    }

    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: Config, rng: StdRng) -> Self {
        let mut game = Self::empty(config, rng);
        game.reset();
        game
    }

    fn empty(config: Config, rng: StdRng) -> Self {
        let grid = config.board.build_grid();
        let boards = SnapshotSet::new(grid.tile_count(), config.search.snapshot_count());
        let autopilot = Autopilot::new(
            config.search.clone(),
            grid.tile_count(),
            config.debug.record_searches,
        );
        Game {
            snake_length: config.game.initial_length,
            config,
            grid,
            boards,
            autopilot,
            food: None,
            rng,
            tick: 0,
            status: GameStatus::Running,
            stats: GameStats::default(),
        }
    }

    /// Game with a scripted snake (head first) and optional food.
    ///
    /// Without `food` a random food tile is spawned. Panics when the snake is
    /// shorter than 2 tiles, leaves the grid, overlaps itself or is not
    /// orthogonally connected.
    pub fn with_snake(config: Config, coords: &[Coord], food: Option<Coord>) -> Self {
        let rng = StdRng::seed_from_u64(config.game.seed.unwrap_or(0));
        let mut game = Self::empty(config, rng);

        assert!(coords.len() >= 2, "snake needs at least 2 tiles, got {}", coords.len());
        for pair in coords.windows(2) {
            assert!(
                pair[0].is_adjacent(&pair[1]),
                "snake tiles {:?} and {:?} are not adjacent",
                pair[0],
                pair[1]
            );
        }

        let mut snake = Vec::with_capacity(coords.len());
        for &coord in coords {
            let tile = game.grid.tile(coord);
            assert!(!snake.contains(&tile), "snake overlaps itself at {:?}", coord);
            snake.push(tile);
        }

        game.snake_length = snake.len();
        game.place_snake(snake);
        game.food = match food {
            Some(coord) => {
                let tile = game.grid.tile(coord);
                assert!(
                    !game.boards.snake(SnapshotId::LIVE).contains(&tile),
                    "food {:?} is on the snake",
                    coord
                );
                Some(tile)
            }
            None => game.spawn_food(),
        };
        game.status = game.evaluate_status();
        game
    }

    /// Clears every snapshot and starts over with a fresh length-2 snake
    pub fn reset(&mut self) {
        for index in 0..self.boards.snapshot_count() {
            self.boards.clear(SnapshotId(index));
        }
        self.snake_length = self.config.game.initial_length;
        self.tick = 0;
        self.stats = GameStats::default();

        let start = TileId(self.rng.random_range(0..self.grid.tile_count()));
        let mut snake = vec![start];
        if let Some(&neighbor) = self.grid.neighbors(start).choose(&mut self.rng) {
            snake.push(neighbor);
        }
        self.place_snake(snake);
        self.food = self.spawn_food();
        self.status = self.evaluate_status();

        info!(
            "New game: head {:?}, food {:?}, length {}",
            self.head(),
            self.food(),
            self.snake_length
        );
    }

    fn place_snake(&mut self, snake: Vec<TileId>) {
        for &tile in &snake {
            self.boards.set_state(SnapshotId::LIVE, tile, TileState::Snake);
        }
        *self.boards.snake_mut(SnapshotId::LIVE) = snake;
        self.boards.apply_tail_rule(SnapshotId::LIVE, self.snake_length);
    }

    /// Random Free tile outside the live snake, `None` when the board is full
    fn spawn_food(&mut self) -> Option<TileId> {
        let snake = self.boards.snake(SnapshotId::LIVE);
        let candidates: Vec<TileId> = self
            .grid
            .tile_ids()
            .filter(|&tile| self.boards.is_free(SnapshotId::LIVE, tile) && !snake.contains(&tile))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    /// Advances the game by one decision
    pub fn tick(&mut self) -> TickReport {
        let food = self.food();
        if self.status.is_terminal() {
            return TickReport {
                tick: self.tick,
                decision: None,
                food,
                ate_food: false,
                status: self.status,
            };
        }

        self.tick += 1;
        let Some(decision) = self
            .autopilot
            .decide(&self.grid, &mut self.boards, self.food, self.snake_length)
        else {
            warn!("Tick {}: head is boxed in", self.tick);
            self.status = GameStatus::GameOver;
            return TickReport {
                tick: self.tick,
                decision: None,
                food,
                ate_food: false,
                status: self.status,
            };
        };

        let ate_food = self.apply_move(decision.tile);
        self.stats.record(decision.method);
        self.status = self.evaluate_status();

        debug!(
            "Tick {}: {} -> {:?} via {}, length {}",
            self.tick,
            decision.direction.as_str(),
            decision.next,
            decision.method.as_str(),
            self.snake_length
        );
        match self.status {
            GameStatus::Win => info!("Board filled after {} ticks", self.tick),
            GameStatus::GameOver => {
                info!("Game over after {} ticks at length {}", self.tick, self.snake_length)
            }
            GameStatus::Running => {}
        }

        TickReport {
            tick: self.tick,
            decision: Some(decision),
            food,
            ate_food,
            status: self.status,
        }
    }

    /// Moves the live head onto `tile`, returns whether food was eaten
    fn apply_move(&mut self, tile: TileId) -> bool {
        let live = SnapshotId::LIVE;

        // Trim before placing the head so a head entering the old tail tile stays occupied
        if self.boards.snake(live).len() >= self.snake_length {
            if let Some(old_tail) = self.boards.snake_mut(live).pop() {
                self.boards.set_state(live, old_tail, TileState::Free);
            }
        }
        self.boards.snake_mut(live).insert(0, tile);
        self.boards.set_state(live, tile, TileState::Snake);

        let ate_food = self.food == Some(tile);
        if ate_food {
            self.snake_length += 1;
            self.stats.food_eaten += 1;
        }
        self.boards.apply_tail_rule(live, self.snake_length);
        if ate_food {
            self.food = self.spawn_food();
        }
        ate_food
    }

    fn evaluate_status(&self) -> GameStatus {
        if self.boards.snake(SnapshotId::LIVE).len() >= self.playable_tiles() {
            return GameStatus::Win;
        }
        let live = SnapshotId::LIVE;
        match self.boards.head(live) {
            Some(head) if self.boards.free_neighbors(&self.grid, live, head).next().is_some() => {
                GameStatus::Running
            }
            _ => GameStatus::GameOver,
        }
    }

    /// Grows the snake by `game.skip_ahead_growth` tiles at once
    pub fn skip_ahead(&mut self) {
        self.snake_length += self.config.game.skip_ahead_growth;
        self.boards.apply_tail_rule(SnapshotId::LIVE, self.snake_length);
        info!("Skipped ahead to length {}", self.snake_length);
    }

    /// Turns a Free tile into a permanent wall
    pub fn place_wall(&mut self, coord: Coord) -> Result<(), String> {
        let tile = self
            .grid
            .tile_at(coord)
            .ok_or_else(|| format!("{:?} is outside the grid", coord))?;
        if self.boards.snake(SnapshotId::LIVE).contains(&tile) {
            return Err(format!("{:?} is occupied by the snake", coord));
        }
        if self.food == Some(tile) {
            return Err(format!("{:?} holds the food", coord));
        }
        if !self.boards.is_free(SnapshotId::LIVE, tile) {
            return Err(format!("{:?} is already a wall", coord));
        }

        self.boards.set_state(SnapshotId::LIVE, tile, TileState::Wall);
        if !self.status.is_terminal() {
            self.status = self.evaluate_status();
        }
        debug!("Wall placed at {:?}", coord);
        Ok(())
    }

    /// Ticks until the game ends or `max_ticks` ticks have been played in total
    pub fn run_to_completion(&mut self, max_ticks: u64) -> GameStatus {
        while !self.status.is_terminal() && self.tick < max_ticks {
            self.tick();
        }
        self.status
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    /// Target length, which the body catches up to while growing
    pub fn snake_length(&self) -> usize {
        self.snake_length
    }

    /// Live snake, head first
    pub fn snake(&self) -> Vec<Coord> {
        self.boards
            .snake(SnapshotId::LIVE)
            .iter()
            .map(|&tile| self.grid.coord(tile))
            .collect()
    }

    pub fn head(&self) -> Option<Coord> {
        self.boards.head(SnapshotId::LIVE).map(|tile| self.grid.coord(tile))
    }

    pub fn food(&self) -> Option<Coord> {
        self.food.map(|tile| self.grid.coord(tile))
    }

    /// Live occupancy of a coordinate, `None` off the grid
    pub fn tile_state(&self, coord: Coord) -> Option<TileState> {
        self.grid
            .tile_at(coord)
            .map(|tile| self.boards.state(SnapshotId::LIVE, tile))
    }

    /// Tiles the snake can ever occupy
    pub fn playable_tiles(&self) -> usize {
        self.grid.tile_count() - self.boards.count(SnapshotId::LIVE, TileState::Wall)
    }
}
