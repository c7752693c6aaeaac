// Per-tick decision engine
//
// Runs the decision state machine once per tick:
// 1. Path to food on the live board
// 2. If found, check the position after eating (food check snapshot)
// 3. Safe -> take the first step of the food path
// 4. Otherwise recursive lookahead over the prioritized neighbors
// 5. Lookahead failed -> corner coil that keeps most of the free space
//
// The safety evaluator, lookahead and fallback live in their own modules as
// further `impl Autopilot` blocks; this file holds the shared scratch state and
// the search wrappers that feed the optional decision trace.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::config::SearchConfig;
use crate::free_space::FreeSpace;
use crate::grid::{Grid, TileId};
use crate::lookahead::Lookahead;
use crate::pathfind::{PathMode, PathOutcome, Pathfinder};
use crate::safety::Safety;
use crate::snapshot::{projected_snake, SnapshotId, SnapshotSet};
use crate::types::{Coord, Direction, MoveMethod};

/// Which search produced a trace record
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    FoodPath,
    TailPath,
    FreeSpace,
}

/// Tiles one search explored, for a visualizer to draw
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SearchRecord {
    pub kind: SearchKind,
    pub snapshot: usize,
    pub start: Coord,
    pub explored: Vec<Coord>,
}

/// The move committed for one tick
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Decision {
    #[serde(skip)]
    pub tile: TileId,
    pub next: Coord,
    pub direction: Direction,
    pub method: MoveMethod,
    /// Full path to the food when the food path was taken
    pub food_path: Vec<Coord>,
    /// Explored sets of every search this tick, when recording is enabled
    pub searches: Vec<SearchRecord>,
}

/// Search scratch state and tuning shared by all decision stages
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub(crate) settings: SearchConfig,
    pathfinder: Pathfinder,
    free_space: FreeSpace,
    record_searches: bool,
    recorder: Option<Vec<SearchRecord>>,
}

impl Autopilot {
    pub fn new(settings: SearchConfig, tile_count: usize, record_searches: bool) -> Self {
        Autopilot {
            settings,
            pathfinder: Pathfinder::new(tile_count),
            free_space: FreeSpace::new(tile_count),
            record_searches,
            recorder: None,
        }
    }

    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    /// Chooses the next head tile for the live snake.
    ///
    /// Returns `None` only when the live head has no Free neighbor.
    pub fn decide(
        &mut self,
        grid: &Grid,
        boards: &mut SnapshotSet,
        food: Option<TileId>,
        snake_length: usize,
    ) -> Option<Decision> {
        let head = boards
            .head(SnapshotId::LIVE)
            .expect("live board has no snake");
        self.recorder = if self.record_searches { Some(Vec::new()) } else { None };

        if let Some(food) = food {
            let live = SnapshotId::LIVE;
            let outcome = self.find_path(grid, boards, head, food, live, PathMode::ToFood);
            if outcome.found() {
                // Eating raises the target length, so the tail stays put for one more step
                let check = boards.food_check();
                let grown_length = snake_length + 1;
                let projected = projected_snake(&outcome.path, boards.snake(live), snake_length);
                boards.project(check, projected, grown_length);

                if self.check_safety(grid, boards, check, grown_length) == Safety::Safe {
                    let first = outcome.path[0];
                    return Some(self.commit(
                        grid,
                        head,
                        first,
                        MoveMethod::FoodPath,
                        &outcome.path,
                    ));
                }
                debug!("Food path of {} steps is not safe", outcome.path.len());
            } else {
                debug!("No path to food");
            }
        }

        let deadline = match self.settings.lookahead_budget_ms {
            0 => None,
            ms => Some(Instant::now() + Duration::from_millis(ms)),
        };

        match self.plan(grid, boards, snake_length, deadline) {
            Lookahead::Pass(tile) => {
                Some(self.commit(grid, head, tile, MoveMethod::RecursiveCoil, &[]))
            }
            Lookahead::Failed => {
                warn!("No guaranteed safe move found, coiling by best guess");
                let tile = self.choose_fallback(grid, boards, snake_length)?;
                Some(self.commit(grid, head, tile, MoveMethod::FallbackCoil, &[]))
            }
        }
    }

    fn commit(
        &mut self,
        grid: &Grid,
        head: TileId,
        tile: TileId,
        method: MoveMethod,
        food_path: &[TileId],
    ) -> Decision {
        let next = grid.coord(tile);
        let direction = Direction::between(&grid.coord(head), &next)
            .expect("committed move is not adjacent to the head");

        Decision {
            tile,
            next,
            direction,
            method,
            food_path: food_path.iter().map(|&t| grid.coord(t)).collect(),
            searches: self.recorder.take().unwrap_or_default(),
        }
    }

    /// Path search that records its explored set when tracing
    pub(crate) fn find_path(
        &mut self,
        grid: &Grid,
        boards: &SnapshotSet,
        start: TileId,
        end: TileId,
        snapshot: SnapshotId,
        mode: PathMode,
    ) -> PathOutcome {
        let outcome = self.pathfinder.solve(grid, boards, start, end, snapshot, mode);
        if let Some(records) = self.recorder.as_mut() {
            records.push(SearchRecord {
                kind: match mode {
                    PathMode::ToFood => SearchKind::FoodPath,
                    PathMode::ToTail => SearchKind::TailPath,
                },
                snapshot: snapshot.0,
                start: grid.coord(start),
                explored: self.pathfinder.explored().iter().map(|&t| grid.coord(t)).collect(),
            });
        }
        outcome
    }

    /// Free-space fill that records its explored set when tracing
    pub(crate) fn measure_free_space(
        &mut self,
        grid: &Grid,
        boards: &SnapshotSet,
        start: TileId,
        snapshot: SnapshotId,
    ) -> usize {
        let count = self.free_space.solve(grid, boards, start, snapshot);
        if let Some(records) = self.recorder.as_mut() {
            records.push(SearchRecord {
                kind: SearchKind::FreeSpace,
                snapshot: snapshot.0,
                start: grid.coord(start),
                explored: self.free_space.explored().iter().map(|&t| grid.coord(t)).collect(),
            });
        }
        count
    }
}
