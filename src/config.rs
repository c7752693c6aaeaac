// Configuration module for reading Autopilot.toml
// This module provides OOP-style configuration management for the autopilot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::grid::Grid;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub game: GameConfig,
    pub timing: TimingConfig,
    pub debug: DebugConfig,
}

/// Board geometry, given the way a canvas would lay it out
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub cell_size: i32,
}

impl BoardConfig {
    /// Builds the grid described by this geometry
    pub fn build_grid(&self) -> Grid {
        Grid::from_canvas(self.canvas_width, self.canvas_height, self.cell_size)
    }
}

/// Decision engine constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Plies the recursive lookahead must survive
    pub lookahead_depth: usize,
    /// Required free space as a multiple of snake length
    pub free_space_margin: f64,
    /// Share of the best free space a fallback coil move must keep
    pub coil_space_ratio: f64,
    /// Wall clock budget for one lookahead, 0 disables the check
    pub lookahead_budget_ms: u64,
}

impl SearchConfig {
    /// Live board, one board per ply and the food path check board
    pub fn snapshot_count(&self) -> usize {
        self.lookahead_depth + 2
    }

    /// Free tiles needed around the head for a snake of this length
    pub fn required_free_space(&self, snake_length: usize) -> usize {
        (snake_length as f64 * self.free_space_margin).ceil() as usize
    }
}

/// Live game rules
#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub initial_length: usize,
    pub skip_ahead_growth: usize,
    /// Fixed RNG seed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Tick driver timing
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub cycle_time_ms: u64,
    pub max_ticks: u64,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
    /// Keep the explored tiles of every search in the decision trace
    pub record_searches: bool,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Autopilot.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Autopilot.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Autopilot.toml")
    }

    /// Rejects values the engine cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.board.cell_size <= 0 {
            return Err(format!("cell_size must be positive, got {}", self.board.cell_size));
        }
        let board = &self.board;
        if board.canvas_width < board.cell_size || board.canvas_height < board.cell_size {
            return Err("canvas must fit at least one cell".to_string());
        }
        let columns = board.canvas_width / board.cell_size;
        let rows = board.canvas_height / board.cell_size;
        if columns * rows < 2 {
            return Err("board must have room for a 2-tile snake".to_string());
        }
        if self.search.lookahead_depth == 0 {
            return Err("lookahead_depth must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.search.coil_space_ratio) {
            return Err(format!(
                "coil_space_ratio must be within 0..=1, got {}",
                self.search.coil_space_ratio
            ));
        }
        if self.game.initial_length < 2 {
            return Err("initial_length must be at least 2".to_string());
        }
        Ok(())
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Autopilot.toml
    pub fn default_hardcoded() -> Self {
        Config {
            board: BoardConfig {
                canvas_width: 400,
                canvas_height: 400,
                cell_size: 25,
            },
            search: SearchConfig {
                lookahead_depth: 8,
                free_space_margin: 1.5,
                coil_space_ratio: 0.8,
                lookahead_budget_ms: 0,
            },
            game: GameConfig {
                initial_length: 2,
                skip_ahead_growth: 60,
                seed: None,
            },
            timing: TimingConfig {
                cycle_time_ms: 50,
                max_ticks: 20000,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "autopilot_trace.jsonl".to_string(),
                record_searches: false,
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Autopilot.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
