// Decision trace feed
//
// Fire-and-forget async logging so the tick loop never waits on disk. Each
// committed move is written as one JSON line; a visualizer can tail the file
// to draw paths and explored sets.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::autopilot::{Decision, SearchRecord};
use crate::types::{Coord, MoveMethod};

/// One line of the trace file
#[derive(Debug, Serialize)]
pub struct TraceEntry {
    pub tick: u64,
    pub method: MoveMethod,
    pub head: Coord,
    pub next: Coord,
    pub food: Option<Coord>,
    pub snake_length: usize,
    pub food_path: Vec<Coord>,
    pub searches: Vec<SearchRecord>,
    pub timestamp: String,
}

impl TraceEntry {
    /// Builds the entry for a move committed from `head`
    pub fn from_decision(
        tick: u64,
        head: Coord,
        food: Option<Coord>,
        snake_length: usize,
        decision: Decision,
    ) -> Self {
        TraceEntry {
            tick,
            method: decision.method,
            head,
            next: decision.next,
            food,
            snake_length,
            food_path: decision.food_path,
            searches: decision.searches,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Shared trace writer; clones append to the same file
#[derive(Clone)]
pub struct TraceLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl TraceLogger {
    /// Opens (and truncates) the trace file when `enabled`.
    /// A file that cannot be created leaves the logger disabled.
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Decision trace enabled: {}", log_file_path);
                TraceLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create trace file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// No-op logger
    pub fn disabled() -> Self {
        TraceLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an entry on a spawned task and returns immediately
    pub fn log(&self, entry: TraceEntry) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Writes an entry and waits for the write to finish
    pub async fn log_now(&self, entry: TraceEntry) {
        if self.enabled {
            Self::write_entry(self.file.clone(), entry).await;
        }
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: TraceEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write trace entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush trace file: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize trace entry for tick {}: {}", entry.tick, e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileId;
    use crate::types::Direction;

    fn entry(tick: u64) -> TraceEntry {
        let decision = Decision {
            tile: TileId(2),
            next: Coord::new(2, 0),
            direction: Direction::Right,
            method: MoveMethod::FoodPath,
            food_path: vec![Coord::new(2, 0), Coord::new(3, 0)],
            searches: Vec::new(),
        };
        TraceEntry::from_decision(tick, Coord::new(1, 0), Some(Coord::new(3, 0)), 2, decision)
    }

    #[tokio::test]
    async fn test_entries_are_written_as_json_lines() {
        let path = std::env::temp_dir()
            .join(format!("autopilot_trace_{}.jsonl", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        let logger = TraceLogger::new(true, &path_str).await;
        assert!(logger.is_enabled());
        logger.log_now(entry(1)).await;
        logger.log_now(entry(2)).await;

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["tick"], 1);
        assert_eq!(lines[1]["tick"], 2);
        assert_eq!(lines[0]["method"], "FoodPath");
        assert_eq!(lines[0]["next"]["x"], 2);
        assert!(lines[0]["timestamp"].is_string());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_final_entry_is_on_disk_when_log_now_returns() {
        let path = std::env::temp_dir()
            .join(format!("autopilot_trace_last_{}.jsonl", std::process::id()));
        let logger = TraceLogger::new(true, &path.to_string_lossy()).await;

        logger.log(entry(1));
        logger.log_now(entry(2)).await;

        // The spawned write may land before or after, the awaited one is always there
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let awaited = lines
            .iter()
            .find(|line| line["tick"] == 2)
            .expect("awaited entry missing");
        assert_eq!(awaited["food"]["x"], 3);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_disabled_logger_writes_nothing() {
        let path = std::env::temp_dir()
            .join(format!("autopilot_trace_off_{}.jsonl", std::process::id()));
        let logger = TraceLogger::new(false, &path.to_string_lossy()).await;

        assert!(!logger.is_enabled());
        logger.log(entry(1));
        logger.log_now(entry(2)).await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unwritable_path_disables_logger() {
        let logger = TraceLogger::new(true, "/nonexistent-dir/for/trace.jsonl").await;
        assert!(!logger.is_enabled());
    }
}
