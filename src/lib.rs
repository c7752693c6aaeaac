// Library exports for the snake autopilot
// The driver and bench binaries, and the integration tests, all play through `Game`

pub mod autopilot;
pub mod coil;
pub mod config;
pub mod free_space;
pub mod game;
pub mod grid;
pub mod lookahead;
pub mod pathfind;
pub mod safety;
pub mod snapshot;
pub mod trace_logger;
pub mod types;

pub use autopilot::{Autopilot, Decision, SearchKind, SearchRecord};
pub use config::Config;
pub use game::{Game, GameStats, TickReport};
pub use types::{Coord, Direction, GameStatus, MoveMethod};
