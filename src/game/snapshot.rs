use serde::Serialize;

use super::config::{GridConfig, MapSize};
use super::state::{GameStatus, Position};

/// Read-only view of a session handed to the presentation layer.
///
/// `snake_cells[0]` is always the head.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake_cells: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub high_score: u32,
    pub map_size: MapSize,
    pub grid: GridConfig,
    pub status: GameStatus,
    pub boosted: bool,
    pub base_speed: u32,
    pub tick_interval_ms: u64,
    /// Set once a session ends above the previous high score
    pub new_record: bool,
}

impl Snapshot {
    pub fn head(&self) -> Position {
        self.snake_cells[0]
    }
}
