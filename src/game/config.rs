use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Interval in ms is `INTERVAL_CEILING_MS - speed`
pub const INTERVAL_CEILING_MS: u32 = 400;

/// Discrete board size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSize {
    #[default]
    Small,
    Medium,
    Large,
}

impl MapSize {
    /// Grid parameters for this preset
    pub fn grid(&self) -> GridConfig {
        match self {
            MapSize::Small => GridConfig::new(20, 20, 20),
            MapSize::Medium => GridConfig::new(13, 30, 30),
            MapSize::Large => GridConfig::new(10, 40, 40),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MapSize::Small => "small",
            MapSize::Medium => "medium",
            MapSize::Large => "large",
        }
    }
}

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board geometry, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridConfig {
    /// Size of one cell when drawn, in pixels
    pub cell_pixel_size: u32,
    /// Number of columns
    pub columns: usize,
    /// Number of rows
    pub rows: usize,
}

impl GridConfig {
    /// Panics if either side is shorter than 3 cells, the initial snake needs room.
    pub fn new(cell_pixel_size: u32, columns: usize, rows: usize) -> Self {
        assert!(
            columns >= 3 && rows >= 3,
            "grid must be at least 3x3, got {columns}x{rows}"
        );
        Self {
            cell_pixel_size,
            columns,
            rows,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }
}

/// Base speed range and boost setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Lowest accepted speed setting
    pub min: u32,
    /// Highest accepted speed setting
    pub max: u32,
    /// Speed setting used at startup
    pub default: u32,
    /// Setting the boost pins the interval to
    pub boost: u32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            min: 50,
            max: 350,
            default: 150,
            boost: 350,
        }
    }
}

impl SpeedConfig {
    pub fn clamp(&self, speed: u32) -> u32 {
        speed.clamp(self.min, self.max)
    }

    /// Tick interval for a (clamped) base speed setting
    pub fn interval_for(&self, speed: u32) -> Duration {
        let speed = self.clamp(speed).min(INTERVAL_CEILING_MS - 1);
        Duration::from_millis(u64::from(INTERVAL_CEILING_MS - speed))
    }

    /// Tick interval while boost is held
    pub fn boost_interval(&self) -> Duration {
        let boost = self.boost.min(INTERVAL_CEILING_MS - 1);
        Duration::from_millis(u64::from(INTERVAL_CEILING_MS - boost))
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board size preset
    pub map_size: MapSize,
    /// Speed slider and boost
    pub speed: SpeedConfig,
}

impl GameConfig {
    pub fn new(map_size: MapSize) -> Self {
        Self {
            map_size,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> GridConfig {
        self.map_size.grid()
    }
}
