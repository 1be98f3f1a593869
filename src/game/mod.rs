//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Timers and persistence plug in through [`TickScheduler`] and the storage module.

pub mod action;
pub mod config;
pub mod driver;
pub mod engine;
pub mod food;
pub mod scheduler;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{GameConfig, GridConfig, MapSize, SpeedConfig};
pub use driver::Driver;
pub use engine::{GameEngine, GameOver, TickResult};
pub use food::FoodPlacer;
pub use scheduler::{ManualScheduler, TickScheduler, TimerCommand, TokioScheduler};
pub use snapshot::Snapshot;
pub use state::{GameState, GameStatus, Position, Snake};
