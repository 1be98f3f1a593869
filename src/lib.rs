//! Cyber Snake - Snake on a wraparound grid
//!
//! This library provides:
//! - Core game logic and tick scheduling (game module)
//! - High score persistence (storage module)
//! - TUI rendering and keyboard input (render, input modules)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;
pub mod storage;
