use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::game::{Command, Direction, GameStatus, MapSize, Snapshot};

/// Step the speed keys move the base speed by
pub const SPEED_STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    TogglePause,
    /// Held boost, reported by terminals with key release support
    Boost(bool),
    ToggleBoost,
    SpeedUp,
    SpeedDown,
    MapSize(MapSize),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map one key event to an action.
    ///
    /// With key release reporting on, a shifted character such as `+` arrives
    /// as Shift press, character, Shift release. The boost is held for that
    /// chord and the base speed change lands when Shift is released.
    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Shift is the only key whose release matters
        if let KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) =
            key.code
        {
            return match key.kind {
                KeyEventKind::Press => KeyAction::Boost(true),
                KeyEventKind::Release => KeyAction::Boost(false),
                KeyEventKind::Repeat => KeyAction::None,
            };
        }
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char('b') | KeyCode::Char('B') => KeyAction::ToggleBoost,
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::SpeedUp,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::SpeedDown,
            KeyCode::Char('1') => KeyAction::MapSize(MapSize::Small),
            KeyCode::Char('2') => KeyAction::MapSize(MapSize::Medium),
            KeyCode::Char('3') => KeyAction::MapSize(MapSize::Large),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }

    /// Turn a key action into engine commands given what is on screen.
    ///
    /// A movement key on an idle or paused board also starts the game.
    pub fn commands_for(&self, action: KeyAction, snapshot: &Snapshot) -> Vec<Command> {
        match action {
            KeyAction::Steer(direction) => match snapshot.status {
                GameStatus::NotStarted | GameStatus::Paused => {
                    vec![Command::Start, Command::SetDirection(direction)]
                }
                GameStatus::Running | GameStatus::Ended => vec![Command::SetDirection(direction)],
            },
            KeyAction::TogglePause => match snapshot.status {
                GameStatus::Running => vec![Command::Pause],
                GameStatus::Paused => vec![Command::Resume],
                GameStatus::NotStarted => vec![Command::Start],
                GameStatus::Ended => vec![],
            },
            KeyAction::Boost(on) => vec![Command::SetBoost(on)],
            KeyAction::ToggleBoost => vec![Command::SetBoost(!snapshot.boosted)],
            KeyAction::SpeedUp => vec![Command::SetBaseSpeed(snapshot.base_speed + SPEED_STEP)],
            KeyAction::SpeedDown => vec![Command::SetBaseSpeed(
                snapshot.base_speed.saturating_sub(SPEED_STEP),
            )],
            KeyAction::MapSize(map_size) => vec![Command::SetMapSize(map_size)],
            KeyAction::Restart => vec![Command::Reset],
            KeyAction::Quit | KeyAction::None => vec![],
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
