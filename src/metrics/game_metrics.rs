use std::time::{Duration, Instant};

use crate::game::GameStatus;

/// Play-time clock and session counter shown in the HUD.
///
/// The clock only runs while the session is `Running`.
pub struct GameMetrics {
    running_since: Option<Instant>,
    banked: Duration,
    pub elapsed_time: Duration,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            running_since: None,
            banked: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            games_played: 0,
        }
    }

    /// Follow the session status; call after every command and tick
    pub fn sync(&mut self, status: GameStatus) {
        self.sync_at(status, Instant::now());
    }

    fn sync_at(&mut self, status: GameStatus, now: Instant) {
        match (status, self.running_since) {
            (GameStatus::Running, None) => self.running_since = Some(now),
            (GameStatus::Running, Some(_)) => {}
            (_, Some(since)) => {
                self.banked += now.saturating_duration_since(since);
                self.running_since = None;
            }
            (_, None) => {}
        }
        self.update_at(now);
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        let live = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.elapsed_time = self.banked + live;
    }

    /// Start a fresh clock for a new session
    pub fn on_reset(&mut self) {
        self.running_since = None;
        self.banked = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.games_played += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
