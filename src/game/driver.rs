use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use super::{
    action::Command,
    engine::{GameEngine, TickResult},
    scheduler::{ManualScheduler, TickScheduler},
    snapshot::Snapshot,
    state::GameStatus,
};
use crate::storage::HighScoreStore;

/// Connects a [`GameEngine`] to its tick timer and high score store.
///
/// Every timer message produced by a command or a tick is applied before the
/// call returns, so once `dispatch(Command::Pause)` is back no stale tick can
/// fire against the paused session.
pub struct Driver<S: TickScheduler, H: HighScoreStore, R: Rng = StdRng> {
    engine: GameEngine<R>,
    scheduler: S,
    store: H,
}

impl<S: TickScheduler, H: HighScoreStore, R: Rng> Driver<S, H, R> {
    pub fn new(engine: GameEngine<R>, scheduler: S, store: H) -> Self {
        Self {
            engine,
            scheduler,
            store,
        }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn store(&self) -> &H {
        &self.store
    }

    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Apply an input command and bring the timer in line with it
    pub fn dispatch(&mut self, command: Command) {
        if let Some(timer) = self.engine.apply(command) {
            debug!(?command, ?timer, "timer change");
            self.scheduler.apply(timer);
        }
    }

    /// Run one tick. Called by the owner of the scheduler whenever it fires.
    pub fn on_tick(&mut self) -> TickResult {
        let result = self.engine.tick();

        if let Some(timer) = result.timer_command() {
            self.scheduler.apply(timer);
        }

        if let Some(over) = result.game_over {
            if over.new_record {
                info!(high_score = over.high_score, "new high score");
                if let Err(e) = self.store.save(over.high_score) {
                    warn!(error = %e, "failed to persist high score");
                }
            }
        }

        result
    }
}

impl<H: HighScoreStore, R: Rng> Driver<ManualScheduler, H, R> {
    /// Move the fake clock forward, running every tick that comes due in
    /// order. Ticks stop as soon as the session leaves `Running`.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<TickResult> {
        let mut remaining = elapsed;
        let mut results = Vec::new();

        while let Some(wait) = self.scheduler.time_to_next() {
            if remaining < wait {
                self.scheduler.elapse(remaining);
                break;
            }
            remaining -= wait;
            self.scheduler.elapse(wait);
            results.push(self.on_tick());
        }

        results
    }
}
