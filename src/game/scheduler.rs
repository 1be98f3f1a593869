//! Repeating tick timers.
//!
//! The engine never touches a timer directly. Its state transitions return a
//! [`TimerCommand`] and whoever owns the engine forwards it to a
//! [`TickScheduler`]. Changing the interval always tears the timer down and
//! starts a fresh period, so two ticks never overlap and a new speed applies
//! from the very next tick.

use std::future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Message from the engine to its tick timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start(Duration),
    Stop,
    Reschedule(Duration),
}

/// A repeating timer driving `GameEngine::tick`
pub trait TickScheduler {
    fn start(&mut self, interval: Duration);
    fn stop(&mut self);
    fn reschedule(&mut self, interval: Duration);

    /// Current period, `None` while stopped
    fn interval(&self) -> Option<Duration>;

    fn apply(&mut self, command: TimerCommand) {
        match command {
            TimerCommand::Start(interval) => self.start(interval),
            TimerCommand::Stop => self.stop(),
            TimerCommand::Reschedule(interval) => self.reschedule(interval),
        }
    }

    fn is_active(&self) -> bool {
        self.interval().is_some()
    }
}

/// Fake clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    period: Option<Duration>,
    since_last: Duration,
    restarts: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left until the next tick fires, `None` while stopped
    pub fn time_to_next(&self) -> Option<Duration> {
        self.period.map(|p| p.saturating_sub(self.since_last))
    }

    /// Let `elapsed` pass. Returns true if a tick came due, in which case the
    /// period starts over. Never covers more than one tick per call.
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        let Some(period) = self.period else {
            return false;
        };
        self.since_last += elapsed;
        if self.since_last >= period {
            self.since_last = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// How many times the timer has been (re)started
    pub fn restarts(&self) -> u32 {
        self.restarts
    }
}

impl TickScheduler for ManualScheduler {
    fn start(&mut self, interval: Duration) {
        self.period = Some(interval);
        self.since_last = Duration::ZERO;
        self.restarts += 1;
    }

    fn stop(&mut self) {
        self.period = None;
        self.since_last = Duration::ZERO;
    }

    fn reschedule(&mut self, interval: Duration) {
        self.stop();
        self.start(interval);
    }

    fn interval(&self) -> Option<Duration> {
        self.period
    }
}

/// Tick timer backed by `tokio::time::Interval`
#[derive(Debug, Default)]
pub struct TokioScheduler {
    timer: Option<Interval>,
    period: Option<Duration>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the next tick. Pends forever while stopped, so it is safe to
    /// poll from a `tokio::select!` loop.
    pub async fn next_tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}

impl TickScheduler for TokioScheduler {
    fn start(&mut self, interval: Duration) {
        // setInterval semantics: the first tick lands one full period out
        let mut timer = interval_at(Instant::now() + interval, interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
        self.period = Some(interval);
    }

    fn stop(&mut self) {
        self.timer = None;
        self.period = None;
    }

    fn reschedule(&mut self, interval: Duration) {
        self.stop();
        self.start(interval);
    }

    fn interval(&self) -> Option<Duration> {
        self.period
    }
}
