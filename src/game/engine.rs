use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{
    action::{Command, Direction},
    config::{GameConfig, MapSize},
    food::FoodPlacer,
    scheduler::TimerCommand,
    snapshot::Snapshot,
    state::{GameState, GameStatus, Position, Snake},
};

/// Segments the snake starts with
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Score awarded per food eaten
pub const FOOD_SCORE: u32 = 10;

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_score: u32,
    /// High score after this session was counted
    pub high_score: u32,
    /// True when `final_score` beat the previous high score
    pub new_record: bool,
}

/// Result of a single tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when this tick ended the session
    pub game_over: Option<GameOver>,
}

impl TickResult {
    /// What the tick timer has to do after this tick
    pub fn timer_command(&self) -> Option<TimerCommand> {
        self.game_over.map(|_| TimerCommand::Stop)
    }
}

/// The game engine: sole owner of the snake, food and session
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    state: GameState,
    food_placer: FoodPlacer<R>,
    base_speed: u32,
    boosted: bool,
    high_score: u32,
    new_record: bool,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration and the
    /// previously persisted high score
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        Self::with_rng(config, high_score, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, high_score: u32, rng: R) -> Self {
        let mut food_placer = FoodPlacer::new(rng);
        let state = initial_state(&config, &mut food_placer);
        let base_speed = config.speed.clamp(config.speed.default);

        Self {
            config,
            state,
            food_placer,
            base_speed,
            boosted: false,
            high_score,
            new_record: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn base_speed(&self) -> u32 {
        self.base_speed
    }

    pub fn is_boosted(&self) -> bool {
        self.boosted
    }

    /// Interval the tick timer should run at right now
    pub fn tick_interval(&self) -> Duration {
        if self.boosted {
            self.config.speed.boost_interval()
        } else {
            self.config.speed.interval_for(self.base_speed)
        }
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake_cells: self.state.snake.body.clone(),
            food: self.state.food,
            score: self.state.score,
            high_score: self.high_score,
            map_size: self.config.map_size,
            grid: self.state.grid,
            status: self.state.status,
            boosted: self.boosted,
            base_speed: self.base_speed,
            tick_interval_ms: self.tick_interval().as_millis() as u64,
            new_record: self.new_record,
        }
    }

    /// Route an input command. The returned message, if any, must be handed
    /// to the tick scheduler before the next tick can fire.
    pub fn apply(&mut self, command: Command) -> Option<TimerCommand> {
        match command {
            Command::Start => self.start(),
            Command::Resume => self.resume(),
            Command::Pause => self.pause(),
            Command::Reset => self.reset(),
            Command::SetDirection(direction) => {
                self.set_direction(direction);
                None
            }
            Command::SetBoost(on) => self.set_boost(on),
            Command::SetBaseSpeed(speed) => self.set_base_speed(speed),
            Command::SetMapSize(map_size) => self.set_map_size(map_size),
        }
    }

    /// Start a fresh session or resume a paused one, always at base speed
    pub fn start(&mut self) -> Option<TimerCommand> {
        match self.state.status {
            GameStatus::NotStarted => info!("session started"),
            GameStatus::Paused => info!(score = self.state.score, "session resumed"),
            GameStatus::Running | GameStatus::Ended => return None,
        }
        self.state.status = GameStatus::Running;
        self.boosted = false;
        Some(TimerCommand::Start(self.tick_interval()))
    }

    /// Only a paused session can be resumed
    pub fn resume(&mut self) -> Option<TimerCommand> {
        if !self.state.status.is_paused() {
            return None;
        }
        self.start()
    }

    pub fn pause(&mut self) -> Option<TimerCommand> {
        if !self.state.status.is_running() {
            return None;
        }
        self.state.status = GameStatus::Paused;
        self.boosted = false;
        info!(score = self.state.score, "session paused");
        Some(TimerCommand::Stop)
    }

    /// Throw the session away and set up a new one on the current grid
    pub fn reset(&mut self) -> Option<TimerCommand> {
        let was_running = self.state.status.is_running();
        self.state = initial_state(&self.config, &mut self.food_placer);
        self.boosted = false;
        self.new_record = false;
        debug!(map_size = %self.config.map_size, "session reset");
        was_running.then_some(TimerCommand::Stop)
    }

    /// Queue a heading for the next tick; reversals are dropped
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.state.snake.steer(direction) {
            debug!(?direction, current = ?self.state.snake.direction, "reversal ignored");
        }
    }

    /// Boost only applies while running and never outlives a pause
    pub fn set_boost(&mut self, on: bool) -> Option<TimerCommand> {
        if !self.state.status.is_running() || self.boosted == on {
            return None;
        }
        self.boosted = on;
        debug!(boosted = on, "boost toggled");
        Some(TimerCommand::Reschedule(self.tick_interval()))
    }

    pub fn set_base_speed(&mut self, speed: u32) -> Option<TimerCommand> {
        let speed = self.config.speed.clamp(speed);
        if speed == self.base_speed {
            return None;
        }
        self.base_speed = speed;
        debug!(speed, "base speed changed");
        if self.state.status.is_running() && !self.boosted {
            Some(TimerCommand::Reschedule(self.tick_interval()))
        } else {
            None
        }
    }

    /// Changing the board always starts a new session
    pub fn set_map_size(&mut self, map_size: MapSize) -> Option<TimerCommand> {
        self.config.map_size = map_size;
        info!(%map_size, "map size changed");
        self.reset()
    }

    /// Advance the simulation by one cell.
    ///
    /// Panics unless the session is running; the scheduler is stopped on
    /// every transition out of `Running`.
    pub fn tick(&mut self) -> TickResult {
        assert!(
            self.state.status.is_running(),
            "tick() called while {:?}",
            self.state.status
        );

        let state = &mut self.state;
        state.snake.commit_direction();
        let new_head = state
            .snake
            .head()
            .stepped_wrapping(state.snake.direction, &state.grid);

        // The tail has not moved yet, so stepping into it counts
        if state.snake.occupies(new_head) {
            return TickResult {
                ate_food: false,
                game_over: Some(self.end()),
            };
        }
        state.steps += 1;

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);

        if ate_food {
            state.score += FOOD_SCORE;
            debug!(score = state.score, length = state.snake.len(), "food eaten");

            if state.snake.len() >= state.grid.cell_count() {
                // Board is full, nowhere left for food
                return TickResult {
                    ate_food,
                    game_over: Some(self.end()),
                };
            }

            state.food =
                self.food_placer
                    .place(state.grid.columns, state.grid.rows, &state.snake.body);
        }

        TickResult {
            ate_food,
            game_over: None,
        }
    }

    fn end(&mut self) -> GameOver {
        self.state.status = GameStatus::Ended;
        self.boosted = false;

        let final_score = self.state.score;
        self.new_record = final_score > self.high_score;
        if self.new_record {
            self.high_score = final_score;
        }
        info!(
            final_score,
            high_score = self.high_score,
            new_record = self.new_record,
            steps = self.state.steps,
            "session ended"
        );

        GameOver {
            final_score,
            high_score: self.high_score,
            new_record: self.new_record,
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

fn initial_state<R: Rng>(config: &GameConfig, food_placer: &mut FoodPlacer<R>) -> GameState {
    let grid = config.grid();
    let head = Position::new((grid.columns / 2) as i32, (grid.rows / 2) as i32);
    let snake = Snake::new(head, Direction::Right, INITIAL_SNAKE_LENGTH);
    let food = food_placer.place(grid.columns, grid.rows, &snake.body);

    GameState::new(snake, food, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn engine() -> GameEngine<StdRng> {
        GameEngine::with_rng(GameConfig::default(), 0, StdRng::seed_from_u64(7))
    }

    fn running_engine() -> GameEngine<StdRng> {
        let mut engine = engine();
        engine.start();
        engine
    }

    /// Replace the snake and park food where it will not interfere
    fn set_snake(engine: &mut GameEngine<StdRng>, body: &[(i32, i32)], direction: Direction) {
        let state = engine.state_mut();
        state.snake = Snake {
            body: body.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
            pending_direction: direction,
        };
        state.food = Position::new(0, 0);
    }

    fn cells(engine: &GameEngine<StdRng>) -> Vec<(i32, i32)> {
        engine.state().snake.body.iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn test_reset() {
        let engine = engine();
        let state = engine.state();

        assert_eq!(state.status, GameStatus::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(cells(&engine), vec![(10, 10), (9, 10), (8, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.pending_direction, Direction::Right);
        assert!(!state.snake.occupies(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_reset_centers_on_each_preset() {
        for (map_size, center) in [
            (MapSize::Small, (10, 10)),
            (MapSize::Medium, (15, 15)),
            (MapSize::Large, (20, 20)),
        ] {
            let engine =
                GameEngine::with_rng(GameConfig::new(map_size), 0, StdRng::seed_from_u64(1));
            assert_eq!(cells(&engine)[0], center);
        }
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = running_engine();
        engine.state_mut().food = Position::new(0, 0);

        let result = engine.tick();

        assert!(!result.ate_food);
        assert!(result.game_over.is_none());
        assert_eq!(cells(&engine), vec![(11, 10), (10, 10), (9, 10)]);
        assert_eq!(engine.state().steps, 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = running_engine();
        engine.state_mut().food = Position::new(11, 10);

        let result = engine.tick();

        assert!(result.ate_food);
        assert_eq!(engine.state().score, 10);
        assert_eq!(cells(&engine), vec![(11, 10), (10, 10), (9, 10), (8, 10)]);
        let food = engine.state().food;
        assert!(!engine.state().snake.occupies(food));
    }

    #[test]
    fn test_growth_and_score_laws() {
        let mut engine = running_engine();
        let mut expected_score = 0;

        for _ in 0..30 {
            let head = engine.state().snake.head();
            let grid = engine.state().grid;
            let next = head.stepped_wrapping(engine.state().snake.direction, &grid);
            let len_before = engine.state().snake.len();
            let eat = engine.state().steps % 3 == 0;
            if eat {
                engine.state_mut().food = next;
            } else if engine.state().food == next {
                engine.state_mut().food = Position::new(0, 0);
            }

            let result = engine.tick();
            assert!(result.game_over.is_none());
            assert_eq!(result.ate_food, eat);

            if eat {
                expected_score += FOOD_SCORE;
                assert_eq!(engine.state().snake.len(), len_before + 1);
            } else {
                assert_eq!(engine.state().snake.len(), len_before);
            }
            assert_eq!(engine.state().score, expected_score);
        }
    }

    #[test]
    fn test_wraparound_through_engine() {
        let mut engine = running_engine();
        set_snake(&mut engine, &[(19, 4), (18, 4), (17, 4)], Direction::Right);
        engine.state_mut().food = Position::new(5, 5);

        engine.tick();

        assert_eq!(cells(&engine), vec![(0, 4), (19, 4), (18, 4)]);
        assert_eq!(engine.status(), GameStatus::Running);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = running_engine();
        engine.state_mut().food = Position::new(0, 0);

        engine.set_direction(Direction::Left);
        engine.tick();

        assert_eq!(engine.state().snake.direction, Direction::Right);
        assert_eq!(cells(&engine)[0], (11, 10));
    }

    #[test]
    fn test_latest_direction_wins() {
        let mut engine = running_engine();
        engine.state_mut().food = Position::new(0, 0);

        engine.set_direction(Direction::Up);
        engine.set_direction(Direction::Down);
        engine.tick();

        assert_eq!(engine.state().snake.direction, Direction::Down);
        assert_eq!(cells(&engine)[0], (10, 11));
    }

    #[test]
    fn test_turn_then_self_collision() {
        let mut engine = running_engine();
        set_snake(
            &mut engine,
            &[(5, 5), (4, 5), (3, 5), (2, 5), (1, 5)],
            Direction::Right,
        );

        engine.set_direction(Direction::Down);
        engine.tick();
        assert_eq!(cells(&engine)[..2], [(5, 6), (5, 5)]);

        engine.set_direction(Direction::Left);
        engine.tick();
        engine.set_direction(Direction::Up);
        let mut before = engine.state().clone();
        let result = engine.tick();

        let over = result.game_over.expect("head ran into (4, 5)");
        assert_eq!(over.final_score, 0);
        assert_eq!(engine.status(), GameStatus::Ended);
        assert_eq!(result.timer_command(), Some(TimerCommand::Stop));
        // the failing tick changes nothing but the status and heading
        before.status = GameStatus::Ended;
        before.snake.direction = Direction::Up;
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.state().steps, 2);
    }

    #[test]
    fn test_moving_into_tail_ends_game() {
        let mut engine = running_engine();
        set_snake(&mut engine, &[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::Up);

        engine.set_direction(Direction::Left);
        let result = engine.tick();

        assert!(result.game_over.is_some());
        assert_eq!(engine.status(), GameStatus::Ended);
    }

    #[test]
    fn test_board_full_ends_game() {
        let mut engine =
            GameEngine::with_rng(GameConfig::new(MapSize::Small), 0, StdRng::seed_from_u64(3));
        engine.start();

        // Every cell but (19, 19), head next to it
        let mut body = vec![(18, 19)];
        for y in 0..20 {
            for x in 0..20 {
                if (x, y) != (19, 19) && (x, y) != (18, 19) {
                    body.push((x, y));
                }
            }
        }

        set_snake(&mut engine, &body, Direction::Right);
        engine.state_mut().food = Position::new(19, 19);
        let result = engine.tick();

        assert!(result.ate_food);
        assert!(result.game_over.is_some());
        assert_eq!(engine.state().snake.len(), 400);
        assert_eq!(engine.status(), GameStatus::Ended);
    }

    #[test]
    #[should_panic(expected = "tick() called while NotStarted")]
    fn test_tick_before_start_panics() {
        let mut engine = engine();
        engine.tick();
    }

    #[test]
    #[should_panic(expected = "tick() called while Paused")]
    fn test_tick_while_paused_panics() {
        let mut engine = running_engine();
        engine.pause();
        engine.tick();
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut engine = engine();
        let base = Duration::from_millis(250);

        assert_eq!(engine.pause(), None);
        assert_eq!(engine.start(), Some(TimerCommand::Start(base)));
        assert_eq!(engine.start(), None);
        assert_eq!(engine.pause(), Some(TimerCommand::Stop));
        assert_eq!(engine.status(), GameStatus::Paused);
        assert_eq!(engine.apply(Command::Resume), Some(TimerCommand::Start(base)));
        assert_eq!(engine.status(), GameStatus::Running);
        assert_eq!(engine.reset(), Some(TimerCommand::Stop));
        assert_eq!(engine.status(), GameStatus::NotStarted);
        assert_eq!(engine.reset(), None);
    }

    #[test]
    fn test_resume_only_from_paused() {
        let mut engine = engine();
        assert_eq!(engine.apply(Command::Resume), None);
        assert_eq!(engine.status(), GameStatus::NotStarted);

        engine.start();
        assert_eq!(engine.apply(Command::Resume), None);
        assert_eq!(engine.status(), GameStatus::Running);
    }

    #[test]
    fn test_ended_requires_reset() {
        let mut engine = running_engine();
        set_snake(&mut engine, &[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::Up);
        engine.set_direction(Direction::Left);
        engine.tick();
        assert_eq!(engine.status(), GameStatus::Ended);

        assert_eq!(engine.start(), None);
        assert_eq!(engine.pause(), None);
        assert_eq!(engine.status(), GameStatus::Ended);

        engine.reset();
        assert_eq!(engine.status(), GameStatus::NotStarted);
        assert!(engine.start().is_some());
    }

    #[test]
    fn test_pause_preserves_state() {
        let mut engine = running_engine();
        engine.tick();
        let before = engine.state().clone();

        engine.pause();
        engine.set_boost(true);
        engine.start();

        let after = engine.state();
        assert_eq!(after.snake, before.snake);
        assert_eq!(after.food, before.food);
        assert_eq!(after.score, before.score);
    }

    #[test]
    fn test_boost_only_changes_interval() {
        let mut engine = running_engine();
        let before = engine.snapshot();

        assert_eq!(
            engine.set_boost(true),
            Some(TimerCommand::Reschedule(Duration::from_millis(50)))
        );
        assert_eq!(engine.set_boost(true), None);

        let boosted = engine.snapshot();
        assert_eq!(boosted.snake_cells, before.snake_cells);
        assert_eq!(boosted.food, before.food);
        assert_eq!(boosted.score, before.score);
        assert_eq!(boosted.tick_interval_ms, 50);

        assert_eq!(
            engine.set_boost(false),
            Some(TimerCommand::Reschedule(Duration::from_millis(250)))
        );
    }

    #[test]
    fn test_boost_ignored_unless_running() {
        let mut engine = engine();
        assert_eq!(engine.set_boost(true), None);
        assert!(!engine.is_boosted());
    }

    #[test]
    fn test_resume_after_boost_uses_base_speed() {
        let mut engine = running_engine();
        engine.set_boost(true);
        engine.pause();
        assert!(!engine.is_boosted());
        assert_eq!(
            engine.start(),
            Some(TimerCommand::Start(Duration::from_millis(250)))
        );
    }

    #[test]
    fn test_base_speed_changes() {
        let mut engine = engine();
        // not running: remembered, no timer change
        assert_eq!(engine.set_base_speed(300), None);
        assert_eq!(engine.tick_interval(), Duration::from_millis(100));

        engine.start();
        assert_eq!(
            engine.set_base_speed(9999),
            Some(TimerCommand::Reschedule(Duration::from_millis(50)))
        );
        assert_eq!(engine.base_speed(), 350);

        engine.set_base_speed(100);
        engine.set_boost(true);
        // boosted: the slider does not touch the timer
        assert_eq!(engine.set_base_speed(200), None);
        assert_eq!(engine.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_map_size_change_resets() {
        let mut engine = running_engine();
        engine.tick();

        assert_eq!(
            engine.apply(Command::SetMapSize(MapSize::Large)),
            Some(TimerCommand::Stop)
        );
        assert_eq!(engine.status(), GameStatus::NotStarted);
        assert_eq!(engine.state().grid.columns, 40);
        assert_eq!(cells(&engine), vec![(20, 20), (19, 20), (18, 20)]);
    }

    #[test]
    fn test_high_score_only_grows() {
        let mut engine = GameEngine::with_rng(GameConfig::default(), 20, StdRng::seed_from_u64(9));

        for (score, expected_high, record) in [(10, 20, false), (30, 30, true), (20, 30, false)] {
            engine.reset();
            engine.start();
            engine.state_mut().score = score;
            set_snake(&mut engine, &[(5, 5), (5, 6), (4, 6), (4, 5)], Direction::Up);
            engine.set_direction(Direction::Left);

            let over = engine.tick().game_over.unwrap();
            assert_eq!(over.final_score, score);
            assert_eq!(over.high_score, expected_high);
            assert_eq!(over.new_record, record);
            assert_eq!(engine.snapshot().new_record, record);
        }
        assert_eq!(engine.high_score(), 30);
    }

    #[test]
    fn test_no_duplicate_cells_over_random_play() {
        let mut engine = GameEngine::with_rng(
            GameConfig::new(MapSize::Small),
            0,
            StdRng::seed_from_u64(42),
        );
        let mut rng = StdRng::seed_from_u64(1234);
        let dirs = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        engine.start();

        for _ in 0..5_000 {
            if rng.gen_bool(0.3) {
                engine.set_direction(dirs[rng.gen_range(0..4)]);
            }
            // steer toward food now and then so the snake grows
            if rng.gen_bool(0.2) {
                let state = engine.state();
                let next = state
                    .snake
                    .head()
                    .stepped_wrapping(state.snake.pending_direction, &state.grid);
                if !state.snake.occupies(next) {
                    engine.state_mut().food = next;
                }
            }

            let result = engine.tick();

            let body = &engine.state().snake.body;
            let unique: HashSet<_> = body.iter().collect();
            assert_eq!(unique.len(), body.len());
            let food = engine.state().food;
            assert!(!engine.state().snake.occupies(food) || result.game_over.is_some());

            if result.game_over.is_some() {
                engine.reset();
                engine.start();
            }
        }
    }
}
