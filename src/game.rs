use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GridSize;
use crate::food::Food;
use crate::input::Direction;
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// What ended the game.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Complete mutable game state for one session.
///
/// Mutated only through [`tick`](Self::tick) and the input operations;
/// everything the renderer needs is readable between ticks.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    bounds: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh session with entropy-seeded food placement.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let snake = Snake::spawn_centered(bounds);
        let food = Food::spawn(&mut rng, bounds, &snake);

        Self {
            snake,
            food,
            score: 0,
            status: GameStatus::Playing,
            death_reason: None,
            tick_count: 0,
            bounds,
            rng,
        }
    }

    /// Reinitializes the session, keeping the RNG stream. Only honored
    /// after a game over.
    pub fn restart(&mut self) {
        if self.status != GameStatus::GameOver {
            return;
        }

        self.snake = Snake::spawn_centered(self.bounds);
        self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake);
        self.score = 0;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.tick_count = 0;
    }

    /// Advances the simulation by one gameplay tick.
    ///
    /// Commits the pending heading, moves the snake (growing when the new
    /// head lands on food), then checks the post-move snake for wall and
    /// self collisions.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.tick_count += 1;
        self.snake.commit_pending();

        let new_head = self.snake.next_head();
        if new_head == self.food.position {
            self.score += 1;
            self.snake.grow_to(new_head);
            self.food = Food::spawn(&mut self.rng, self.bounds, &self.snake);
        } else {
            self.snake.step_to(new_head);
        }

        if !new_head.is_within_bounds(self.bounds) {
            self.end_game(DeathReason::WallCollision);
            return;
        }

        if self.snake.head_overlaps_body() {
            self.end_game(DeathReason::SelfCollision);
        }
    }

    /// Buffers a heading change for the next tick. Reversals of the
    /// current heading are rejected; the last accepted request wins.
    pub fn request_heading(&mut self, direction: Direction) {
        if self.status == GameStatus::Playing {
            self.snake.request_direction(direction);
        }
    }

    /// Suspends or resumes ticking without touching the board.
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver => GameStatus::GameOver,
        };
    }

    /// Returns the board dimensions.
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Returns true while the game has not ended.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status != GameStatus::GameOver
    }

    fn end_game(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::food::Food;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{DeathReason, GameState, GameStatus};

    const BOUNDS: GridSize = GridSize {
        width: 20,
        height: 11,
    };

    fn state_with_snake(snake: Snake, food: Position) -> GameState {
        let mut state = GameState::new_with_seed(BOUNDS, 1);
        state.snake = snake;
        state.food = Food::new(food);
        state
    }

    #[test]
    fn plain_move_translates_without_growing() {
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![
                    Position { x: 10, y: 5 },
                    Position { x: 9, y: 5 },
                    Position { x: 8, y: 5 },
                ],
                Direction::Right,
            ),
            Position { x: 15, y: 2 },
        );

        state.tick();

        let segments: Vec<_> = state.snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position { x: 11, y: 5 },
                Position { x: 10, y: 5 },
                Position { x: 9, y: 5 },
            ]
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn eating_food_grows_in_the_same_tick() {
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![
                    Position { x: 10, y: 5 },
                    Position { x: 9, y: 5 },
                    Position { x: 8, y: 5 },
                ],
                Direction::Right,
            ),
            Position { x: 11, y: 5 },
        );

        state.tick();

        let segments: Vec<_> = state.snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position { x: 11, y: 5 },
                Position { x: 10, y: 5 },
                Position { x: 9, y: 5 },
                Position { x: 8, y: 5 },
            ]
        );
        assert_eq!(state.score, 1);
        assert_ne!(state.food.position, Position { x: 11, y: 5 });
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn wall_collision_ends_the_game() {
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![Position { x: 0, y: 5 }, Position { x: 1, y: 5 }],
                Direction::Left,
            ),
            Position { x: 15, y: 2 },
        );

        state.tick();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::WallCollision));
        assert!(!state.is_running());
    }

    #[test]
    fn self_collision_ends_the_game() {
        // Head at (2,2) moving left into its own body loop.
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![
                    Position { x: 2, y: 2 },
                    Position { x: 2, y: 3 },
                    Position { x: 1, y: 3 },
                    Position { x: 1, y: 2 },
                    Position { x: 1, y: 1 },
                    Position { x: 2, y: 1 },
                ],
                Direction::Left,
            ),
            Position { x: 15, y: 2 },
        );

        state.tick();

        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.death_reason, Some(DeathReason::SelfCollision));
    }

    #[test]
    fn moving_into_the_vacating_tail_cell_is_not_a_collision() {
        // A 2x2 loop: the head moves into the cell the tail leaves this tick.
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![
                    Position { x: 2, y: 2 },
                    Position { x: 3, y: 2 },
                    Position { x: 3, y: 3 },
                    Position { x: 2, y: 3 },
                ],
                Direction::Down,
            ),
            Position { x: 15, y: 8 },
        );

        state.tick();

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.snake.head(), Position { x: 2, y: 3 });
    }

    #[test]
    fn tick_is_inert_while_paused_and_after_game_over() {
        let mut state = GameState::new_with_seed(BOUNDS, 2);

        state.toggle_pause();
        let head_before = state.snake.head();
        state.tick();
        assert_eq!(state.snake.head(), head_before);
        assert_eq!(state.tick_count, 0);

        state.toggle_pause();
        state.tick();
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn toggle_pause_twice_restores_ticking() {
        let mut state = GameState::new_with_seed(BOUNDS, 3);

        state.toggle_pause();
        state.toggle_pause();

        assert_eq!(state.status, GameStatus::Playing);
        state.tick();
        assert_eq!(state.tick_count, 1);
    }

    #[test]
    fn pause_does_not_resurrect_a_finished_game() {
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![Position { x: 0, y: 5 }, Position { x: 1, y: 5 }],
                Direction::Left,
            ),
            Position { x: 15, y: 2 },
        );
        state.tick();
        assert_eq!(state.status, GameStatus::GameOver);

        state.toggle_pause();
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn restart_rebuilds_a_centered_session() {
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![Position { x: 0, y: 5 }, Position { x: 1, y: 5 }],
                Direction::Left,
            ),
            Position { x: 15, y: 2 },
        );
        state.score = 7;
        state.tick();
        assert_eq!(state.status, GameStatus::GameOver);

        state.restart();

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_count, 0);
        assert_eq!(state.death_reason, None);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position { x: 10, y: 5 });
        assert_eq!(state.snake.direction(), Direction::Right);
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn restart_is_ignored_mid_game() {
        let mut state = GameState::new_with_seed(BOUNDS, 4);
        state.tick();
        state.tick();

        state.restart();

        assert_eq!(state.tick_count, 2);
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn heading_requests_are_ignored_after_game_over() {
        let mut state = state_with_snake(
            Snake::from_segments(
                vec![Position { x: 0, y: 5 }, Position { x: 1, y: 5 }],
                Direction::Left,
            ),
            Position { x: 15, y: 2 },
        );
        state.tick();

        state.request_heading(Direction::Up);
        let head = state.snake.head();
        state.tick();

        assert_eq!(state.snake.head(), head);
    }

    #[test]
    fn head_stays_adjacent_across_many_ticks() {
        let mut state = GameState::new_with_seed(BOUNDS, 5);
        let mut previous = state.snake.head();

        for turn in [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ]
        .into_iter()
        .cycle()
        .take(40)
        {
            state.request_heading(turn);
            let len_before = state.snake.len();
            let score_before = state.score;
            state.tick();
            if state.status != GameStatus::Playing {
                break;
            }

            let head = state.snake.head();
            let dx = (head.x - previous.x).abs();
            let dy = (head.y - previous.y).abs();
            assert_eq!(dx + dy, 1, "head must move exactly one rectilinear step");

            let grew = state.score > score_before;
            assert_eq!(
                state.snake.len(),
                len_before + usize::from(grew),
                "length changes only on growth"
            );
            previous = head;
        }
    }
}
