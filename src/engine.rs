use crate::game::{GameState, GameStatus};
use crate::input::Direction;
use crate::sensor::TiltSensor;
use crate::tilt::TiltResolver;

/// Owns the game state and its input sources, advancing one tick at a time.
///
/// The sensor is an injected capability: anything implementing
/// [`TiltSensor`] can steer the snake, and the engine runs keyboard-only
/// when no sensor is attached. The caller provides the tick cadence; the
/// engine itself never blocks or schedules.
pub struct Engine {
    state: GameState,
    resolver: TiltResolver,
    sensor: Option<Box<dyn TiltSensor>>,
}

impl Engine {
    /// Creates an engine without tilt input.
    #[must_use]
    pub fn new(state: GameState, resolver: TiltResolver) -> Self {
        Self {
            state,
            resolver,
            sensor: None,
        }
    }

    /// Attaches a motion sensor.
    #[must_use]
    pub fn with_sensor(mut self, sensor: Box<dyn TiltSensor>) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Returns whether tilt input is attached.
    #[must_use]
    pub fn sensor_attached(&self) -> bool {
        self.sensor.is_some()
    }

    /// Read-only snapshot of the game state for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs one fixed-interval tick: sample tilt, then advance the game.
    ///
    /// A failed sensor read contributes nothing this tick; it never stalls
    /// or aborts the game.
    pub fn tick(&mut self) {
        self.sample_tilt();
        self.state.tick();
    }

    fn sample_tilt(&mut self) {
        // Skip sampling while paused so a tilted idle device cannot queue
        // a heading change that fires on resume.
        if self.state.status != GameStatus::Playing {
            return;
        }

        let Some(sensor) = self.sensor.as_mut() else {
            return;
        };

        if let Ok(sample) = sensor.read_tilt() {
            if let Some(heading) = self.resolver.resolve(sample, self.state.snake.direction()) {
                self.state.request_heading(heading);
            }
        }
    }

    /// Buffers a keyboard-originated heading change; goes through the same
    /// reversal-rejection rule as tilt input.
    pub fn request_heading(&mut self, direction: Direction) {
        self.state.request_heading(direction);
    }

    /// Suspends or resumes ticking.
    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    /// Starts a new session after a game over.
    pub fn restart(&mut self) {
        self.state.restart();
    }
}
