use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SimConfig;
use super::direction::Direction;
use super::error::SimError;
use super::state::{Apple, Cell, SimState, Snake, Status};

/// Rejection-sampling attempts for apple placement before falling back to
/// enumerating the free cells. The fallback bounds the loop on dense grids.
const APPLE_SAMPLE_ATTEMPTS: u32 = 64;

/// What a single tick of the simulation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved; nothing else happened.
    Continued,
    /// The snake ate the apple and grew by one cell.
    Fed,
    /// The snake ran into itself. Terminal until `reset`.
    Collided,
}

/// The deterministic grid simulation: one snake, one apple, a toroidal grid.
///
/// Advances exactly one discrete step per [`GridSimulation::step`] call. Holds
/// no notion of time; pacing belongs to the driver. All randomness flows
/// through one seedable RNG, so a fixed [`SimConfig::seed`] makes every run
/// reproducible.
pub struct GridSimulation {
    config: SimConfig,
    rng: StdRng,
    state: SimState,
}

impl GridSimulation {
    /// Builds the simulation and deals the initial state, rejecting invalid
    /// configurations before any state exists.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = Self::initial_state(&config, &mut rng);
        Ok(Self { config, rng, state })
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn grid_dimensions(&self) -> (usize, usize) {
        (self.config.grid_width, self.config.grid_height)
    }

    /// Advances the world by one tick.
    ///
    /// `request` is the direction the player asked for since the last tick, if
    /// any. A request that would reverse the snake onto itself is dropped and
    /// the snake keeps its current heading.
    ///
    /// Once `Collided`, further calls are no-ops that keep reporting
    /// `Collided`; only [`GridSimulation::reset`] returns to `Running`.
    pub fn step(&mut self, request: Option<Direction>) -> Result<StepOutcome, SimError> {
        if self.state.status == Status::Collided {
            return Ok(StepOutcome::Collided);
        }

        if let Some(requested) = request {
            if !requested.is_opposite(self.state.snake.direction()) {
                self.state.snake.set_direction(requested);
            }
        }

        let new_head = self.state.snake.head().stepped(
            self.state.snake.direction(),
            self.config.grid_width,
            self.config.grid_height,
        );

        let grew = new_head == self.state.apple.position();
        self.state.snake.advance(new_head, grew);
        self.state.steps += 1;

        // Collision is judged on the updated body: a head landing on the cell
        // the tail just vacated is legal, a duplicated head cell is not.
        if self.state.snake.head_overlaps_body() {
            self.state.status = Status::Collided;
            return Ok(StepOutcome::Collided);
        }

        if grew {
            self.state.score += 1;
            let cell = Self::place_apple(&mut self.rng, &self.config, &self.state.snake)?;
            self.state.apple.relocate(cell);
            return Ok(StepOutcome::Fed);
        }

        Ok(StepOutcome::Continued)
    }

    /// Starts a fresh life: straight snake at the grid center with a random
    /// starting direction, apple on a free cell, counters cleared.
    ///
    /// The caller invokes this after a `Collided` outcome when its policy is
    /// restart-on-death; the simulation never resets itself.
    pub fn reset(&mut self) -> &SimState {
        self.state = Self::initial_state(&self.config, &mut self.rng);
        &self.state
    }

    fn initial_state(config: &SimConfig, rng: &mut StdRng) -> SimState {
        let center = Cell::new(
            config.grid_width as i32 / 2,
            config.grid_height as i32 / 2,
        );
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let snake = Snake::new(
            center,
            direction,
            config.initial_snake_length,
            config.grid_width,
            config.grid_height,
        );
        // Validation keeps the starting body strictly smaller than the grid.
        let apple = Self::place_apple(rng, config, &snake)
            .expect("validated config leaves at least one free cell");
        SimState {
            snake,
            apple: Apple::new(apple),
            status: Status::Running,
            score: 0,
            steps: 0,
        }
    }

    /// Picks a uniformly random cell not occupied by the snake.
    ///
    /// Rejection sampling first; past the attempt bound, enumerate the free
    /// cells and draw from them so the loop terminates even on a nearly full
    /// grid. A grid with no free cell at all is `SimError::GridFull`.
    fn place_apple(rng: &mut StdRng, config: &SimConfig, snake: &Snake) -> Result<Cell, SimError> {
        for _ in 0..APPLE_SAMPLE_ATTEMPTS {
            let cell = Cell::new(
                rng.gen_range(0..config.grid_width as i32),
                rng.gen_range(0..config.grid_height as i32),
            );
            if !snake.contains(cell) {
                return Ok(cell);
            }
        }

        let free: Vec<Cell> = (0..config.grid_height as i32)
            .flat_map(|y| (0..config.grid_width as i32).map(move |x| Cell::new(x, y)))
            .filter(|&cell| !snake.contains(cell))
            .collect();

        if free.is_empty() {
            return Err(SimError::GridFull);
        }
        Ok(free[rng.gen_range(0..free.len())])
    }
}
