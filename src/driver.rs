use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Direction, GridSimulation, SimConfig, Status, StepOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// The cooperative fixed-tick loop: owns the clock, input polling, and
/// rendering. Invokes exactly one simulation step per tick and decides the
/// death policy (freeze and wait for a restart key).
pub struct GameDriver {
    sim: GridSimulation,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    tick: Duration,
    should_quit: bool,
    /// Latest direction key since the previous tick, if any.
    pending_direction: Option<Direction>,
}

impl GameDriver {
    pub fn new(config: SimConfig, tick: Duration) -> Result<Self> {
        let sim = GridSimulation::new(config).context("Invalid game configuration")?;

        Ok(Self {
            sim,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick,
            should_quit: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even if the loop failed
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick);

        // Render at 30 FPS, independent of the simulation tick rate
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.advance_simulation()?;
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.sim, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.pending_direction = Some(direction);
                }
                KeyAction::Restart => {
                    self.restart();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    /// One simulation tick. A collided game stays frozen on screen until the
    /// player restarts or quits.
    fn advance_simulation(&mut self) -> Result<()> {
        if self.sim.state().status != Status::Running {
            return Ok(());
        }

        let request = self.pending_direction.take();
        let outcome = self
            .sim
            .step(request)
            .context("Simulation cannot continue")?;

        if outcome == StepOutcome::Collided {
            self.metrics.on_life_over(self.sim.state().score);
        }

        Ok(())
    }

    fn restart(&mut self) {
        self.sim.reset();
        self.metrics.on_life_start();
        self.pending_direction = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn test_driver() -> GameDriver {
        GameDriver::new(SimConfig::small().with_seed(11), Duration::from_millis(100)).unwrap()
    }

    #[test]
    fn test_driver_starts_running() {
        let driver = test_driver();
        assert_eq!(driver.sim.state().status, Status::Running);
        assert_eq!(driver.sim.state().score, 0);
    }

    #[test]
    fn test_tick_advances_the_snake() {
        let mut driver = test_driver();
        let head_before = driver.sim.state().snake.head();

        driver.advance_simulation().unwrap();

        assert_ne!(driver.sim.state().snake.head(), head_before);
        assert_eq!(driver.sim.state().steps, 1);
    }

    #[test]
    fn test_pending_direction_is_consumed_by_one_tick() {
        let mut driver = test_driver();
        let current = driver.sim.state().snake.direction();
        // Pick a perpendicular turn so the simulation applies it.
        let turn = match current {
            Direction::Up | Direction::Down => Direction::Left,
            Direction::Left | Direction::Right => Direction::Up,
        };

        driver.pending_direction = Some(turn);
        driver.advance_simulation().unwrap();

        assert_eq!(driver.sim.state().snake.direction(), turn);
        assert_eq!(driver.pending_direction, None);
    }

    #[test]
    fn test_restart_clears_state_and_pending_input() {
        let mut driver = test_driver();
        driver.pending_direction = Some(Direction::Up);
        driver.advance_simulation().unwrap();

        driver.restart();

        assert_eq!(driver.sim.state().status, Status::Running);
        assert_eq!(driver.sim.state().steps, 0);
        assert_eq!(driver.pending_direction, None);
        let head = driver.sim.state().snake.head();
        assert_eq!(head, Cell::new(5, 5));
    }
}
