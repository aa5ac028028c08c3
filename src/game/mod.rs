//! Deterministic grid-simulation core for toroidal Snake.
//!
//! No I/O, no rendering, no clocks in here: the engine consumes already
//! decoded direction requests, advances one discrete step per call, and
//! exposes read-only state for the driver layer to draw.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use config::SimConfig;
pub use direction::Direction;
pub use engine::{GridSimulation, StepOutcome};
pub use error::SimError;
pub use state::{Apple, Cell, SimState, Snake, Status};
