use thiserror::Error;

/// Errors the simulation can report. `Collided` is a normal step outcome and
/// deliberately not part of this enum.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// The configuration cannot produce a valid starting state.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Every cell is occupied by the snake, so no apple can be placed.
    #[error("grid is fully occupied, nowhere to place the apple")]
    GridFull,
}
