//! Torus Snake: the classic game on a wrap-around grid.
//!
//! The crate is split along the simulation boundary:
//! - [`game`] is the deterministic core: snake, apple, toroidal movement,
//!   collision and apple-placement rules. Pure in-memory state, seedable
//!   randomness, no I/O.
//! - [`input`], [`render`] and [`driver`] are the terminal front end: keyboard
//!   decoding, ratatui drawing, and the fixed-tick loop that feeds the core.

pub mod driver;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
