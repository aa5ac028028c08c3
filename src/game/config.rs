use serde::{Deserialize, Serialize};

use super::error::SimError;

/// Construction-time configuration for the simulation. Immutable once the
/// simulation is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Width of the game grid in cells.
    pub grid_width: usize,
    /// Height of the game grid in cells.
    pub grid_height: usize,
    /// Length of the snake right after a reset.
    pub initial_snake_length: usize,
    /// RNG seed for apple placement and the starting direction.
    /// `None` seeds from OS entropy; a fixed value makes runs reproducible.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        // 40x30 matches the classic 800x600 window at 20px cells.
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_snake_length: 3,
            seed: None,
        }
    }
}

impl SimConfig {
    /// A configuration with a custom grid size and default everything else.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// A small grid, handy in tests.
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects configurations that would violate the simulation's invariants
    /// before any state exists.
    pub(crate) fn validate(&self) -> Result<(), SimError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.initial_snake_length == 0 {
            return Err(SimError::InvalidConfig(
                "initial snake length must be at least 1".into(),
            ));
        }
        // The starting body is a straight line that may wrap; keeping it no
        // longer than the shorter grid axis rules out self-overlap for every
        // possible starting direction.
        let shorter_axis = self.grid_width.min(self.grid_height);
        if self.initial_snake_length > shorter_axis {
            return Err(SimError::InvalidConfig(format!(
                "initial snake length {} exceeds the shorter grid axis {}",
                self.initial_snake_length, shorter_axis
            )));
        }
        // The apple needs a free cell right after reset.
        if self.initial_snake_length >= self.grid_width * self.grid_height {
            return Err(SimError::InvalidConfig(format!(
                "initial snake length {} leaves no free cell on a {}x{} grid",
                self.initial_snake_length, self.grid_width, self.grid_height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_size() {
        let config = SimConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_with_seed() {
        let config = SimConfig::small().with_seed(7);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        let mut config = SimConfig::small();
        config.grid_width = 0;
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_length_snake() {
        let mut config = SimConfig::small();
        config.initial_snake_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_snake_longer_than_shorter_axis() {
        let mut config = SimConfig::new(8, 3);
        config.initial_snake_length = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_grid_with_no_room_for_apple() {
        let mut config = SimConfig::new(1, 1);
        config.initial_snake_length = 1;
        assert!(config.validate().is_err());
    }
}
