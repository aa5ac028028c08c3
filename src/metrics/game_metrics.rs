use std::time::{Duration, Instant};

/// Per-session bookkeeping across lives: wall-clock time of the current life,
/// best score seen, and how many lives were played. In-memory only.
pub struct GameMetrics {
    life_started: Instant,
    elapsed: Duration,
    pub high_score: u32,
    pub lives_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            life_started: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            lives_played: 0,
        }
    }

    /// Refresh the elapsed clock; called from the render timer.
    pub fn update(&mut self) {
        self.elapsed = self.life_started.elapsed();
    }

    pub fn on_life_start(&mut self) {
        self.life_started = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn on_life_over(&mut self, final_score: u32) {
        self.lives_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();

        metrics.elapsed = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_only_goes_up() {
        let mut metrics = GameMetrics::new();

        metrics.on_life_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.lives_played, 1);

        metrics.on_life_over(5);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.lives_played, 2);

        metrics.on_life_over(15);
        assert_eq!(metrics.high_score, 15);
    }
}
