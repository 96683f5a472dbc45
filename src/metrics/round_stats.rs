use std::time::{Duration, Instant};

/// Session-local bookkeeping shown in the header: round timer, number of
/// rounds played and the best score seen since launch
pub struct RoundStats {
    round_start: Instant,
    pub elapsed: Duration,
    pub best_score: u32,
    pub rounds_played: u32,
}

impl RoundStats {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
        }
    }

    /// Refresh the running round timer
    pub fn update(&mut self) {
        self.elapsed = self.round_start.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        self.best_score = self.best_score.max(final_score);
    }

    /// Elapsed round time as `MM:SS`
    pub fn format_time(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for RoundStats {
    fn default() -> Self {
        Self::new()
    }
}
