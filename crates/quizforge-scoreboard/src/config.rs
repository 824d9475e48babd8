/// Scoreboard query limits.
#[derive(Debug, Clone)]
pub struct ScoreboardConfig {
    /// Hard cap on entries returned by one query.
    pub max_entries: usize,

    /// Runs older than this many days are left out of rankings.
    pub max_age_days: u32,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            max_entries: 30,
            max_age_days: 30,
        }
    }
}

impl ScoreboardConfig {
    /// Clamps a requested limit to `1..=max_entries`.
    pub fn clamp_limit(&self, limit: usize) -> usize {
        limit.clamp(1, self.max_entries.max(1))
    }
}
