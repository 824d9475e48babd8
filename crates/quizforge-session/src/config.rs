//! Session store configuration.

use std::time::Duration;

/// Limits that shape every run.
///
/// Override individual fields with struct-update syntax:
///
/// ```rust
/// use std::time::Duration;
/// use quizforge_session::SessionConfig;
///
/// let config = SessionConfig {
///     session_ttl: Duration::from_secs(600),
///     ..SessionConfig::default()
/// };
/// assert_eq!(config.questions_per_subject, 10);
/// ```
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Youngest supported player (inclusive).
    pub min_age: u32,

    /// Oldest supported player (inclusive).
    pub max_age: u32,

    /// Questions each chosen subject contributes to the plan.
    pub questions_per_subject: usize,

    /// Per-question time budget. An answer at or past this is a timeout.
    pub max_seconds_per_question: f64,

    /// Upper bound on starting lives (`2 + subjects`, capped here).
    pub max_lives: u32,

    /// Inactivity window after which a session is evicted, measured from
    /// its last update.
    pub session_ttl: Duration,

    /// Player names are trimmed and cut to this many characters.
    pub max_name_chars: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_age: 8,
            max_age: 99,
            questions_per_subject: 10,
            max_seconds_per_question: 180.0,
            max_lives: 5,
            session_ttl: Duration::from_secs(6 * 60 * 60),
            max_name_chars: 30,
        }
    }
}

impl SessionConfig {
    /// Returns `true` if `age` is inside the supported range.
    pub fn is_valid_age(&self, age: u32) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }

    /// Starting lives for a run over `subject_count` subjects.
    pub fn lives_for(&self, subject_count: usize) -> u32 {
        let wanted = 2u32.saturating_add(subject_count as u32);
        wanted.min(self.max_lives)
    }
}
