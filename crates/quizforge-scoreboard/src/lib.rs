//! The scoreboard for Quizforge: where finished runs go.
//!
//! Recording is best-effort. A run that fails to persist is logged and
//! dropped; it never fails the request that finished it.
//!
//! # Key types
//!
//! - [`Scoreboard`]: the trait the server talks to
//! - [`InMemoryScoreboard`]: process-lifetime storage, for tests and demos
//! - [`JsonlScoreboard`]: append-only JSON-lines file, reloaded on open
//! - [`RankedEntry`]: an entry plus the rank assigned by the query

mod config;
mod entry;
mod error;
mod jsonl;
mod memory;

pub use config::ScoreboardConfig;
pub use entry::{rank_recent, RankedEntry, RunSummary, ScoreboardEntry};
pub use error::ScoreboardError;
pub use jsonl::JsonlScoreboard;
pub use memory::InMemoryScoreboard;

/// Receives finished runs and answers ranking queries.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` so one instance can sit behind an `Arc` and be
/// shared by every connection task for the life of the server.
pub trait Scoreboard: Send + Sync + 'static {
    /// Appends a finished run. Failures are logged, never returned.
    fn record_run(&self, run: RunSummary);

    /// Entries from the last `max_age_days`, best first, at most `limit`
    /// of them (clamped to `1..=config().max_entries`).
    fn ranked_recent(&self, limit: usize, max_age_days: u32) -> Vec<RankedEntry>;

    fn config(&self) -> &ScoreboardConfig;

    /// [`ranked_recent`](Self::ranked_recent) with the configured window,
    /// and the configured maximum when `limit` is `None`.
    fn leaderboard(&self, limit: Option<usize>) -> Vec<RankedEntry> {
        let config = self.config();
        self.ranked_recent(limit.unwrap_or(config.max_entries), config.max_age_days)
    }
}
