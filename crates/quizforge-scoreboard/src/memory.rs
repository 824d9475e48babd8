use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use crate::{rank_recent, RankedEntry, RunSummary, Scoreboard, ScoreboardConfig, ScoreboardEntry};

/// Keeps entries for the life of the process.
#[derive(Debug, Default)]
pub struct InMemoryScoreboard {
    entries: Mutex<Vec<ScoreboardEntry>>,
    config: ScoreboardConfig,
}

impl InMemoryScoreboard {
    pub fn new(config: ScoreboardConfig) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            config,
        }
    }

    /// Inserts an already-stamped entry, e.g. to backfill old runs.
    pub fn insert(&self, entry: ScoreboardEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Scoreboard for InMemoryScoreboard {
    fn record_run(&self, run: RunSummary) {
        tracing::info!(name = %run.name, score = run.score, "run recorded");
        self.insert(ScoreboardEntry::from_run(run, Utc::now()));
    }

    fn ranked_recent(&self, limit: usize, max_age_days: u32) -> Vec<RankedEntry> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        rank_recent(entries.iter(), limit, max_age_days, &self.config, Utc::now())
    }

    fn config(&self) -> &ScoreboardConfig {
        &self.config
    }
}
