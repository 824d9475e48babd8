//! Stored entries and the ranking query shared by every backend.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::ScoreboardConfig;

/// What the server hands over when a run finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub name: String,
    pub age: u32,
    /// Grade label, e.g. `"7"` or `"university"`.
    pub grade: String,
    pub score: u32,
    pub total_questions: usize,
    pub avg_time_seconds: f64,
    /// Subjects joined for display, e.g. `"maths, history"`.
    pub subjects: String,
}

/// One stored run. Rank is not part of it; see [`RankedEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    pub name: String,
    pub age: u32,
    pub grade: String,
    pub score: u32,
    pub total_questions: usize,
    pub avg_time_seconds: f64,
    pub subjects: String,
    pub created_at: DateTime<Utc>,
}

impl ScoreboardEntry {
    /// Stamps a run with the time it was recorded.
    pub fn from_run(run: RunSummary, created_at: DateTime<Utc>) -> Self {
        Self {
            name: run.name,
            age: run.age,
            grade: run.grade,
            score: run.score,
            total_questions: run.total_questions,
            avg_time_seconds: run.avg_time_seconds,
            subjects: run.subjects,
            created_at,
        }
    }
}

/// An entry with its 1-based position in one query result.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub rank: usize,
    pub entry: ScoreboardEntry,
}

/// Best entry first: higher score, then faster average, then newer.
fn leaderboard_order(a: &ScoreboardEntry, b: &ScoreboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.avg_time_seconds.total_cmp(&b.avg_time_seconds))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Ranks the entries recorded within `max_age_days` of `now`.
///
/// The limit is clamped with [`ScoreboardConfig::clamp_limit`]. Ranks run
/// 1, 2, 3, ... over the returned slice only, without gaps for ties.
pub fn rank_recent<'a, I>(
    entries: I,
    limit: usize,
    max_age_days: u32,
    config: &ScoreboardConfig,
    now: DateTime<Utc>,
) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = &'a ScoreboardEntry>,
{
    let cutoff = now - Duration::days(i64::from(max_age_days));
    let mut recent: Vec<&ScoreboardEntry> = entries
        .into_iter()
        .filter(|e| e.created_at >= cutoff)
        .collect();
    recent.sort_by(|a, b| leaderboard_order(a, b));

    recent
        .into_iter()
        .take(config.clamp_limit(limit))
        .enumerate()
        .map(|(idx, entry)| RankedEntry {
            rank: idx + 1,
            entry: entry.clone(),
        })
        .collect()
}
