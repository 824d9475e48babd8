//! Append-only scoreboard file: one JSON entry per line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use crate::{
    rank_recent, RankedEntry, RunSummary, Scoreboard, ScoreboardConfig, ScoreboardEntry,
    ScoreboardError,
};

struct Inner {
    entries: Vec<ScoreboardEntry>,
    file: File,
}

/// A scoreboard persisted as JSON lines.
///
/// Every existing line is loaded into memory on [`open`](Self::open);
/// queries never touch the disk. New runs are appended and flushed one
/// line at a time under the same lock, so concurrent writers never
/// interleave partial lines.
pub struct JsonlScoreboard {
    path: PathBuf,
    inner: Mutex<Inner>,
    config: ScoreboardConfig,
}

impl JsonlScoreboard {
    /// Opens (or creates) the file at `path` and loads its entries.
    ///
    /// Missing parent directories are created. Malformed lines are skipped
    /// with a warning so one bad write does not lose the whole board.
    ///
    /// # Errors
    /// [`ScoreboardError::Io`] if the file cannot be created or read.
    pub fn open(path: impl AsRef<Path>, config: ScoreboardConfig) -> Result<Self, ScoreboardError> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source| ScoreboardError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(io_err)?;

        let mut entries = Vec::new();
        for (idx, line) in BufReader::new(&file).lines().enumerate() {
            let line = line.map_err(io_err)?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ScoreboardEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(source) => {
                    let err = ScoreboardError::Decode {
                        line: idx + 1,
                        source,
                    };
                    tracing::warn!(path = %path.display(), error = %err, "skipping scoreboard line");
                }
            }
        }

        tracing::info!(path = %path.display(), entries = entries.len(), "scoreboard loaded");
        Ok(Self {
            path,
            inner: Mutex::new(Inner { entries, file }),
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn append(&self, inner: &mut Inner, entry: &ScoreboardEntry) -> Result<(), ScoreboardError> {
        let mut line = serde_json::to_string(entry).map_err(ScoreboardError::Encode)?;
        line.push('\n');
        inner
            .file
            .write_all(line.as_bytes())
            .and_then(|()| inner.file.flush())
            .map_err(|source| ScoreboardError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

impl Scoreboard for JsonlScoreboard {
    fn record_run(&self, run: RunSummary) {
        let entry = ScoreboardEntry::from_run(run, Utc::now());
        let mut inner = self.lock();
        match self.append(&mut inner, &entry) {
            Ok(()) => tracing::info!(name = %entry.name, score = entry.score, "run recorded"),
            Err(err) => tracing::warn!(error = %err, "run kept in memory only"),
        }
        inner.entries.push(entry);
    }

    fn ranked_recent(&self, limit: usize, max_age_days: u32) -> Vec<RankedEntry> {
        let inner = self.lock();
        rank_recent(inner.entries.iter(), limit, max_age_days, &self.config, Utc::now())
    }

    fn config(&self) -> &ScoreboardConfig {
        &self.config
    }
}
