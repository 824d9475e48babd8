//! Error types for the file-backed scoreboard.

use std::path::PathBuf;

/// Failures while reading or appending the scoreboard file.
///
/// [`Scoreboard::record_run`](crate::Scoreboard::record_run) never returns
/// these; they surface from [`JsonlScoreboard::open`](crate::JsonlScoreboard::open)
/// or in warning logs.
#[derive(Debug, thiserror::Error)]
pub enum ScoreboardError {
    #[error("scoreboard file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode scoreboard entry: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored line is not a valid entry. Carries the 1-based line number.
    #[error("malformed scoreboard line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
