use std::path::{Path, PathBuf};

use quizforge::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Process settings read from the environment.
#[derive(Debug, PartialEq)]
struct DemoConfig {
    /// `QUIZFORGE_BIND`
    bind: String,
    /// `QUIZFORGE_SCOREBOARD`: JSONL file path; in-memory when unset.
    scoreboard: Option<PathBuf>,
}

impl DemoConfig {
    fn from_env() -> Self {
        Self::from_vars(
            std::env::var("QUIZFORGE_BIND").ok(),
            std::env::var("QUIZFORGE_SCOREBOARD").ok(),
        )
    }

    fn from_vars(bind: Option<String>, scoreboard: Option<String>) -> Self {
        let non_blank = |v: String| {
            let v = v.trim().to_string();
            (!v.is_empty()).then_some(v)
        };
        Self {
            bind: bind.and_then(non_blank).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            scoreboard: scoreboard.and_then(non_blank).map(PathBuf::from),
        }
    }
}

// ---------------------------------------------------------------------------
// Server bootstrap
// ---------------------------------------------------------------------------

fn open_jsonl(path: &Path) -> Result<JsonlScoreboard, QuizforgeError> {
    Ok(JsonlScoreboard::open(path, ScoreboardConfig::default())?)
}

async fn serve<S: Scoreboard>(config: &DemoConfig, scoreboard: S) -> Result<(), QuizforgeError> {
    let server = QuizforgeServerBuilder::new()
        .bind(&config.bind)
        .build(scoreboard)
        .await?;
    tracing::info!(addr = %server.local_addr()?, "quiz server ready");
    server.run().await
}

#[tokio::main]
async fn main() -> Result<(), QuizforgeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DemoConfig::from_env();
    match &config.scoreboard {
        Some(path) => {
            let board = open_jsonl(path)?;
            serve(&config, board).await?;
        }
        None => {
            tracing::warn!("QUIZFORGE_SCOREBOARD not set, scores are kept in memory only");
            serve(&config, InMemoryScoreboard::default()).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_defaults() {
        let config = DemoConfig::from_vars(None, None);
        assert_eq!(config.bind, "127.0.0.1:8080");
        assert!(config.scoreboard.is_none());
    }

    #[test]
    fn test_from_vars_blank_values_fall_back() {
        let config = DemoConfig::from_vars(Some("  ".into()), Some(String::new()));
        assert_eq!(config, DemoConfig::from_vars(None, None));
    }

    #[test]
    fn test_from_vars_overrides() {
        let config = DemoConfig::from_vars(
            Some("0.0.0.0:9000".into()),
            Some("data/scores.jsonl".into()),
        );
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.scoreboard, Some(PathBuf::from("data/scores.jsonl")));
    }

    #[test]
    fn test_open_jsonl_on_directory_is_scoreboard_error() {
        let result = open_jsonl(&std::env::temp_dir());
        assert!(matches!(result, Err(QuizforgeError::Scoreboard(_))));
    }
}
