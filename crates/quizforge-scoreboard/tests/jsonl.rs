//! File-backed scoreboard: persistence across reopen and ranking.

use std::path::PathBuf;

use quizforge_scoreboard::{JsonlScoreboard, RunSummary, Scoreboard, ScoreboardConfig};

/// A fresh path under the system temp dir; removed on drop.
struct TempBoard(PathBuf);

impl TempBoard {
    fn new() -> Self {
        let name = format!("quizforge-scoreboard-{:016x}", rand::random::<u64>());
        Self(std::env::temp_dir().join(name).join("scores.jsonl"))
    }
}

impl Drop for TempBoard {
    fn drop(&mut self) {
        if let Some(dir) = self.0.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

fn run(name: &str, score: u32, avg: f64) -> RunSummary {
    RunSummary {
        name: name.into(),
        age: 12,
        grade: "7".into(),
        score,
        total_questions: 10,
        avg_time_seconds: avg,
        subjects: "maths, history".into(),
    }
}

#[test]
fn test_open_creates_missing_file_and_directories() {
    let tmp = TempBoard::new();

    let board = JsonlScoreboard::open(&tmp.0, ScoreboardConfig::default()).unwrap();

    assert!(tmp.0.exists());
    assert!(board.is_empty());
    assert!(board.leaderboard(None).is_empty());
}

#[test]
fn test_recorded_runs_survive_reopen() {
    let tmp = TempBoard::new();
    {
        let board = JsonlScoreboard::open(&tmp.0, ScoreboardConfig::default()).unwrap();
        board.record_run(run("Ava", 9, 3.2));
        board.record_run(run("Ben", 9, 2.1));
        board.record_run(run("Cy", 4, 1.0));
    }

    let board = JsonlScoreboard::open(&tmp.0, ScoreboardConfig::default()).unwrap();
    let top = board.leaderboard(None);

    assert_eq!(board.len(), 3);
    let names: Vec<_> = top.iter().map(|r| r.entry.name.as_str()).collect();
    assert_eq!(names, ["Ben", "Ava", "Cy"]);
    assert_eq!(top[2].rank, 3);
    assert_eq!(top[0].entry.subjects, "maths, history");
}

#[test]
fn test_malformed_lines_are_skipped_on_open() {
    let tmp = TempBoard::new();
    {
        let board = JsonlScoreboard::open(&tmp.0, ScoreboardConfig::default()).unwrap();
        board.record_run(run("Ava", 5, 2.0));
    }
    let mut contents = std::fs::read_to_string(&tmp.0).unwrap();
    contents.push_str("{not json}\n\n");
    std::fs::write(&tmp.0, contents).unwrap();

    let board = JsonlScoreboard::open(&tmp.0, ScoreboardConfig::default()).unwrap();
    board.record_run(run("Ben", 6, 2.0));

    assert_eq!(board.len(), 2);
    assert_eq!(board.leaderboard(None)[0].entry.name, "Ben");
}

#[test]
fn test_limit_is_clamped_to_configured_maximum() {
    let tmp = TempBoard::new();
    let config = ScoreboardConfig {
        max_entries: 3,
        ..ScoreboardConfig::default()
    };
    let board = JsonlScoreboard::open(&tmp.0, config).unwrap();
    for i in 0..6 {
        board.record_run(run(&format!("p{i}"), i, 1.0));
    }

    assert_eq!(board.leaderboard(Some(50)).len(), 3);
    assert_eq!(board.leaderboard(Some(0)).len(), 1);
    assert_eq!(board.leaderboard(Some(0))[0].entry.name, "p5");
}
