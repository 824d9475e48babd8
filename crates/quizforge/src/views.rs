//! Mapping from session and scoreboard types to client-facing views.
//!
//! Reference answers never leave the server except inside an
//! [`OutcomeView`] or the answer log, both produced after adjudication.

use quizforge_protocol::{
    AnswerLogItem, OutcomeView, ScoreboardEntryView, SessionStarted, SessionStats, Subject,
    SubjectInfo, SummaryView,
};
use quizforge_scoreboard::{RankedEntry, RunSummary};
use quizforge_session::{AnswerLogEntry, GameSession, Outcome, SessionError};

/// Rounds to two decimals for display.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn stats(session: &GameSession) -> SessionStats {
    SessionStats {
        score: session.score,
        lives: session.lives,
        current_question: session.current_question_number(),
        total_questions: session.total_questions,
        mistakes: session.mistakes(),
        average_time_seconds: round2(session.average_elapsed()),
    }
}

/// The reply to a successful start. Fails only if the session somehow has
/// no open question.
pub(crate) fn session_started(session: &GameSession) -> Result<SessionStarted, SessionError> {
    let question = session
        .current_question
        .as_ref()
        .ok_or_else(|| SessionError::GenerationFailed(session.id.clone()))?;

    Ok(SessionStarted {
        session_id: session.id.clone(),
        player_name: session.name.clone(),
        age: session.age,
        grade: session.grade_label(),
        subjects: session.subjects.clone(),
        total_questions: session.total_questions,
        stats: stats(session),
        question: question.view(),
    })
}

pub(crate) fn outcome(outcome: &Outcome) -> OutcomeView {
    OutcomeView {
        correct: outcome.correct,
        timed_out: outcome.timed_out,
        your_answer: outcome.submitted.clone(),
        correct_answer: outcome.correct_answer.clone(),
        explanation: outcome.explanation.clone(),
    }
}

fn answer_log_item(entry: &AnswerLogEntry) -> AnswerLogItem {
    AnswerLogItem {
        question_no: entry.question_no,
        subject: entry.subject,
        prompt: entry.prompt.clone(),
        your_answer: entry.submitted.clone(),
        correct_answer: entry.correct_answer.clone(),
        correct: entry.correct,
        explanation: entry.explanation.clone(),
        elapsed_seconds: round2(entry.elapsed_seconds),
        timed_out: entry.timed_out,
    }
}

pub(crate) fn scoreboard_entry(ranked: &RankedEntry) -> ScoreboardEntryView {
    let entry = &ranked.entry;
    ScoreboardEntryView {
        rank: ranked.rank,
        name: entry.name.clone(),
        age: entry.age,
        grade: entry.grade.clone(),
        score: entry.score,
        total_questions: entry.total_questions,
        avg_time_seconds: round2(entry.avg_time_seconds),
        subjects: entry.subjects.clone(),
    }
}

pub(crate) fn summary(session: &GameSession, leaderboard: &[RankedEntry]) -> SummaryView {
    SummaryView {
        score: session.score,
        total_questions: session.total_questions,
        mistakes: session.mistakes(),
        average_time_seconds: round2(session.average_elapsed()),
        answers: session.answer_log.iter().map(answer_log_item).collect(),
        leaderboard: leaderboard.iter().map(scoreboard_entry).collect(),
    }
}

/// What the scoreboard stores for a finished run. The average is kept
/// unrounded.
pub(crate) fn run_summary(session: &GameSession) -> RunSummary {
    RunSummary {
        name: session.name.clone(),
        age: session.age,
        grade: session.grade_label(),
        score: session.score,
        total_questions: session.total_questions,
        avg_time_seconds: session.average_elapsed(),
        subjects: session.subjects_display(),
    }
}

pub(crate) fn subject_list() -> Vec<SubjectInfo> {
    Subject::ALL.into_iter().map(SubjectInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use quizforge_session::SessionStore;

    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234_9), 1.23);
        assert_eq!(round2(2.005_1), 2.01);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_session_started_carries_first_question_without_answer() {
        let store = SessionStore::default();
        let session = store.create_session("Ava", 12, &["maths"]).unwrap();

        let started = session_started(&session).unwrap();

        assert_eq!(started.grade, "7");
        assert_eq!(started.total_questions, 10);
        assert_eq!(started.stats.lives, 3);
        assert_eq!(started.stats.current_question, 1);
        let json = serde_json::to_value(&started.question).unwrap();
        assert!(json.get("answer").is_none());
    }

    #[test]
    fn test_run_summary_uses_display_strings() {
        let store = SessionStore::default();
        let session = store.create_session("Ava", 30, &["history", "maths"]).unwrap();

        let run = run_summary(&session);

        assert_eq!(run.grade, "university");
        assert_eq!(run.subjects, "history, maths");
        assert_eq!(run.total_questions, 20);
    }

    #[test]
    fn test_subject_list_in_fixed_order() {
        let keys: Vec<_> = subject_list().into_iter().map(|s| s.key.key()).collect();
        assert_eq!(
            keys,
            ["maths", "chemistry", "biology", "physics", "astronomy", "geography", "history"]
        );
    }
}
