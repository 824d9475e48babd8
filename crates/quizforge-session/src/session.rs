//! Session types: one player's run and the single transition that moves it.
//!
//! A [`GameSession`] is a plain value. All mutation goes through
//! [`GameSession::submit`], which the [`SessionStore`](crate::SessionStore)
//! calls while holding its lock.
//!
//! ```text
//!   Active ──(submit: lives > 0 and more plan left)──→ Active
//!     │
//!     └────(submit: lives hit 0 or last plan entry)──→ Finished
//! ```

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chrono::{DateTime, Utc};
use quizforge_protocol::{QuestionId, SessionId, Subject};
use quizforge_questions::{generate, GradeTier, Question};
use rand::rngs::StdRng;

use crate::{SessionConfig, SessionError};

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A question is open and answers are accepted.
    Active,
    /// Lives ran out or the plan was exhausted. Immutable from here on.
    Finished,
}

// ---------------------------------------------------------------------------
// AnswerLogEntry
// ---------------------------------------------------------------------------

/// Immutable record of one answered question.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerLogEntry {
    /// 1-based position in the plan.
    pub question_no: usize,
    pub question_id: QuestionId,
    pub subject: Subject,
    pub prompt: String,
    /// What the player typed, trimmed.
    pub submitted: String,
    /// The reference answer in display form.
    pub correct_answer: String,
    pub correct: bool,
    pub explanation: String,
    pub elapsed_seconds: f64,
    pub timed_out: bool,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The result of one submission.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub correct: bool,
    pub timed_out: bool,
    pub correct_answer: String,
    pub explanation: String,
    /// The submission echoed back, trimmed.
    pub submitted: String,
    /// `true` if this submission ended the run.
    pub finished: bool,
    /// The newly opened question; `None` once finished.
    pub next_question: Option<Question>,
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// One player's run.
///
/// Snapshots handed out by the store are clones; changing one has no
/// effect on the stored session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: SessionId,
    pub name: String,
    pub age: u32,
    pub grade: GradeTier,
    /// Cleaned subjects in the order the player chose them.
    pub subjects: Vec<Subject>,
    /// One entry per question, shuffled once at creation.
    pub plan: Vec<Subject>,
    /// Equals the initial plan length. Never changes.
    pub total_questions: usize,
    pub lives: u32,
    pub score: u32,
    /// Index into `plan` of the open question.
    pub cursor: usize,
    pub current_question: Option<Question>,
    pub answer_log: Vec<AnswerLogEntry>,
    pub elapsed_times: Vec<f64>,
    /// Prompts already issued, per subject.
    pub used_prompts: HashMap<Subject, HashSet<String>>,
    pub finished: bool,
    pub created_at: DateTime<Utc>,
    /// Monotonic time of the last create/lookup/submit. The TTL runs from here.
    pub updated_at: Instant,

    /// Private per-session random source. Never shared across sessions.
    pub(crate) rng: StdRng,
}

impl GameSession {
    /// Creates an active session with an empty plan cursor and no question
    /// yet. The caller opens the first question.
    pub(crate) fn new(
        id: SessionId,
        name: String,
        age: u32,
        subjects: Vec<Subject>,
        plan: Vec<Subject>,
        lives: u32,
        rng: StdRng,
    ) -> Self {
        Self {
            id,
            name,
            age,
            grade: GradeTier::from_age(age),
            subjects,
            total_questions: plan.len(),
            plan,
            lives,
            score: 0,
            cursor: 0,
            current_question: None,
            answer_log: Vec::new(),
            elapsed_times: Vec::new(),
            used_prompts: HashMap::new(),
            finished: false,
            created_at: Utc::now(),
            updated_at: Instant::now(),
            rng,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.finished {
            SessionState::Finished
        } else {
            SessionState::Active
        }
    }

    /// 1-based number of the question being shown. Equals
    /// `total_questions` once the run is finished.
    pub fn current_question_number(&self) -> usize {
        if self.finished {
            self.total_questions
        } else {
            self.cursor + 1
        }
    }

    /// Number of wrong (or timed-out) answers so far.
    pub fn mistakes(&self) -> usize {
        self.answer_log.iter().filter(|e| !e.correct).count()
    }

    pub fn questions_answered(&self) -> usize {
        self.answer_log.len()
    }

    /// Mean of the recorded elapsed times; 0 when nothing was answered.
    pub fn average_elapsed(&self) -> f64 {
        if self.elapsed_times.is_empty() {
            return 0.0;
        }
        self.elapsed_times.iter().sum::<f64>() / self.elapsed_times.len() as f64
    }

    pub fn grade_label(&self) -> String {
        self.grade.label()
    }

    /// Subjects joined for display, e.g. `"maths, history"`.
    pub fn subjects_display(&self) -> String {
        self.subjects
            .iter()
            .map(|s| s.key())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Instant::now();
    }

    /// Generates the question for the plan entry under the cursor and makes
    /// it the open question. Returns `None` if the cursor is past the plan.
    pub(crate) fn open_question(&mut self) -> Option<&Question> {
        let subject = *self.plan.get(self.cursor)?;
        let used = self.used_prompts.entry(subject).or_default();
        let question = generate(subject, self.age, &mut self.rng, used);
        self.current_question = Some(question);
        self.touch();
        self.current_question.as_ref()
    }

    /// The one state transition: adjudicate an answer to the open question.
    ///
    /// `client_elapsed` is the client's stopwatch; the recorded time is the
    /// larger of it and the server's own measurement, clamped to
    /// `[0, max_seconds_per_question]`. A timed-out answer is wrong no
    /// matter what it says.
    ///
    /// # Errors
    /// - [`SessionError::AlreadyFinished`]: the run is over
    /// - [`SessionError::NoOpenQuestion`]: nothing to answer
    /// - [`SessionError::QuestionMismatch`]: stale or duplicate submission
    ///
    /// On error the session is untouched.
    pub(crate) fn submit(
        &mut self,
        question_id: &QuestionId,
        submitted: &str,
        client_elapsed: f64,
        config: &SessionConfig,
    ) -> Result<Outcome, SessionError> {
        if self.finished {
            return Err(SessionError::AlreadyFinished(self.id.clone()));
        }
        let question = match &self.current_question {
            Some(q) if &q.id == question_id => q,
            Some(q) => {
                return Err(SessionError::QuestionMismatch {
                    expected: q.id.clone(),
                    got: question_id.clone(),
                });
            }
            None => return Err(SessionError::NoOpenQuestion(self.id.clone())),
        };

        let limit = config.max_seconds_per_question;
        let client = if client_elapsed.is_finite() {
            client_elapsed.max(0.0)
        } else {
            0.0
        };
        let server = question.age().as_secs_f64();
        let elapsed = client.max(server).min(limit);
        let timed_out = elapsed >= limit;

        let submitted = submitted.trim().to_string();
        let correct = !timed_out && question.answer.matches(&submitted);
        let correct_answer = question.answer.format();
        let explanation = question.explanation.clone();

        let entry = AnswerLogEntry {
            question_no: self.cursor + 1,
            question_id: question.id.clone(),
            subject: question.subject,
            prompt: question.prompt.clone(),
            submitted: submitted.clone(),
            correct_answer: correct_answer.clone(),
            correct,
            explanation: explanation.clone(),
            elapsed_seconds: elapsed,
            timed_out,
        };

        if correct {
            self.score += 1;
        } else {
            self.lives = self.lives.saturating_sub(1);
        }
        self.elapsed_times.push(elapsed);
        self.answer_log.push(entry);

        let is_last = self.cursor + 1 >= self.total_questions;
        let finished = self.lives == 0 || is_last;

        let next_question = if finished {
            self.finished = true;
            self.current_question = None;
            None
        } else {
            self.cursor += 1;
            self.open_question().cloned()
        };
        self.touch();

        Ok(Outcome {
            correct,
            timed_out,
            correct_answer,
            explanation,
            submitted,
            finished,
            next_question,
        })
    }
}
