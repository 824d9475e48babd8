//! The `Question` value issued to a player.

use std::time::{Duration, Instant};

use quizforge_protocol::{QuestionId, QuestionView, Subject};
use rand::Rng;

use crate::AnswerValue;

/// One issued question. Immutable once created.
///
/// `created_at` is the server's monotonic clock at issuance; the session
/// store measures elapsed answer time from it, so a client can't shorten
/// its own stopwatch.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: QuestionId,
    pub subject: Subject,
    pub prompt: String,
    pub answer: AnswerValue,
    pub explanation: String,
    pub diagram: Option<String>,
    pub created_at: Instant,
}

impl Question {
    /// Assembles a question from a generator draft, assigning a fresh id.
    pub(crate) fn issue<R: Rng + ?Sized>(
        subject: Subject,
        draft: Draft,
        rng: &mut R,
    ) -> Self {
        Self {
            id: next_question_id(rng),
            subject,
            prompt: draft.prompt,
            answer: draft.answer,
            explanation: draft.explanation,
            diagram: draft.diagram,
            created_at: Instant::now(),
        }
    }

    /// Wall-clock time since issuance.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// The client-facing view: everything except the answer.
    pub fn view(&self) -> QuestionView {
        QuestionView {
            id: self.id.clone(),
            subject: self.subject,
            prompt: self.prompt.clone(),
            diagram: self.diagram.clone(),
        }
    }
}

/// What a subject generator produces before an id is attached.
#[derive(Debug, Clone)]
pub(crate) struct Draft {
    pub(crate) prompt: String,
    pub(crate) answer: AnswerValue,
    pub(crate) explanation: String,
    pub(crate) diagram: Option<String>,
}

impl Draft {
    pub(crate) fn new(
        prompt: impl Into<String>,
        answer: AnswerValue,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            answer,
            explanation: explanation.into(),
            diagram: None,
        }
    }

    pub(crate) fn with_diagram(mut self, svg: String) -> Self {
        self.diagram = Some(svg);
        self
    }
}

/// 12 lowercase hex characters (48 bits) drawn from the session's source.
fn next_question_id<R: Rng + ?Sized>(rng: &mut R) -> QuestionId {
    let bits: u64 = rng.random::<u64>() & 0xffff_ffff_ffff;
    QuestionId::new(format!("{bits:012x}"))
}
