//! Error types for the session layer.

use quizforge_protocol::{QuestionId, SessionId};

/// Errors returned by [`SessionStore`](crate::SessionStore) operations.
///
/// None of these mutate state: a failed call leaves every session exactly
/// as it was. Use [`SessionError::kind`] to decide how to present one.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The player name was empty after trimming.
    #[error("name is required")]
    EmptyName,

    /// The subject list was empty.
    #[error("please choose at least one subject")]
    NoSubjects,

    /// The age is outside the supported range.
    #[error("age must be between {min} and {max}, got {age}")]
    AgeOutOfRange { age: i64, min: u32, max: u32 },

    /// Subjects were given, but none is supported after cleaning.
    #[error("no supported subjects were provided")]
    NoSupportedSubjects,

    /// No session with this id: never created, or evicted after its TTL.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// The run is over; no further answers are accepted.
    #[error("session {0} has already finished")]
    AlreadyFinished(SessionId),

    /// The session has no open question to answer.
    #[error("session {0} has no active question")]
    NoOpenQuestion(SessionId),

    /// The answer is for a question other than the open one: a stale or
    /// duplicate submission from a client that fell behind.
    #[error("question {got} does not match the active question {expected}")]
    QuestionMismatch { expected: QuestionId, got: QuestionId },

    /// A new session ended up without a first question.
    #[error("could not generate the first question for session {0}")]
    GenerationFailed(SessionId),
}

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input; nothing was created.
    Validation,
    /// Unknown or expired session; start a new one.
    NotFound,
    /// Stale or duplicate request against a live session.
    Conflict,
    /// A broken invariant inside the engine.
    Internal,
}

impl ErrorKind {
    /// HTTP-style status code for the wire.
    pub fn code(self) -> u16 {
        match self {
            Self::Validation => 422,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

impl SessionError {
    /// Which family this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyName
            | Self::NoSubjects
            | Self::AgeOutOfRange { .. }
            | Self::NoSupportedSubjects => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyFinished(_)
            | Self::NoOpenQuestion(_)
            | Self::QuestionMismatch { .. } => ErrorKind::Conflict,
            Self::GenerationFailed(_) => ErrorKind::Internal,
        }
    }
}
