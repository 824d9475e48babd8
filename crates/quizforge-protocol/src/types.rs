//! Core protocol types for Quizforge's wire format.
//!
//! Everything in this module is serialized with serde and sent to (or
//! received from) the browser client. The engine crates reuse the identity
//! types and the [`Subject`] tag so that a session id means the same thing
//! on every layer.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque, unguessable identifier of one player's run.
///
/// A newtype over `String` so a question id can never be passed where a
/// session id is expected. `#[serde(transparent)]` keeps it a plain JSON
/// string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Short opaque identifier of one issued question.
///
/// Unique per issuance: the same prompt asked twice gets two ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// A quiz subject. Each variant has exactly one question generator.
///
/// Serialized as its lowercase key (`"maths"`, `"history"`, ...), which is
/// also what players send when starting a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Maths,
    Chemistry,
    Biology,
    Physics,
    Astronomy,
    Geography,
    History,
}

impl Subject {
    /// Every supported subject, in listing order.
    pub const ALL: [Subject; 7] = [
        Subject::Maths,
        Subject::Chemistry,
        Subject::Biology,
        Subject::Physics,
        Subject::Astronomy,
        Subject::Geography,
        Subject::History,
    ];

    /// The lowercase key used on the wire and in question plans.
    pub fn key(self) -> &'static str {
        match self {
            Self::Maths => "maths",
            Self::Chemistry => "chemistry",
            Self::Biology => "biology",
            Self::Physics => "physics",
            Self::Astronomy => "astronomy",
            Self::Geography => "geography",
            Self::History => "history",
        }
    }

    /// Human-readable label for subject pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Maths => "Maths",
            Self::Chemistry => "Chemistry",
            Self::Biology => "Biology",
            Self::Physics => "Physics",
            Self::Astronomy => "Astronomy",
            Self::Geography => "Geography",
            Self::History => "History",
        }
    }

    /// Looks up a subject by its exact lowercase key.
    ///
    /// Returns `None` for anything unsupported. Callers that accept user
    /// input trim and lowercase first.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One row of the subject listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub key: Subject,
    pub label: String,
}

impl From<Subject> for SubjectInfo {
    fn from(subject: Subject) -> Self {
        Self {
            key: subject,
            label: subject.label().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A question as the player sees it. Deliberately has no answer field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub subject: Subject,
    pub prompt: String,
    /// Optional SVG markup illustrating the question.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

/// Live counters rendered next to the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub lives: u32,
    /// 1-based; equals `total_questions` once the run is finished.
    pub current_question: usize,
    pub total_questions: usize,
    pub mistakes: usize,
    pub average_time_seconds: f64,
}

/// The result of one answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeView {
    pub correct: bool,
    pub timed_out: bool,
    pub your_answer: String,
    pub correct_answer: String,
    pub explanation: String,
}

/// One answered question in the end-of-run review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerLogItem {
    pub question_no: usize,
    pub subject: Subject,
    pub prompt: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub correct: bool,
    pub explanation: String,
    pub elapsed_seconds: f64,
    pub timed_out: bool,
}

/// A ranked scoreboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardEntryView {
    pub rank: usize,
    pub name: String,
    pub age: u32,
    pub grade: String,
    pub score: u32,
    pub total_questions: usize,
    pub avg_time_seconds: f64,
    pub subjects: String,
}

/// Everything shown on the game-over screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub score: u32,
    pub total_questions: usize,
    pub mistakes: usize,
    pub average_time_seconds: f64,
    pub answers: Vec<AnswerLogItem>,
    pub leaderboard: Vec<ScoreboardEntryView>,
}

/// Reply to a successful `StartSession`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStarted {
    pub session_id: SessionId,
    pub player_name: String,
    pub age: u32,
    pub grade: String,
    pub subjects: Vec<Subject>,
    pub total_questions: usize,
    pub stats: SessionStats,
    pub question: QuestionView,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Requests a client can send.
///
/// `#[serde(tag = "type")]` gives internally tagged JSON:
/// `{ "type": "StartSession", "name": "Ava", "age": 12, "subjects": ["maths"] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Start a new run.
    StartSession {
        name: String,
        /// Signed so a negative age reaches range validation.
        age: i64,
        subjects: Vec<String>,
    },

    /// Answer the currently open question.
    ///
    /// `answer` may be empty (counted as wrong); `elapsed_seconds` is the
    /// client's own stopwatch and is never trusted on its own.
    SubmitAnswer {
        session_id: SessionId,
        question_id: QuestionId,
        #[serde(default)]
        answer: String,
        #[serde(default)]
        elapsed_seconds: f64,
    },

    /// Fetch the live counters (and current question) of a run.
    GetSession { session_id: SessionId },

    /// List the supported subjects.
    ListSubjects,

    /// Fetch the ranked recent scoreboard.
    GetScoreboard {
        #[serde(default)]
        limit: Option<usize>,
    },

    /// Keep-alive / health check.
    Ping,
}

/// Replies the server sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    SessionStarted(SessionStarted),

    AnswerResult {
        finished: bool,
        outcome: OutcomeView,
        stats: SessionStats,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        next_question: Option<QuestionView>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<SummaryView>,
    },

    SessionStatus {
        session_id: SessionId,
        finished: bool,
        stats: SessionStats,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        question: Option<QuestionView>,
    },

    Subjects { subjects: Vec<SubjectInfo> },

    Scoreboard { entries: Vec<ScoreboardEntryView> },

    /// `server_time` is milliseconds since the Unix epoch.
    Pong { server_time: i64 },

    /// `code` follows HTTP conventions: 422 validation, 404 unknown
    /// session, 409 stale request, 400 malformed frame, 500 internal.
    Error { code: u16, message: String },
}

/// The top-level frame. `seq` is echoed back on the reply so the client
/// can match responses to requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<M> {
    pub seq: u64,
    pub message: M,
}

// =========================================================================
// Tests
// =========================================================================
