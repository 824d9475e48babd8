//! Wire protocol for Quizforge.
//!
//! This crate defines the vocabulary shared by every other layer:
//!
//! - **Identity** ([`SessionId`], [`QuestionId`], [`Subject`]): the
//!   newtypes and tags the core engine is keyed by.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`], [`Envelope`]):
//!   what travels between a player's browser and the server.
//! - **Views** ([`QuestionView`], [`SessionStats`], ...): the client-facing
//!   shapes. None of them carries a reference answer.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): bytes in, messages out.
//!
//! ```text
//! Transport (frames) → Protocol (Envelope) → Session Store (game state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    AnswerLogItem, ClientMessage, Envelope, OutcomeView, QuestionId,
    QuestionView, ScoreboardEntryView, ServerMessage, SessionId,
    SessionStarted, SessionStats, Subject, SubjectInfo, SummaryView,
};
