//! Game sessions and the session store for Quizforge.
//!
//! This crate owns the state machine of a quiz run:
//!
//! 1. **Creation**: validating a start request, building and shuffling the
//!    question plan, and opening the first question ([`SessionStore::create_session`])
//! 2. **Adjudication**: the single submit transition that scores an answer,
//!    spends a life, and opens the next question ([`SessionStore::submit_answer`])
//! 3. **Eviction**: dropping sessions idle past their TTL, lazily on every
//!    store access
//!
//! # How it fits in the stack
//!
//! ```text
//! Server Layer (above)  ← maps sessions to wire views, records finished runs
//!     ↕
//! Session Layer (this crate)  ← owns every run and its one state transition
//!     ↕
//! Questions Layer (below)  ← generates questions and matches answers
//! ```

mod config;
mod error;
mod session;
mod store;

pub use config::SessionConfig;
pub use error::{ErrorKind, SessionError};
pub use session::{AnswerLogEntry, GameSession, Outcome, SessionState};
pub use store::{clean_subjects, SessionStore};
