//! # Quizforge
//!
//! A WebSocket server for timed, multi-subject trivia runs.
//!
//! A player starts a session with a name, age, and subjects, answers
//! procedurally generated questions one at a time under a per-question time
//! limit, and finishes when lives run out or the plan is exhausted. Finished
//! runs land on a ranked scoreboard.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quizforge::prelude::*;
//!
//! # async fn run() -> Result<(), QuizforgeError> {
//! let server = QuizforgeServerBuilder::new()
//!     .bind("0.0.0.0:8080")
//!     .build(InMemoryScoreboard::default())
//!     .await?;
//! server.run().await
//! # }
//! ```

mod connection;
mod error;
mod handler;
mod server;
mod views;

pub use error::QuizforgeError;
pub use server::{QuizforgeServer, QuizforgeServerBuilder};

/// Everything needed to run a server and talk to it.
pub mod prelude {
    pub use crate::{QuizforgeError, QuizforgeServer, QuizforgeServerBuilder};

    pub use quizforge_protocol::{
        ClientMessage, Codec, Envelope, JsonCodec, QuestionId, ServerMessage, SessionId, Subject,
    };
    pub use quizforge_scoreboard::{
        InMemoryScoreboard, JsonlScoreboard, Scoreboard, ScoreboardConfig,
    };
    pub use quizforge_session::{ErrorKind, SessionConfig, SessionError};
}
