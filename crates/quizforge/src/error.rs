//! Unified error type for the Quizforge server.

use quizforge_protocol::ProtocolError;
use quizforge_scoreboard::ScoreboardError;
use quizforge_session::SessionError;

/// Top-level error that wraps every crate-specific error.
///
/// The `#[from]` attribute on each variant generates the `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum QuizforgeError {
    /// Encoding a reply or decoding a frame failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session store rejected a request.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Opening the scoreboard failed.
    #[error(transparent)]
    Scoreboard(#[from] ScoreboardError),

    /// Binding or accepting on the listener failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The WebSocket handshake or a frame send/receive failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}
