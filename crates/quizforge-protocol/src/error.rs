//! Error types for the protocol layer.

/// Errors that can occur while turning messages into bytes and back.
///
/// Each Quizforge crate defines its own error enum, so a `ProtocolError`
/// always means "the bytes were wrong", never "the game rejected you".
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, a missing field, or an
    /// unknown message `type`.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame decoded but breaks a protocol rule (for example, a
    /// non-UTF-8 text frame).
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
