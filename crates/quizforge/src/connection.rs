//! A single client WebSocket, owned by its handler task.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::QuizforgeError;

/// Counter for generating unique connection ids.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique id used only to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ConnectionId(u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// An upgraded WebSocket connection.
///
/// Requests are answered one at a time on the task that owns this value,
/// so no lock is needed around the stream.
pub(crate) struct Connection {
    id: ConnectionId,
    ws: WebSocketStream<TcpStream>,
}

impl Connection {
    /// Performs the WebSocket upgrade on an accepted TCP stream.
    pub(crate) async fn accept(stream: TcpStream) -> Result<Self, QuizforgeError> {
        let ws = tokio_tungstenite::accept_async(stream).await?;
        let id = ConnectionId(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
        Ok(Self { id, ws })
    }

    pub(crate) fn id(&self) -> ConnectionId {
        self.id
    }

    /// Sends one JSON reply as a text frame.
    pub(crate) async fn send(&mut self, data: Vec<u8>) -> Result<(), QuizforgeError> {
        let text = String::from_utf8(data).map_err(|e| {
            quizforge_protocol::ProtocolError::InvalidMessage(format!("reply is not UTF-8: {e}"))
        })?;
        self.ws.send(Message::Text(text.into())).await?;
        Ok(())
    }

    /// Waits for the next data frame.
    ///
    /// Text and binary frames are both returned as bytes. Ping/pong and raw
    /// frames are skipped. `None` means the peer closed the connection.
    pub(crate) async fn recv(&mut self) -> Result<Option<Vec<u8>>, QuizforgeError> {
        loop {
            match self.ws.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text.as_bytes().to_vec())),
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }
}
