//! `QuizforgeServer` builder and accept loop.
//!
//! This is the entry point for running a quiz server. It ties together the
//! layers: WebSocket → protocol → session store → scoreboard.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use quizforge_protocol::{Codec, JsonCodec};
use quizforge_scoreboard::Scoreboard;
use quizforge_session::{SessionConfig, SessionStore};
use tokio::net::TcpListener;

use crate::connection::Connection;
use crate::handler::handle_connection;
use crate::QuizforgeError;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The store and
/// the scoreboard do their own locking.
pub(crate) struct ServerState<S: Scoreboard, C: Codec> {
    pub(crate) sessions: SessionStore,
    pub(crate) scoreboard: S,
    pub(crate) codec: C,
    pub(crate) idle_timeout: Duration,
}

/// Builder for configuring and starting a quiz server.
///
/// # Example
///
/// ```rust,no_run
/// use quizforge::prelude::*;
///
/// # async fn run() -> Result<(), QuizforgeError> {
/// let server = QuizforgeServer::builder()
///     .bind("0.0.0.0:8080")
///     .build(InMemoryScoreboard::default())
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct QuizforgeServerBuilder {
    bind_addr: String,
    session_config: SessionConfig,
    idle_timeout: Duration,
}

impl QuizforgeServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            session_config: SessionConfig::default(),
            idle_timeout: Duration::from_secs(60),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the session configuration.
    pub fn session_config(mut self, config: SessionConfig) -> Self {
        self.session_config = config;
        self
    }

    /// Closes connections that send nothing for this long.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Binds the listener. Uses `JsonCodec` on the wire.
    ///
    /// # Errors
    /// Returns [`QuizforgeError::Io`] if the address cannot be bound.
    pub async fn build<S: Scoreboard>(
        self,
        scoreboard: S,
    ) -> Result<QuizforgeServer<S, JsonCodec>, QuizforgeError> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "quiz server listening");

        let state = Arc::new(ServerState {
            sessions: SessionStore::new(self.session_config),
            scoreboard,
            codec: JsonCodec,
            idle_timeout: self.idle_timeout,
        });

        Ok(QuizforgeServer { listener, state })
    }
}

impl Default for QuizforgeServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound quiz server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct QuizforgeServer<S: Scoreboard, C: Codec> {
    listener: TcpListener,
    state: Arc<ServerState<S, C>>,
}

impl QuizforgeServer<quizforge_scoreboard::InMemoryScoreboard, JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> QuizforgeServerBuilder {
        QuizforgeServerBuilder::new()
    }
}

impl<S, C> QuizforgeServer<S, C>
where
    S: Scoreboard,
    C: Codec,
{
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop.
    ///
    /// Each accepted TCP stream is upgraded and served on its own task.
    /// Runs until the process is terminated.
    pub async fn run(self) -> Result<(), QuizforgeError> {
        tracing::info!("quiz server running");

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        let conn = match Connection::accept(stream).await {
                            Ok(conn) => conn,
                            Err(e) => {
                                tracing::debug!(%addr, error = %e, "websocket upgrade failed");
                                return;
                            }
                        };
                        tracing::debug!(conn_id = %conn.id(), %addr, "accepted connection");
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
