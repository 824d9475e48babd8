//! Per-connection handler: decode requests, run them, send replies.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Receive an envelope (or close on idle timeout)
//!   2. Decode it; a malformed frame gets a 400 error reply
//!   3. Dispatch the request to the session store or scoreboard
//!   4. Reply with the same `seq`

use std::sync::Arc;

use quizforge_protocol::{ClientMessage, Codec, Envelope, QuestionId, ServerMessage, SessionId};
use quizforge_scoreboard::{RankedEntry, RunSummary, Scoreboard};
use quizforge_session::SessionError;

use crate::connection::Connection;
use crate::server::ServerState;
use crate::{views, QuizforgeError};

/// Handles a single connection from upgrade to close.
pub(crate) async fn handle_connection<S, C>(
    mut conn: Connection,
    state: Arc<ServerState<S, C>>,
) -> Result<(), QuizforgeError>
where
    S: Scoreboard,
    C: Codec,
{
    let conn_id = conn.id();

    loop {
        let data = match tokio::time::timeout(state.idle_timeout, conn.recv()).await {
            Ok(Ok(Some(data))) => data,
            Ok(Ok(None)) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Ok(Err(e)) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
            Err(_) => {
                tracing::debug!(%conn_id, "connection idle, closing");
                break;
            }
        };

        let reply = match state.codec.decode::<Envelope<ClientMessage>>(&data) {
            Ok(envelope) => Envelope {
                seq: envelope.seq,
                message: dispatch(&state, envelope.message).await,
            },
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "failed to decode envelope");
                Envelope {
                    seq: 0,
                    message: ServerMessage::Error {
                        code: 400,
                        message: e.to_string(),
                    },
                }
            }
        };

        let bytes = state.codec.encode(&reply)?;
        conn.send(bytes).await?;
    }

    Ok(())
}

/// Runs one request to completion and builds its reply.
///
/// The store and the scoreboard are synchronous and never held across a
/// suspension point. Only recording a finished run awaits.
async fn dispatch<S, C>(state: &Arc<ServerState<S, C>>, message: ClientMessage) -> ServerMessage
where
    S: Scoreboard,
    C: Codec,
{
    let result = match message {
        ClientMessage::StartSession {
            name,
            age,
            subjects,
        } => start_session(state, &name, age, &subjects),
        ClientMessage::SubmitAnswer {
            session_id,
            question_id,
            answer,
            elapsed_seconds,
        } => {
            submit_answer(state, &session_id, &question_id, &answer, elapsed_seconds).await
        }
        ClientMessage::GetSession { session_id } => get_session(state, &session_id),
        ClientMessage::ListSubjects => Ok(ServerMessage::Subjects {
            subjects: views::subject_list(),
        }),
        ClientMessage::GetScoreboard { limit } => Ok(ServerMessage::Scoreboard {
            entries: state
                .scoreboard
                .leaderboard(limit)
                .iter()
                .map(views::scoreboard_entry)
                .collect(),
        }),
        ClientMessage::Ping => Ok(ServerMessage::Pong {
            server_time: chrono::Utc::now().timestamp_millis(),
        }),
    };

    result.unwrap_or_else(|err| ServerMessage::Error {
        code: err.kind().code(),
        message: err.to_string(),
    })
}

fn start_session<S: Scoreboard, C: Codec>(
    state: &ServerState<S, C>,
    name: &str,
    age: i64,
    subjects: &[String],
) -> Result<ServerMessage, SessionError> {
    let session = state.sessions.create_session(name, age, subjects)?;
    Ok(ServerMessage::SessionStarted(views::session_started(&session)?))
}

async fn submit_answer<S: Scoreboard, C: Codec>(
    state: &Arc<ServerState<S, C>>,
    session_id: &SessionId,
    question_id: &QuestionId,
    answer: &str,
    elapsed_seconds: f64,
) -> Result<ServerMessage, SessionError> {
    let (outcome, session) =
        state
            .sessions
            .submit_answer(session_id, question_id, answer, elapsed_seconds)?;

    let summary = if outcome.finished {
        let leaderboard = record_run(state, views::run_summary(&session)).await;
        Some(views::summary(&session, &leaderboard))
    } else {
        None
    };

    Ok(ServerMessage::AnswerResult {
        finished: outcome.finished,
        outcome: views::outcome(&outcome),
        stats: views::stats(&session),
        next_question: outcome.next_question.as_ref().map(|q| q.view()),
        summary,
    })
}

/// Records a finished run off the async workers, since a file-backed
/// scoreboard appends and flushes synchronously. Returns the leaderboard
/// as it stands after the run is stored.
async fn record_run<S: Scoreboard, C: Codec>(
    state: &Arc<ServerState<S, C>>,
    run: RunSummary,
) -> Vec<RankedEntry> {
    let task_state = Arc::clone(state);
    let recorded = tokio::task::spawn_blocking(move || {
        task_state.scoreboard.record_run(run);
        task_state.scoreboard.leaderboard(None)
    })
    .await;

    recorded.unwrap_or_else(|e| {
        tracing::error!(error = %e, "scoreboard task failed");
        state.scoreboard.leaderboard(None)
    })
}

fn get_session<S: Scoreboard, C: Codec>(
    state: &ServerState<S, C>,
    session_id: &SessionId,
) -> Result<ServerMessage, SessionError> {
    let session = state.sessions.get_session(session_id)?;
    Ok(ServerMessage::SessionStatus {
        session_id: session.id.clone(),
        finished: session.finished,
        stats: views::stats(&session),
        question: session.current_question.as_ref().map(|q| q.view()),
    })
}
