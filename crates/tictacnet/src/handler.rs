//! Per-connection matchmaking: the menu, room creation, and joining.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!   1. Greeting → banner and menu
//!   2. `"2"` → create a room, wait for an opponent (bounded)
//!   3. `"1"` → enter a code, hand this connection to the creator's task
//!
//! All rejections are terminal for the connection: an explanatory line,
//! then close. Nothing here retries on the client's behalf.

use std::sync::Arc;

use tictacnet_room::RoomError;
use tictacnet_transport::LineStream;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::timeout;

use crate::server::ServerState;
use crate::turn::{run_match, Match};
use crate::ui::{self, ansi};
use crate::ServerError;

/// Handles a single connection from accept to close (or handoff).
pub(crate) async fn handle_connection<S>(
    mut conn: LineStream<S>,
    state: Arc<ServerState<S>>,
) -> Result<(), ServerError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    conn.send(ansi::CLEAR_SCREEN).await?;
    for line in state.banner.lines() {
        conn.send_line(line).await?;
    }
    conn.send_line("").await?;
    conn.send("type 1 to join a room\r\ntype 2 to create a room\r\n> ")
        .await?;

    let Some(choice) = conn.read_line().await? else {
        return Ok(());
    };

    match choice.trim() {
        "1" => join_room(conn, state).await,
        "2" => create_room(conn, state).await,
        other => {
            tracing::debug!(id = %conn.id(), choice = %other, "bad menu choice");
            conn.send_line("invalid answer, goodbye!").await?;
            conn.close().await?;
            Ok(())
        }
    }
}

/// The create flow: draw a code, announce it, wait for an opponent,
/// then run the game in this task.
async fn create_room<S>(
    mut conn: LineStream<S>,
    state: Arc<ServerState<S>>,
) -> Result<(), ServerError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    conn.send(ansi::CLEAR_SCREEN).await?;

    let (created, code_space) = {
        let mut registry = state.registry.lock().await;
        (registry.create_room(), registry.code_space())
    };

    let (code, mut joiner_rx) = match created {
        Ok(room) => room,
        Err(RoomError::CodeTaken(code)) => {
            // Deliberate policy: a collision rejects the creation
            // outright instead of redrawing.
            tracing::debug!(%code, "creation rejected on code collision");
            conn.send_line(&format!(
                "your room code collided with a live room (a 1 in {code_space} chance)"
            ))
            .await?;
            conn.send_line("no redraws on luck like that, goodbye!").await?;
            conn.close().await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    conn.send_line(&format!("your room code is: {}", ui::bold(code.as_str())))
        .await?;
    conn.send_line("share this with the person you want to play with")
        .await?;
    conn.send("waiting for opponent...").await?;

    // The opponent wait is the system's only time-driven transition.
    // Dropping the timeout future on a successful handoff is the
    // cancellation; the fire-vs-join race is settled by the registry.
    let joiner = match timeout(state.opponent_wait, &mut joiner_rx).await {
        Ok(Ok(joiner)) => joiner,
        Ok(Err(_)) => {
            // Handoff slot closed without a send: the room was evicted
            // out from under us. Nothing to announce beyond closing.
            tracing::warn!(%code, "handoff slot closed while waiting");
            conn.close().await?;
            return Ok(());
        }
        Err(_elapsed) => {
            // A join may have landed between the last poll and the
            // deadline; whoever takes the registry lock first wins.
            let abandoned = state
                .registry
                .lock()
                .await
                .abandon_if_waiting(code.as_str());
            if abandoned {
                let minutes = state.opponent_wait.as_secs_f32() / 60.0;
                conn.send(ansi::CLEAR_SCREEN).await?;
                conn.send_line(&format!(
                    "nobody joined your room in {minutes:.1} minutes..."
                ))
                .await?;
                conn.send_line("goodbye!").await?;
                conn.close().await?;
                return Ok(());
            }
            match joiner_rx.await {
                Ok(joiner) => joiner,
                Err(_) => {
                    conn.close().await?;
                    return Ok(());
                }
            }
        }
    };

    let game = Match::new(code, conn, joiner);
    run_match(game, &state.registry).await;
    Ok(())
}

/// The join flow: look the code up and push this connection through the
/// room's handoff slot. On success the creator's task owns it from here.
async fn join_room<S>(
    mut conn: LineStream<S>,
    state: Arc<ServerState<S>>,
) -> Result<(), ServerError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    conn.send(ansi::CLEAR_SCREEN).await?;
    conn.send("enter the room code\r\n> ").await?;

    let Some(line) = conn.read_line().await? else {
        return Ok(());
    };
    let code = line.trim();
    if code.is_empty() {
        conn.send_line("invalid room code, goodbye!").await?;
        conn.close().await?;
        return Ok(());
    }

    let attached = state.registry.lock().await.attach_joiner(code);
    let joiner_tx = match attached {
        Ok(tx) => tx,
        Err(RoomError::NotFound(_)) => {
            conn.send_line("room does not exist, goodbye!").await?;
            conn.close().await?;
            return Ok(());
        }
        Err(RoomError::AlreadyStarted(_)) => {
            conn.send_line("that room is already started, goodbye!").await?;
            conn.close().await?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if let Err(mut conn) = joiner_tx.send(conn) {
        // The creator's task died before the handoff; clean up the husk.
        tracing::warn!(code, "creator gone, join abandoned");
        state.registry.lock().await.remove_room(code);
        conn.send_line("that room is no longer available, goodbye!")
            .await?;
        conn.close().await?;
    }
    Ok(())
}
