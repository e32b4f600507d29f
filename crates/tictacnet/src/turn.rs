//! The per-room turn loop: prompt, read, validate, advance, finalize.
//!
//! Once matchmaking hands the joiner's connection over, a single task —
//! the creator's — owns both streams and this loop. That is the whole
//! concurrency story for a room: one move is processed at a time because
//! only the active player's stream is read, and nothing else can touch
//! the board.

use tictacnet_game::{parse_move, Board, Mark, Verdict};
use tictacnet_room::{RoomCode, RoomRegistry};
use tictacnet_transport::{LineStream, TransportError};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::Mutex;

use crate::ui::{self, ansi};

/// One running match: the board, whose turn it is, and both streams.
///
/// The creator always plays `x` and moves first; the joiner plays `o`.
pub(crate) struct Match<S> {
    code: RoomCode,
    board: Board,
    turn: Mark,
    creator: LineStream<S>,
    joiner: LineStream<S>,
}

/// A participant's stream failed or reached EOF mid-game.
struct Dropout {
    seat: Mark,
}

impl<S> Match<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(code: RoomCode, creator: LineStream<S>, joiner: LineStream<S>) -> Self {
        Self {
            code,
            board: Board::new(),
            turn: Mark::X,
            creator,
            joiner,
        }
    }

    fn seat_mut(&mut self, mark: Mark) -> &mut LineStream<S> {
        match mark {
            Mark::X => &mut self.creator,
            Mark::O => &mut self.joiner,
        }
    }

    fn dropout(&self, seat: Mark, source: Option<TransportError>) -> Dropout {
        match source {
            Some(e) => {
                tracing::debug!(code = %self.code, %seat, error = %e, "participant stream failed")
            }
            None => tracing::info!(code = %self.code, %seat, "participant disconnected"),
        }
        Dropout { seat }
    }

    /// Shows the current board to both participants: the active player
    /// gets the move prompt, the other is told to wait.
    async fn prompt_both(&mut self) -> Result<(), Dropout> {
        let board = ui::render_board(&self.board);
        let active = self.turn;
        let waiting = active.opponent();

        let view = format!(
            "{clear}it is your turn\r\nyou are {mark}\r\n\r\n{board}\r\n\r\nmake your move (enter the number or row+number of your {mark})\r\n> ",
            clear = ansi::CLEAR_SCREEN,
            mark = ui::bold(&active.to_string()),
        );
        if let Err(e) = self.seat_mut(active).send(&view).await {
            return Err(self.dropout(active, Some(e)));
        }

        let view = format!(
            "{clear}it is their turn\r\nyou are {mark}\r\n\r\n{board}\r\n\r\nwaiting for opponent...",
            clear = ansi::CLEAR_SCREEN,
            mark = ui::bold(&waiting.to_string()),
        );
        if let Err(e) = self.seat_mut(waiting).send(&view).await {
            return Err(self.dropout(waiting, Some(e)));
        }
        Ok(())
    }

    /// One iteration of the loop: prompt, read one line from the active
    /// player only, and apply it. Returns the verdict if the move ended
    /// the game, `None` to keep looping — which covers both an accepted
    /// non-terminal move (turn flips) and a rejected token (it doesn't).
    async fn play_turn(&mut self) -> Result<Option<Verdict>, Dropout> {
        self.prompt_both().await?;

        let active = self.turn;
        let line = match self.seat_mut(active).read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return Err(self.dropout(active, None)),
            Err(e) => return Err(self.dropout(active, Some(e))),
        };

        let square = match parse_move(line.trim(), &self.board) {
            Ok(square) => square,
            Err(reason) => {
                // Recoverable: same player, same turn, fresh prompt.
                // The opponent never hears about it.
                tracing::debug!(code = %self.code, player = %active, %reason, "move rejected");
                return Ok(None);
            }
        };

        self.board.place(square, active);
        tracing::debug!(code = %self.code, player = %active, %square, "move accepted");

        if let Some(verdict) = self.board.verdict() {
            return Ok(Some(verdict));
        }
        self.turn = active.opponent();
        Ok(None)
    }

    /// Final screens for a played-out game. Best-effort: a peer that
    /// vanished during the last move must not block teardown.
    async fn announce_verdict(&mut self, verdict: Verdict) {
        let board = ui::render_board(&self.board);
        match verdict {
            Verdict::Tie => {
                let view = format!(
                    "{clear}{yellow}it was a tie!!!!!{reset}\r\n\r\n{board}\r\n\r\ngoodbye!\r\n",
                    clear = ansi::CLEAR_SCREEN,
                    yellow = ansi::YELLOW,
                    reset = ansi::RESET,
                );
                let _ = self.creator.send(&view).await;
                let _ = self.joiner.send(&view).await;
            }
            Verdict::Win(winner) => {
                let view = format!(
                    "{clear}{green}you win!!!!!{reset}\r\n\r\n{board}\r\n\r\ngoodbye!\r\n",
                    clear = ansi::CLEAR_SCREEN,
                    green = ansi::GREEN,
                    reset = ansi::RESET,
                );
                let _ = self.seat_mut(winner).send(&view).await;

                let view = format!(
                    "{clear}{red}you lose!!!!!{reset}\r\n\r\n{board}\r\n\r\ngoodbye!\r\n",
                    clear = ansi::CLEAR_SCREEN,
                    red = ansi::RED,
                    reset = ansi::RESET,
                );
                let _ = self.seat_mut(winner.opponent()).send(&view).await;
            }
        }
    }

    /// Final screen for the survivor of a mid-game disconnection.
    async fn announce_forfeit(&mut self, deserter: Mark) {
        let board = ui::render_board(&self.board);
        let view = format!(
            "{clear}your opponent disconnected\r\n\r\n{board}\r\n\r\n{green}you win by forfeit!{reset}\r\ngoodbye!\r\n",
            clear = ansi::CLEAR_SCREEN,
            green = ansi::GREEN,
            reset = ansi::RESET,
        );
        let _ = self.seat_mut(deserter.opponent()).send(&view).await;
    }
}

/// Drives one match from its first prompt to teardown.
///
/// Whatever happens — verdict or dropout — both streams are closed and
/// the room leaves the registry, freeing its code for a fresh draw.
pub(crate) async fn run_match<S>(mut game: Match<S>, registry: &Mutex<RoomRegistry<LineStream<S>>>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    tracing::info!(code = %game.code, "match started");

    let outcome = loop {
        match game.play_turn().await {
            Ok(None) => continue,
            Ok(Some(verdict)) => break Ok(verdict),
            Err(dropout) => break Err(dropout),
        }
    };

    match outcome {
        Ok(verdict) => {
            game.announce_verdict(verdict).await;
            tracing::info!(code = %game.code, ?verdict, "match finished");
        }
        Err(dropout) => {
            game.announce_forfeit(dropout.seat).await;
            tracing::info!(code = %game.code, deserter = %dropout.seat, "match forfeited");
        }
    }

    let _ = game.creator.close().await;
    let _ = game.joiner.close().await;
    registry.lock().await.remove_room(game.code.as_str());
}
