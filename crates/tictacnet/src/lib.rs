//! # tictacnet
//!
//! A text-protocol tic-tac-toe server for two strangers and one shared
//! room code. Clients connect over a raw TCP stream (telnet works fine),
//! pick "create" or "join" from a one-line menu, rendezvous via a short
//! `<word><digit>` code, and the server referees the game to a win, a
//! tie, or a forfeit.
//!
//! The layers, bottom up:
//!
//! - `tictacnet-game` — the board, the rules, and the move parser
//! - `tictacnet-room` — room codes and the live-room registry
//! - `tictacnet-transport` — line-oriented TCP streams
//! - this crate — the server loop, matchmaking, and the turn controller
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tictacnet::Server;
//!
//! # async fn run() -> Result<(), tictacnet::ServerError> {
//! let server = Server::builder().bind("0.0.0.0:11329").build().await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;
mod turn;
mod ui;

pub use error::ServerError;
pub use server::{Server, ServerBuilder, DEFAULT_BIND, DEFAULT_OPPONENT_WAIT};
