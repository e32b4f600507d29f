//! Pure game logic for tictacnet.
//!
//! This crate knows nothing about connections, rooms, or timers — it is
//! the 3×3 grid and the rules, plus the parser for the two textual move
//! encodings players type. Everything here is synchronous and
//! side-effect free, which is what makes the turn loop above it easy to
//! reason about (and to test without a server).
//!
//! # Key types
//!
//! - [`Board`] — the grid, row-major, with win/tie evaluation
//! - [`Mark`] — the two symbols, `x` and `o`
//! - [`Square`] — a validated cell index, only constructible in range
//! - [`Verdict`] — the terminal outcome of a finished game
//! - [`parse_move`] — text token → [`Square`], or a recoverable rejection

mod board;
mod moves;

pub use board::{Board, Mark, Square, Verdict};
pub use moves::{parse_move, InvalidMove};
