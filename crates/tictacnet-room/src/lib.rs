//! Room lifecycle management for tictacnet.
//!
//! A room is one pending or running match, identified by a short
//! human-shareable code (`<word><digit>`, e.g. `plum4`). This crate owns
//! code generation and the registry of live rooms; the game state itself
//! lives with whichever task is running the match.
//!
//! # Key types
//!
//! - [`WordPool`] — the fixed word list codes are drawn from
//! - [`RoomCode`] — a drawn code
//! - [`RoomRegistry`] — create/lookup/remove live rooms, hand joiners off
//! - [`RoomError`] — what can go wrong (collision, unknown code, started)

mod code;
mod error;
mod registry;

pub use code::{RoomCode, WordPool};
pub use error::RoomError;
pub use registry::RoomRegistry;
