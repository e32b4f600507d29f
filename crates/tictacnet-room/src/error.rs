//! Error types for the room layer.

use crate::RoomCode;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The drawn code already identifies a live room. Creation is
    /// rejected outright rather than retried — the odds are one in the
    /// code space, and the policy is to keep creation O(1).
    #[error("room code {0} is already in use")]
    CodeTaken(RoomCode),

    /// No live room has this code.
    #[error("room {0} not found")]
    NotFound(String),

    /// The room already has both participants.
    #[error("room {0} already started")]
    AlreadyStarted(String),

    /// The word pool asset contained no words.
    #[error("word pool is empty")]
    EmptyWordPool,
}
