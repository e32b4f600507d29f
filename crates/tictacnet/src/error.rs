//! Unified error type for the tictacnet server.

use tictacnet_room::RoomError;
use tictacnet_transport::TransportError;

/// Top-level error that wraps the layer-specific errors.
///
/// Only genuinely terminal conditions travel through this type — an
/// invalid move token is a normal part of play and never leaves the
/// turn loop. The `#[from]` impls let the handler use `?` on any layer.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A room-level error (collision, unknown code, started).
    #[error(transparent)]
    Room(#[from] RoomError),
}
