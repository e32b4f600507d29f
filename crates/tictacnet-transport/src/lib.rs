//! Line-oriented transport layer for tictacnet.
//!
//! The protocol is plain UTF-8 text: the server writes prompts (not
//! always newline-terminated, so every write flushes) and reads one line
//! at a time. [`LineStream`] wraps any byte stream in that discipline;
//! [`LineListener`] accepts TCP connections and tags each with a
//! process-unique [`ConnectionId`].
//!
//! `LineStream` is generic over the underlying stream so the layers
//! above can be exercised over `tokio::io::duplex` pipes in tests.

mod error;
mod line;

pub use error::TransportError;
pub use line::{LineListener, LineStream, TcpLineStream};

use std::fmt;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_and_into_inner() {
        let id = ConnectionId::new(42);
        assert_eq!(id.into_inner(), 42);
    }

    #[test]
    fn test_connection_id_display() {
        let id = ConnectionId::new(7);
        assert_eq!(id.to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_hash_works_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ConnectionId::new(1), "creator");
        map.insert(ConnectionId::new(2), "joiner");
        assert_eq!(map[&ConnectionId::new(1)], "creator");
    }
}
