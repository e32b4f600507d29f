//! `Server` builder and accept loop.
//!
//! This is the entry point for running a tictacnet server. It ties the
//! layers together: transport → matchmaking → turn loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tictacnet_room::{RoomRegistry, WordPool};
use tictacnet_transport::{LineListener, LineStream};
use tokio::net::TcpStream;
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::ServerError;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:11329";

/// How long a creator waits for an opponent before the room expires.
pub const DEFAULT_OPPONENT_WAIT: Duration = Duration::from_secs(150);

const DEFAULT_BANNER: &str = include_str!("../assets/banner.txt");
const DEFAULT_WORDS: &str = include_str!("../assets/words.txt");

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The
/// registry is the only mutable piece and sits behind a `Mutex`; the
/// lock is only ever held for map operations, never across stream I/O.
pub(crate) struct ServerState<S> {
    pub(crate) registry: Mutex<RoomRegistry<LineStream<S>>>,
    pub(crate) banner: String,
    pub(crate) opponent_wait: Duration,
}

/// Builder for configuring and starting a tictacnet server.
///
/// The defaults are a complete server: embedded banner and word list,
/// the standard port, and a 2.5-minute opponent wait. Tests override
/// `bind` (port 0), shrink the wait, or inject a tiny word list.
pub struct ServerBuilder {
    bind_addr: String,
    banner: String,
    words: String,
    opponent_wait: Duration,
}

impl ServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            banner: DEFAULT_BANNER.to_string(),
            words: DEFAULT_WORDS.to_string(),
            opponent_wait: DEFAULT_OPPONENT_WAIT,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Replaces the banner shown on connect.
    pub fn banner(mut self, banner: &str) -> Self {
        self.banner = banner.to_string();
        self
    }

    /// Replaces the room-code word list (newline-separated).
    pub fn word_list(mut self, words: &str) -> Self {
        self.words = words.to_string();
        self
    }

    /// Sets how long a creator waits for an opponent.
    pub fn opponent_wait(mut self, wait: Duration) -> Self {
        self.opponent_wait = wait;
        self
    }

    /// Parses the word list, binds the listener, and assembles the server.
    pub async fn build(self) -> Result<Server, ServerError> {
        let pool = WordPool::parse(&self.words)?;
        let listener = LineListener::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            registry: Mutex::new(RoomRegistry::new(pool)),
            banner: self.banner,
            opponent_wait: self.opponent_wait,
        });

        Ok(Server { listener, state })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running tictacnet server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct Server {
    listener: LineListener,
    state: Arc<ServerState<TcpStream>>,
}

impl Server {
    /// Creates a new builder.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Each accepted connection gets its own task. Nothing a single
    /// connection or room does is fatal to the process: handler errors
    /// are logged and scoped to that connection.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("tictacnet server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
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
