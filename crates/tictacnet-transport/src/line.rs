//! TCP listener and the buffered line stream.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadHalf, WriteHalf,
};
use tokio::net::{TcpListener, TcpStream};

use crate::{ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A `LineStream` over a real TCP connection.
pub type TcpLineStream = LineStream<TcpStream>;

/// Accepts TCP connections and wraps each in a [`LineStream`].
pub struct LineListener {
    listener: TcpListener,
}

impl LineListener {
    /// Binds a listener to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::BindFailed)?;
        tracing::info!(addr, "transport listening");
        Ok(Self { listener })
    }

    /// Waits for the next incoming connection.
    pub async fn accept(&self) -> Result<TcpLineStream, TransportError> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let conn = LineStream::new(stream);
        tracing::debug!(id = %conn.id(), %addr, "accepted connection");
        Ok(conn)
    }

    /// Returns the local address the listener is bound to.
    ///
    /// Tests bind to port 0 and read the assigned port back from here.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// One participant's byte stream, read line by line.
///
/// Reads are buffered and split on `\n`, with the terminator (and any
/// `\r` a telnet-style client sends before it) stripped. Writes flush
/// immediately so prompts without a trailing newline still reach the
/// peer before the server blocks on their answer.
pub struct LineStream<S> {
    id: ConnectionId,
    reader: BufReader<ReadHalf<S>>,
    writer: WriteHalf<S>,
}

impl<S: AsyncRead + AsyncWrite> LineStream<S> {
    /// Wraps a byte stream, assigning it a fresh [`ConnectionId`].
    pub fn new(stream: S) -> Self {
        let (reader, writer) = tokio::io::split(stream);
        Self {
            id: ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed)),
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Returns the unique identifier for this connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> LineStream<S> {
    /// Reads the next line, without its terminator.
    ///
    /// Returns `Ok(None)` on clean EOF.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(TransportError::ReceiveFailed)?;
        if n == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Writes `text` as-is and flushes.
    pub async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(TransportError::SendFailed)?;
        self.writer.flush().await.map_err(TransportError::SendFailed)
    }

    /// Writes `text` followed by CRLF and flushes.
    pub async fn send_line(&mut self, text: &str) -> Result<(), TransportError> {
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(TransportError::SendFailed)?;
        self.writer
            .write_all(b"\r\n")
            .await
            .map_err(TransportError::SendFailed)?;
        self.writer.flush().await.map_err(TransportError::SendFailed)
    }

    /// Shuts down the write half, signalling EOF to the peer.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        self.writer
            .shutdown()
            .await
            .map_err(TransportError::SendFailed)
    }
}
