//! LineStream behavior over in-memory duplex pipes.

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use tictacnet_transport::LineStream;

#[tokio::test]
async fn test_read_line_strips_crlf_and_lf() {
    let (server, mut client) = tokio::io::duplex(256);
    let mut stream = LineStream::new(server);

    client.write_all(b"hello\r\nworld\n").await.unwrap();

    assert_eq!(stream.read_line().await.unwrap(), Some("hello".to_string()));
    assert_eq!(stream.read_line().await.unwrap(), Some("world".to_string()));
}

#[tokio::test]
async fn test_read_line_returns_none_on_eof() {
    let (server, client) = tokio::io::duplex(256);
    let mut stream = LineStream::new(server);

    drop(client);
    assert_eq!(stream.read_line().await.unwrap(), None);
}

#[tokio::test]
async fn test_final_line_without_terminator_still_delivered() {
    let (server, mut client) = tokio::io::duplex(256);
    let mut stream = LineStream::new(server);

    client.write_all(b"2").await.unwrap();
    client.shutdown().await.unwrap();

    assert_eq!(stream.read_line().await.unwrap(), Some("2".to_string()));
    assert_eq!(stream.read_line().await.unwrap(), None);
}

#[tokio::test]
async fn test_send_flushes_without_newline() {
    let (server, mut client) = tokio::io::duplex(256);
    let mut stream = LineStream::new(server);

    stream.send("> ").await.unwrap();

    // A prompt with no newline must still arrive; a buffered writer
    // that only flushes on line endings would hang this read.
    let mut buf = [0u8; 2];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(&buf, b"> ");
}

#[tokio::test]
async fn test_send_line_appends_crlf() {
    let (server, mut client) = tokio::io::duplex(256);
    let mut stream = LineStream::new(server);

    stream.send_line("goodbye!").await.unwrap();

    let mut buf = vec![0u8; "goodbye!\r\n".len()];
    client.read_exact(&mut buf).await.unwrap();
    assert_eq!(buf, b"goodbye!\r\n");
}

#[tokio::test]
async fn test_close_signals_eof_to_the_peer() {
    let (server, mut client) = tokio::io::duplex(256);
    let mut stream = LineStream::new(server);

    stream.close().await.unwrap();

    let mut buf = Vec::new();
    client.read_to_end(&mut buf).await.unwrap();
    assert!(buf.is_empty());
}

#[tokio::test]
async fn test_ids_are_unique() {
    let (a, _ka) = tokio::io::duplex(16);
    let (b, _kb) = tokio::io::duplex(16);
    assert_ne!(LineStream::new(a).id(), LineStream::new(b).id());
}
