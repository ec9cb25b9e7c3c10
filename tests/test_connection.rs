//! End-to-end tests driving real connections against the server core.
//!
//! Each test binds an ephemeral-port listener and spawns the same
//! per-connection task the production accept loop uses. Note that the
//! server has no read timeout by design: a peer that stalls mid-request
//! parks its connection task indefinitely. The tests below always either
//! complete their requests or half-close, so nothing here waits forever.

use std::collections::HashMap;
use std::io::Read;
use std::net::SocketAddr;
use std::path::Path;

use flate2::read::GzDecoder;
use harbor::http::connection::Connection;
use harbor::router::Router;
use harbor::storage::FileStore;
use tempfile::{TempDir, tempdir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn spawn_server(dir: &Path) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = Router::new(FileStore::new(dir));

    tokio::spawn(async move {
        loop {
            let (socket, _peer) = listener.accept().await.unwrap();
            let router = router.clone();
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, router);
                let _ = conn.run().await;
            });
        }
    });

    addr
}

async fn connect(dir: &TempDir) -> TcpStream {
    let addr = spawn_server(dir.path()).await;
    TcpStream::connect(addr).await.unwrap()
}

struct WireResponse {
    raw: Vec<u8>,
    status_line: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

/// Reads exactly one response: headers up to the blank line, then exactly
/// Content-Length body bytes.
async fn read_response(stream: &mut TcpStream) -> WireResponse {
    let mut buf: Vec<u8> = Vec::new();

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let mut tmp = [0u8; 1024];
        let n = stream.read(&mut tmp).await.unwrap();
        assert!(n > 0, "connection closed before response headers arrived");
        buf.extend_from_slice(&tmp[..n]);
    };

    let head = String::from_utf8(buf[..header_end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap().to_string();

    let mut headers = HashMap::new();
    for line in lines {
        let (k, v) = line.split_once(':').expect("malformed response header");
        headers.insert(k.trim().to_ascii_lowercase(), v.trim().to_string());
    }

    let content_length: usize = headers
        .get("content-length")
        .expect("response is missing Content-Length")
        .parse()
        .unwrap();

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let mut tmp = [0u8; 1024];
        let n = stream.read(&mut tmp).await.unwrap();
        assert!(n > 0, "connection closed mid-body");
        body.extend_from_slice(&tmp[..n]);
    }
    assert_eq!(
        body.len(),
        content_length,
        "Content-Length must equal the bytes written after the blank line"
    );

    let mut raw = buf[..header_end + 4].to_vec();
    raw.extend_from_slice(&body);

    WireResponse {
        raw,
        status_line,
        headers,
        body,
    }
}

#[tokio::test]
async fn test_echo_end_to_end() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /echo/hello HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.body, b"hello".to_vec());
    assert_eq!(resp.headers.get("content-type").unwrap(), "text/plain");
    assert_eq!(resp.headers.get("content-length").unwrap(), "5");
}

#[tokio::test]
async fn test_root_returns_empty_ok() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert!(resp.body.is_empty());
    assert_eq!(resp.headers.get("content-length").unwrap(), "0");
}

#[tokio::test]
async fn test_unknown_path_returns_404() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /nope HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert_eq!(resp.status_line, "HTTP/1.1 404 Not Found");
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn test_user_agent_end_to_end() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /user-agent HTTP/1.1\r\nUser-Agent: test-client/1\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.body, b"test-client/1".to_vec());
}

#[tokio::test]
async fn test_file_round_trip() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"POST /files/foo.txt HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc")
        .await
        .unwrap();

    let created = read_response(&mut stream).await;
    assert_eq!(created.status_line, "HTTP/1.1 201 Created");
    assert_eq!(created.body, b"abc".to_vec());

    stream
        .write_all(b"GET /files/foo.txt HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let fetched = read_response(&mut stream).await;
    assert_eq!(fetched.status_line, "HTTP/1.1 200 OK");
    assert_eq!(fetched.body, b"abc".to_vec());
    assert_eq!(
        fetched.headers.get("content-type").unwrap(),
        "application/octet-stream"
    );
}

#[tokio::test]
async fn test_missing_file_returns_404_with_zero_length() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /files/doesnotexist HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert_eq!(resp.status_line, "HTTP/1.1 404 Not Found");
    assert!(resp.body.is_empty());
    assert_eq!(resp.headers.get("content-length").unwrap(), "0");
}

#[tokio::test]
async fn test_gzip_negotiation_end_to_end() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /echo/hello HTTP/1.1\r\nAccept-Encoding: gzip\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert_eq!(resp.status_line, "HTTP/1.1 200 OK");
    assert_eq!(resp.headers.get("content-encoding").unwrap(), "gzip");

    let mut decoder = GzDecoder::new(resp.body.as_slice());
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).unwrap();
    assert_eq!(decompressed, b"hello".to_vec());
}

#[tokio::test]
async fn test_unsupported_encoding_sends_identity() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /echo/hello HTTP/1.1\r\nAccept-Encoding: br\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert!(resp.headers.get("content-encoding").is_none());
    assert_eq!(resp.body, b"hello".to_vec());
}

#[tokio::test]
async fn test_keep_alive_serves_sequential_requests() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /echo/first HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let first = read_response(&mut stream).await;
    assert_eq!(first.body, b"first".to_vec());

    // Same connection, next cycle
    stream
        .write_all(b"GET /echo/second HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let second = read_response(&mut stream).await;
    assert_eq!(second.body, b"second".to_vec());
}

#[tokio::test]
async fn test_connection_close_is_mirrored_and_honored() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /echo/bye HTTP/1.1\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();

    let resp = read_response(&mut stream).await;
    assert_eq!(resp.body, b"bye".to_vec());
    assert_eq!(resp.headers.get("connection").unwrap(), "close");

    // The server hangs up after the response
    let mut tmp = [0u8; 16];
    let n = stream.read(&mut tmp).await.unwrap();
    assert_eq!(n, 0);
}

#[tokio::test]
async fn test_repeated_requests_are_byte_identical() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    let mut first: Option<Vec<u8>> = None;
    for _ in 0..3 {
        stream
            .write_all(b"GET /echo/x HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let resp = read_response(&mut stream).await;

        match &first {
            Some(raw) => assert_eq!(&resp.raw, raw),
            None => first = Some(resp.raw),
        }
    }
}

#[tokio::test]
async fn test_malformed_request_closes_without_response() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream.write_all(b"BROKEN\r\n\r\n").await.unwrap();

    let mut tmp = [0u8; 16];
    let n = stream.read(&mut tmp).await.unwrap();
    assert_eq!(n, 0, "a malformed request gets no response, just a close");
}

#[tokio::test]
async fn test_truncated_body_closes_without_response() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    // Declare ten body bytes but deliver three, then half-close
    stream
        .write_all(b"POST /files/short HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc")
        .await
        .unwrap();
    stream.shutdown().await.unwrap();

    let mut tmp = [0u8; 16];
    let n = stream.read(&mut tmp).await.unwrap();
    assert_eq!(n, 0, "a short body is a connection error, not a response");
}

#[tokio::test]
async fn test_clean_disconnect_between_requests() {
    let dir = tempdir().unwrap();
    let mut stream = connect(&dir).await;

    stream
        .write_all(b"GET /echo/done HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .unwrap();
    let resp = read_response(&mut stream).await;
    assert_eq!(resp.body, b"done".to_vec());

    // Hanging up between requests is a clean end of the session
    drop(stream);
}
