use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::encoding::{self, Encoding};
use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Framing headers the serializer owns; any copy in the response's header
/// map is ignored.
const FRAMING_HEADERS: &[&str] = &["Content-Length", "Content-Encoding", "Connection"];

/// Serializes a response to wire bytes, applying the negotiated encoding.
///
/// Emits the status line, the response's application headers, the framing
/// headers and one blank line, then the body. A non-empty body is replaced
/// by its compressed form when `encoding` is set, and `Content-Encoding`
/// is emitted only in that case; Content-Length always reflects the final
/// body bytes (0 for no body). `close` mirrors the request's
/// `Connection: close` back to the client.
///
/// Note: public so integration tests can assert on exact framing.
pub fn serialize_response(
    resp: &Response,
    encoding: Option<Encoding>,
    close: bool,
) -> anyhow::Result<Vec<u8>> {
    // An empty body is "no body": never handed to the compressor, which
    // rejects zero-length input.
    let (body, applied) = match encoding {
        Some(enc) if !resp.body.is_empty() => {
            let compressed = encoding::compress(enc, &resp.body)
                .map_err(|e| anyhow::anyhow!("response encoding error: {:?}", e))?;
            (compressed, Some(enc))
        }
        _ => (resp.body.clone(), None),
    };

    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Application headers
    for (k, v) in &resp.headers {
        if FRAMING_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(k)) {
            continue;
        }
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Framing headers
    buf.extend_from_slice(format!("Content-Length: {}\r\n", body.len()).as_bytes());
    if let Some(enc) = applied {
        buf.extend_from_slice(format!("Content-Encoding: {}\r\n", enc.name()).as_bytes());
    }
    if close {
        buf.extend_from_slice(b"Connection: close\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&body);

    Ok(buf)
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(
        response: &Response,
        encoding: Option<Encoding>,
        close: bool,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            buffer: serialize_response(response, encoding, close)?,
            written: 0,
        })
    }

    pub async fn write_to_stream(
        &mut self,
        stream: &mut TcpStream,
    ) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream
                .write(&self.buffer[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        Ok(())
    }
}
