//! Response body content negotiation and compression.
//!
//! The server advertises a fixed, priority-ordered set of encodings and
//! picks the first supported one that appears in the client's
//! `Accept-Encoding` list. No match means identity encoding.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use crate::http::request::Request;

/// Response body encodings the server can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// gzip (RFC 1952), via flate2
    Gzip,
}

/// Supported encodings in server priority order. Process-wide, read-only.
pub const SUPPORTED_ENCODINGS: &[Encoding] = &[Encoding::Gzip];

impl Encoding {
    /// The token used for this encoding in Accept-Encoding and
    /// Content-Encoding headers.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }
}

#[derive(Debug)]
pub enum EncodingError {
    /// Compressing a zero-length body is rejected; callers must treat an
    /// empty body as "no body, no encoding".
    EmptyInput,
    Io(std::io::Error),
}

/// Selects a response encoding from the request's `Accept-Encoding` header.
///
/// The header value is split on commas and each token trimmed; the first
/// member of [`SUPPORTED_ENCODINGS`] (server order, not client order) that
/// appears verbatim in the client's list wins. A missing, empty or
/// unrecognized header never errors, it just means identity.
pub fn negotiate(req: &Request) -> Option<Encoding> {
    let accepted = req.header("Accept-Encoding")?;
    let tokens: Vec<&str> = accepted.split(',').map(str::trim).collect();

    SUPPORTED_ENCODINGS
        .iter()
        .copied()
        .find(|encoding| tokens.contains(&encoding.name()))
}

/// Compresses `input` with the given encoding.
///
/// Zero-length input is rejected up front with
/// [`EncodingError::EmptyInput`] before any bytes are produced.
pub fn compress(encoding: Encoding, input: &[u8]) -> Result<Vec<u8>, EncodingError> {
    if input.is_empty() {
        return Err(EncodingError::EmptyInput);
    }

    match encoding {
        Encoding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(input).map_err(EncodingError::Io)?;
            encoder.finish().map_err(EncodingError::Io)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_rejects_empty_input() {
        let result = compress(Encoding::Gzip, b"");
        assert!(matches!(result, Err(EncodingError::EmptyInput)));
    }
}
