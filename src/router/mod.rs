//! Fixed route table dispatch.
//!
//! Maps a parsed request to one of the server's routes: the root page,
//! echo, user-agent reflection, file read/write, or not-found. The router
//! sits between the connection state machine and the file store; it owns
//! no per-connection state and is cloned into each connection task.

use anyhow::Result;

use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::storage::FileStore;

pub const TEXT_PLAIN: &str = "text/plain";
pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct Router {
    store: FileStore,
}

impl Router {
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Resolves a request against the fixed route table.
    ///
    /// Per-request faults (unknown path, missing file, bad target shape)
    /// come back as responses; storage IO failures propagate to the
    /// caller and end the session.
    pub async fn dispatch(&self, req: &Request) -> Result<Response> {
        tracing::debug!(method = ?req.method, path = %req.path, "Dispatching request");

        if req.path == "/" {
            Ok(Response::ok(Vec::<u8>::new(), TEXT_PLAIN))
        } else if req.path.starts_with("/echo/") {
            match path_segment(&req.path, 2) {
                Some(value) => Ok(Response::ok(value, TEXT_PLAIN)),
                None => Ok(Response::not_found(TEXT_PLAIN)),
            }
        } else if req.path.starts_with("/user-agent") {
            // Absent User-Agent reflects as an empty body
            let agent = req.header("User-Agent").unwrap_or("");
            Ok(Response::ok(agent, TEXT_PLAIN))
        } else if req.path.starts_with("/files/") {
            self.dispatch_file(req).await
        } else {
            Ok(Response::not_found(TEXT_PLAIN))
        }
    }

    async fn dispatch_file(&self, req: &Request) -> Result<Response> {
        // The file name is the third `/`-separated segment, verbatim
        let Some(name) = path_segment(&req.path, 2) else {
            return Ok(Response::not_found(OCTET_STREAM));
        };

        match req.method {
            Method::GET => match self.store.read(name).await? {
                Some(bytes) => Ok(Response::ok(bytes, OCTET_STREAM)),
                None => Ok(Response::not_found(OCTET_STREAM)),
            },
            Method::POST => {
                self.store.write(name, &req.body).await?;
                Ok(Response::created(req.body.clone(), OCTET_STREAM))
            }
            _ => Ok(Response::not_found(OCTET_STREAM)),
        }
    }
}

/// The `index`th `/`-separated segment of a request target. Index 0 is the
/// empty segment before the leading slash.
fn path_segment(path: &str, index: usize) -> Option<&str> {
    path.split('/').nth(index)
}
