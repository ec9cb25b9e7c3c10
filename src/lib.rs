//! Harbor - Minimal HTTP/1.1 File Server
//!
//! A raw-socket HTTP/1.1 protocol engine with a fixed route table,
//! keep-alive connections, gzip content negotiation and a directory-backed
//! file store.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod storage;
