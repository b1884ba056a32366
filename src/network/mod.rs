//! HTTP networking module
//!
//! Connection handling and the engine client used for searches and
//! single-document operations.

mod client;
mod connection;
mod documents;

pub use client::{EngineClient, ATTACHMENT_FIELD, ATTACHMENT_PIPELINE};
pub use connection::Connection;
pub use documents::{Document, DocumentWriteResponse};
