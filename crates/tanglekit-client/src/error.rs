//! Error types for the node client.

use thiserror::Error;

/// Errors produced while talking to a node.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("node returned status {status}: {message}")]
    Node { status: u16, message: String },

    #[error("wire format error: {0}")]
    Wire(#[from] tanglekit_core::Error),

    #[error("invalid hex in response: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid field in JSON representation: {0}")]
    Dto(String),
}
