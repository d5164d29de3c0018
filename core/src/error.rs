//! Error types for the learning-service client.
//!
//! # Design
//! `SyncError` is what a refresh cycle can end with. It is `Clone` because
//! the tracker hands the first error of a cycle to the completion callback
//! while keeping every error for diagnostics. Decode failures keep the raw
//! body so a caller can see exactly what the server sent. An unrecognized
//! response is not an error and has no variant here.

use thiserror::Error;

use crate::schema::Kind;

/// The request never produced a response (connection refused, DNS, TLS...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("request to {url} failed: {message}")]
pub struct TransportError {
    pub url: String,
    pub message: String,
}

impl TransportError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// A response body did not parse against the schema its URL matched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to decode {kind} response from {url}: {message}")]
pub struct DecodeError {
    pub kind: Kind,
    pub url: String,
    pub message: String,
    pub body: Vec<u8>,
}

impl DecodeError {
    /// The raw body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Per-response failure recorded against a refresh cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl SyncError {
    pub fn url(&self) -> &str {
        match self {
            SyncError::Transport(e) => &e.url,
            SyncError::Status { url, .. } => url,
            SyncError::Decode(e) => &e.url,
        }
    }
}

/// Account could not be written to or read from the host's store.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("deserialization failed: {0}")]
    Deserialize(String),

    #[error("store error: {0}")]
    Store(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing API key (set WANIKANI_API_KEY)")]
    MissingApiKey,

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
