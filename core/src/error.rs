//! Error types for the request dispatcher.
//!
//! # Design
//! `InvalidArgument` is the only variant returned synchronously to the
//! caller: it means the call site is wrong and nothing was sent. Every other
//! variant is produced during the network phase and is recovered inside the
//! dispatcher, which alerts the user and logs it.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Bad method or malformed body. No side effect has happened.
    #[error("{0}")]
    InvalidArgument(String),

    /// The server was reachable but answered with a non-2xx status.
    #[error("HTTP error {status}: {status_text}")]
    HttpError { status: u16, status_text: String },

    /// The request never completed (DNS failure, refused or aborted connection).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// A 2xx response whose body is not valid JSON, or a payload of the wrong shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl DispatchError {
    /// Text shown to the user when a dispatched request fails.
    pub fn alert_message(&self) -> String {
        match self {
            DispatchError::HttpError { status, status_text } => format!(
                "An error occurred while communicating with the server.\nError {status}: {status_text}"
            ),
            other => other.to_string(),
        }
    }
}
