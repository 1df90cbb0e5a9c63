//! Error type shared by client operations.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Failures surfaced by [`crate::BridgeClient`] and its data model.
pub enum BridgeError {
    /// An outbound payload or envelope could not be encoded as JSON.
    #[error("failed to serialize bridge payload: {0}")]
    Serialize(String),
    /// The native proxy or parent frame rejected the command.
    #[error("bridge transport failed: {0}")]
    Transport(String),
    /// An inbound cross-frame message was not a valid envelope.
    #[error("malformed bridge envelope: {0}")]
    MalformedEnvelope(String),
    /// Client options could not be decoded.
    #[error("invalid client options: {0}")]
    InvalidOptions(String),
}
