//! Error types for envelope sealing and opening.

use thiserror::Error;

/// Errors that can occur while sealing or opening an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Key material could not be parsed or is unusable.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The cipher rejected its inputs.
    #[error("encryption failure: {0}")]
    EncryptionFailure(String),

    /// The envelope is structurally invalid.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Authentication or decryption failed.
    #[error("decryption failure: {0}")]
    DecryptionFailure(String),
}

/// Result type for envelope operations.
pub type Result<T> = std::result::Result<T, EnvelopeError>;
