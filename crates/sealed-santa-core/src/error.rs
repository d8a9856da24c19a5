//! Error types for Sealed Santa Core.

use thiserror::Error;

/// Errors that can occur while building a registry or a derangement.
#[derive(Debug, Error)]
pub enum DrawError {
    /// The input cannot produce a valid assignment.
    ///
    /// Raised for registries with fewer than two participants, duplicate
    /// participant ids, empty ids, and sequences that are not derangements.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, DrawError>;
