//! Error types for Sealed Santa draws.

use sealed_santa_core::DrawError;
use sealed_santa_envelope::EnvelopeError;
use thiserror::Error;

/// Errors from reading setup or results text.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A line could not be read.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Errors that can occur during a draw or a reveal.
#[derive(Debug, Error)]
pub enum SantaError {
    /// Invalid participants or derangement input.
    #[error("draw error: {0}")]
    Draw(#[from] DrawError),

    /// Sealing or opening an envelope failed.
    #[error("envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    /// Setup or results text could not be parsed.
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// No results line for this giver.
    #[error("no assignment for giver: {0}")]
    UnknownGiver(String),
}

/// Result type for draw operations.
pub type Result<T> = std::result::Result<T, SantaError>;
