//! # Sealed Santa
//!
//! Secret gift assignments that only each giver can read.
//!
//! ## Overview
//!
//! A draw takes participants with public keys and produces, for every giver,
//! an envelope naming their receiver:
//!
//! - **Derangement**: Nobody is assigned to themself
//! - **Envelopes**: Each receiver's name is sealed under the giver's public key
//! - **Results file**: One `giver : envelope` line per participant, safe to share
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sealed_santa::{DrawConfig, SantaDraw};
//!
//! fn example() -> sealed_santa::Result<()> {
//!     let draw = SantaDraw::new(DrawConfig::default());
//!
//!     // `setup.txt` holds one `name:publicKeyHex` line per participant.
//!     let results = draw.draw_file("party/setup.txt")?;
//!
//!     // Later, each giver opens their own line.
//!     let receiver = draw.reveal(&results, "Alice", "<alice's secret key hex>")?;
//!     println!("Alice gives to {receiver}");
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `sealed_santa::core` - Registry and derangements
//! - `sealed_santa::envelope` - Envelope sealing and opening

pub mod assign;
pub mod draw;
pub mod error;
pub mod results;
pub mod setup;

// Re-export component crates
pub use sealed_santa_core as core;
pub use sealed_santa_envelope as envelope;

// Re-export main types for convenience
pub use assign::{assign, assign_with, SealedAssignment};
pub use draw::{DrawConfig, SantaDraw, DEFAULT_RESULTS_FILE_NAME};
pub use error::{Result, SantaError, SetupError};
pub use results::{format_results, load_results, parse_results, reveal, write_results};
pub use setup::{load_setup, parse_setup, SetupOptions};

pub use sealed_santa_core::{
    generate_derangement, Derangement, DrawError, Participant, ParticipantRegistry,
};
pub use sealed_santa_envelope::{
    EncryptedEnvelope, EnvelopeError, EnvelopeFormat, ParticipantPublicKey, ParticipantSecret,
};
