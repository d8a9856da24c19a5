//! # Sealed Santa Core
//!
//! Pure primitives for a Sealed Santa draw: the participant registry and the
//! derangement generator.
//!
//! This crate contains no I/O, no cryptography, and no logging. It is pure
//! computation over participant positions.
//!
//! ## Key Types
//!
//! - [`ParticipantRegistry`] - Insertion-ordered participants with unique ids
//! - [`Derangement`] - Fixed-point-free permutation over registry positions
//!
//! ## Randomness
//!
//! [`generate_derangement`] draws from the thread-local CSPRNG. Pass a seeded
//! generator to [`generate_derangement_with_rng`] for reproducible draws.

pub mod derangement;
pub mod error;
pub mod registry;

pub use derangement::{
    derange_in_place, generate_derangement, generate_derangement_with_rng, Derangement,
    MIN_DERANGEMENT_LEN,
};
pub use error::{DrawError, Result};
pub use registry::{Participant, ParticipantRegistry, RESERVED_ID_CHARS};
