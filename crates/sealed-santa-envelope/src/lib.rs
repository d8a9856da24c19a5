//! # Sealed Santa Envelope
//!
//! Hybrid encrypted envelopes: a payload that only one participant can open.
//!
//! ## Encryption Model
//!
//! Each envelope uses a two-layer key model:
//!
//! 1. **Content Key**: A fresh symmetric key (ChaCha20-Poly1305) encrypts the payload
//! 2. **Key Wrap**: The content key is wrapped for the recipient via X25519 ECDH
//!
//! Both layers are authenticated, so any modification of an envelope makes
//! opening it fail rather than yield different plaintext.
//!
//! ## Usage
//!
//! ```rust
//! use sealed_santa_envelope::{open_text, seal, ParticipantSecret};
//!
//! let secret_hex = "11".repeat(32);
//! let secret = ParticipantSecret::from_hex(&secret_hex).unwrap();
//! let public_hex = secret.public_key().to_hex();
//!
//! let envelope = seal(b"Bob", &public_hex).unwrap();
//! assert_eq!(open_text(&envelope, &secret_hex).unwrap(), "Bob");
//! ```

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod keywrap;

pub use crypto::{ContentKey, ParticipantPublicKey, ParticipantSecret, PayloadNonce};
pub use envelope::{open, open_text, seal, EncryptedEnvelope, EnvelopeFormat};
pub use error::{EnvelopeError, Result};
