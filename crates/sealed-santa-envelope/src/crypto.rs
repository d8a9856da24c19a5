//! Key material and symmetric primitives.
//!
//! Provides X25519 participant keys and ChaCha20-Poly1305 authenticated
//! encryption. Secret material is zeroized on drop.

use std::fmt;
use std::str::FromStr;

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use rand::RngCore;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{EnvelopeError, Result};

/// Size of an X25519 key (public or secret) in bytes.
pub const X25519_KEY_SIZE: usize = 32;

/// Size of a symmetric content key in bytes (256 bits).
pub const CONTENT_KEY_SIZE: usize = 32;

/// Size of a ChaCha20-Poly1305 nonce in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Size of a Poly1305 authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// A participant's X25519 public key.
///
/// The text form is 64 hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantPublicKey([u8; X25519_KEY_SIZE]);

impl ParticipantPublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; X25519_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; X25519_KEY_SIZE] {
        &self.0
    }

    /// Parse the hex text form. Surrounding whitespace is ignored.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| EnvelopeError::InvalidKey(format!("public key is not hex: {e}")))?;
        let arr: [u8; X25519_KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            EnvelopeError::InvalidKey(format!(
                "public key must be {X25519_KEY_SIZE} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Hex text form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn to_dalek(self) -> PublicKey {
        PublicKey::from(self.0)
    }
}

impl From<PublicKey> for ParticipantPublicKey {
    fn from(pk: PublicKey) -> Self {
        Self(*pk.as_bytes())
    }
}

impl FromStr for ParticipantPublicKey {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for ParticipantPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantPublicKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for ParticipantPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A participant's X25519 static secret.
///
/// This crate never generates these; participants bring their own keys.
pub struct ParticipantSecret(StaticSecret);

impl ParticipantSecret {
    /// Create from raw secret bytes.
    pub fn from_bytes(bytes: [u8; X25519_KEY_SIZE]) -> Self {
        Self(StaticSecret::from(bytes))
    }

    /// Parse the hex text form. Surrounding whitespace is ignored.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = Zeroizing::new(
            hex::decode(s.trim())
                .map_err(|e| EnvelopeError::InvalidKey(format!("secret key is not hex: {e}")))?,
        );
        if bytes.len() != X25519_KEY_SIZE {
            return Err(EnvelopeError::InvalidKey(format!(
                "secret key must be {X25519_KEY_SIZE} bytes, got {}",
                bytes.len()
            )));
        }
        let mut arr = Zeroizing::new([0u8; X25519_KEY_SIZE]);
        arr.copy_from_slice(&bytes);
        Ok(Self::from_bytes(*arr))
    }

    /// Derive the matching public key.
    pub fn public_key(&self) -> ParticipantPublicKey {
        ParticipantPublicKey::from(PublicKey::from(&self.0))
    }

    pub(crate) fn inner(&self) -> &StaticSecret {
        &self.0
    }
}

impl FromStr for ParticipantSecret {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for ParticipantSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ParticipantSecret([REDACTED])")
    }
}

/// A single-use 256-bit ChaCha20-Poly1305 key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ContentKey([u8; CONTENT_KEY_SIZE]);

impl ContentKey {
    /// Generate a fresh key from the OS random source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; CONTENT_KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; CONTENT_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; CONTENT_KEY_SIZE] {
        &self.0
    }

    /// Encrypt data with this key. The output carries the 16-byte tag.
    pub fn encrypt(&self, plaintext: &[u8], nonce: &PayloadNonce) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| EnvelopeError::EncryptionFailure(e.to_string()))?;

        cipher
            .encrypt(Nonce::from_slice(&nonce.0), plaintext)
            .map_err(|e| EnvelopeError::EncryptionFailure(e.to_string()))
    }

    /// Decrypt and authenticate data with this key.
    pub fn decrypt(&self, ciphertext: &[u8], nonce: &PayloadNonce) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| EnvelopeError::DecryptionFailure(e.to_string()))?;

        cipher
            .decrypt(Nonce::from_slice(&nonce.0), ciphertext)
            .map_err(|_| EnvelopeError::DecryptionFailure("authentication failed".into()))
    }
}

impl fmt::Debug for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentKey([REDACTED])")
    }
}

/// A 96-bit ChaCha20-Poly1305 nonce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadNonce([u8; NONCE_SIZE]);

impl PayloadNonce {
    /// The all-zero nonce. Only safe under a key that is used once.
    pub const ZERO: Self = Self([0u8; NONCE_SIZE]);

    /// Generate a fresh nonce from the OS random source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice of exactly [`NONCE_SIZE`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}
