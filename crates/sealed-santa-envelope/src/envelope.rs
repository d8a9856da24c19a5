//! Encrypted envelope.
//!
//! An envelope pairs a wrapped one-time content key with the payload that key
//! encrypts. Binary layout, all lengths little-endian:
//!
//! ```text
//! enc_key_len: u32 | iv_len: u32 | enc_key | iv | ciphertext
//! ```
//!
//! The text form is standard base64 of those bytes.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};

use crate::crypto::{ContentKey, ParticipantPublicKey, ParticipantSecret, PayloadNonce, NONCE_SIZE};
use crate::error::{EnvelopeError, Result};
use crate::keywrap::{unwrap_content_key, wrap_content_key, WRAPPED_KEY_SIZE};

/// Size of the two length prefixes.
pub const HEADER_SIZE: usize = 8;

/// Envelope scheme.
///
/// Selecting a scheme is explicit: sender and recipient must agree on it,
/// since the wire layout carries no scheme tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvelopeFormat {
    /// X25519 key agreement wraps a ChaCha20-Poly1305 content key; the payload
    /// is ChaCha20-Poly1305 under that key.
    #[default]
    #[serde(rename = "x25519-chacha20poly1305")]
    X25519ChaCha20Poly1305,
}

impl EnvelopeFormat {
    /// Expected length of the wrapped key field.
    pub const fn enc_key_len(self) -> usize {
        match self {
            Self::X25519ChaCha20Poly1305 => WRAPPED_KEY_SIZE,
        }
    }

    /// Expected length of the IV field.
    pub const fn iv_len(self) -> usize {
        match self {
            Self::X25519ChaCha20Poly1305 => NONCE_SIZE,
        }
    }

    /// Seal `plaintext` for the holder of `recipient`'s secret.
    ///
    /// The content key and nonce are fresh for every call and dropped
    /// (zeroized) before returning.
    pub fn seal(self, plaintext: &[u8], recipient: &ParticipantPublicKey) -> Result<EncryptedEnvelope> {
        match self {
            Self::X25519ChaCha20Poly1305 => {
                let content_key = ContentKey::generate();
                let nonce = PayloadNonce::generate();

                let ciphertext = content_key.encrypt(plaintext, &nonce)?;
                let enc_key = wrap_content_key(&content_key, recipient)?;

                Ok(EncryptedEnvelope {
                    enc_key,
                    iv: nonce.as_bytes().to_vec(),
                    ciphertext,
                })
            }
        }
    }

    /// Open an envelope with the recipient's secret.
    pub fn open(self, envelope: &EncryptedEnvelope, secret: &ParticipantSecret) -> Result<Vec<u8>> {
        self.check_shape(envelope)?;

        match self {
            Self::X25519ChaCha20Poly1305 => {
                let nonce = PayloadNonce::from_slice(&envelope.iv).ok_or_else(|| {
                    EnvelopeError::MalformedEnvelope("iv has the wrong length".into())
                })?;
                let content_key = unwrap_content_key(&envelope.enc_key, secret)?;
                content_key.decrypt(&envelope.ciphertext, &nonce)
            }
        }
    }

    /// Parse hex key text, seal, and encode the envelope as text.
    pub fn seal_str(self, plaintext: &[u8], public_key: &str) -> Result<String> {
        let recipient = ParticipantPublicKey::from_hex(public_key)?;
        Ok(self.seal(plaintext, &recipient)?.to_text())
    }

    /// Decode envelope text, parse hex key text, and open.
    pub fn open_str(self, envelope_text: &str, secret_key: &str) -> Result<Vec<u8>> {
        let envelope = EncryptedEnvelope::from_text(envelope_text)?;
        let secret = ParticipantSecret::from_hex(secret_key)?;
        self.open(&envelope, &secret)
    }

    /// Like [`open_str`](Self::open_str), but the plaintext must be UTF-8.
    pub fn open_utf8(self, envelope_text: &str, secret_key: &str) -> Result<String> {
        String::from_utf8(self.open_str(envelope_text, secret_key)?)
            .map_err(|_| EnvelopeError::DecryptionFailure("plaintext is not UTF-8".into()))
    }

    fn check_shape(self, envelope: &EncryptedEnvelope) -> Result<()> {
        if envelope.enc_key.len() != self.enc_key_len() {
            return Err(EnvelopeError::MalformedEnvelope(format!(
                "wrapped key must be {} bytes, got {}",
                self.enc_key_len(),
                envelope.enc_key.len()
            )));
        }
        if envelope.iv.len() != self.iv_len() {
            return Err(EnvelopeError::MalformedEnvelope(format!(
                "iv must be {} bytes, got {}",
                self.iv_len(),
                envelope.iv.len()
            )));
        }
        Ok(())
    }
}

/// A sealed envelope. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedEnvelope {
    enc_key: Vec<u8>,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
}

impl EncryptedEnvelope {
    /// The wrapped content key.
    pub fn enc_key(&self) -> &[u8] {
        &self.enc_key
    }

    /// The payload IV.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// The encrypted payload, tag included.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Total encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.enc_key.len() + self.iv.len() + self.ciphertext.len()
    }

    /// Serialize to the binary layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        buf.put_u32_le(self.enc_key.len() as u32);
        buf.put_u32_le(self.iv.len() as u32);
        buf.put_slice(&self.enc_key);
        buf.put_slice(&self.iv);
        buf.put_slice(&self.ciphertext);
        buf
    }

    /// Parse the binary layout.
    ///
    /// Only the framing is checked here; scheme-specific field sizes are
    /// checked when opening.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut buf = bytes;
        if buf.remaining() < HEADER_SIZE {
            return Err(EnvelopeError::MalformedEnvelope(format!(
                "envelope is {} bytes, shorter than its {HEADER_SIZE}-byte header",
                bytes.len()
            )));
        }

        let enc_key_len = buf.get_u32_le() as usize;
        let iv_len = buf.get_u32_le() as usize;
        let fits = enc_key_len
            .checked_add(iv_len)
            .is_some_and(|claimed| claimed <= buf.remaining());
        if !fits {
            return Err(EnvelopeError::MalformedEnvelope(format!(
                "length prefixes claim {enc_key_len} + {iv_len} bytes, only {} remain",
                buf.remaining()
            )));
        }

        let enc_key = buf[..enc_key_len].to_vec();
        buf.advance(enc_key_len);
        let iv = buf[..iv_len].to_vec();
        buf.advance(iv_len);
        let ciphertext = buf.to_vec();

        Ok(Self {
            enc_key,
            iv,
            ciphertext,
        })
    }

    /// Encode as base64 text.
    pub fn to_text(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Decode from base64 text. Surrounding whitespace is ignored.
    pub fn from_text(text: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(text.trim())
            .map_err(|e| EnvelopeError::MalformedEnvelope(format!("invalid base64: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Display for EncryptedEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for EncryptedEnvelope {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

/// Seal `plaintext` for a hex public key with the default format, returning
/// envelope text.
pub fn seal(plaintext: &[u8], public_key: &str) -> Result<String> {
    EnvelopeFormat::default().seal_str(plaintext, public_key)
}

/// Open envelope text with a hex secret key using the default format.
pub fn open(envelope_text: &str, secret_key: &str) -> Result<Vec<u8>> {
    EnvelopeFormat::default().open_str(envelope_text, secret_key)
}

/// Like [`open`], but the plaintext must be UTF-8.
pub fn open_text(envelope_text: &str, secret_key: &str) -> Result<String> {
    EnvelopeFormat::default().open_utf8(envelope_text, secret_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn keypair(seed: u8) -> (ParticipantSecret, String, String) {
        let bytes = [seed; 32];
        let secret = ParticipantSecret::from_bytes(bytes);
        let public_hex = secret.public_key().to_hex();
        (secret, hex::encode(bytes), public_hex)
    }

    fn flip(text: &str, index: usize) -> String {
        let mut bytes = BASE64.decode(text).unwrap();
        bytes[index] ^= 0x01;
        BASE64.encode(bytes)
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let (_, secret_hex, public_hex) = keypair(1);

        let text = seal(b"Bob", &public_hex).unwrap();
        assert_eq!(open(&text, &secret_hex).unwrap(), b"Bob");
        assert_eq!(open_text(&text, &secret_hex).unwrap(), "Bob");
    }

    #[test]
    fn test_layout() {
        let (secret, _, _) = keypair(2);
        let envelope = EnvelopeFormat::default()
            .seal(b"Carol", &secret.public_key())
            .unwrap();

        let bytes = envelope.to_bytes();
        assert_eq!(bytes.len(), envelope.encoded_len());
        assert_eq!(&bytes[0..4], &(WRAPPED_KEY_SIZE as u32).to_le_bytes());
        assert_eq!(&bytes[4..8], &(NONCE_SIZE as u32).to_le_bytes());
        assert_eq!(&bytes[8..8 + WRAPPED_KEY_SIZE], envelope.enc_key());
        assert_eq!(envelope.ciphertext().len(), b"Carol".len() + 16);

        let parsed = EncryptedEnvelope::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn test_envelopes_are_randomized() {
        let (_, _, public_hex) = keypair(3);
        assert_ne!(seal(b"Dan", &public_hex).unwrap(), seal(b"Dan", &public_hex).unwrap());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let (_, _, public_hex) = keypair(4);
        let (_, other_secret, _) = keypair(5);

        let text = seal(b"Eve", &public_hex).unwrap();
        assert!(matches!(
            open(&text, &other_secret),
            Err(EnvelopeError::DecryptionFailure(_))
        ));
    }

    #[test]
    fn test_every_single_byte_flip_detected() {
        let (_, secret_hex, public_hex) = keypair(6);
        let text = seal(b"Frank", &public_hex).unwrap();
        let len = BASE64.decode(&text).unwrap().len();

        for index in 0..len {
            let result = open(&flip(&text, index), &secret_hex);
            assert!(
                matches!(
                    result,
                    Err(EnvelopeError::DecryptionFailure(_)) | Err(EnvelopeError::MalformedEnvelope(_))
                ),
                "flip at byte {index} was not detected: {result:?}"
            );
        }
    }

    #[test]
    fn test_prefix_overrun_is_malformed() {
        let mut bytes = Vec::new();
        bytes.put_u32_le(80);
        bytes.put_u32_le(12);
        bytes.put_slice(&[0u8; 40]);

        assert!(matches!(
            EncryptedEnvelope::from_bytes(&bytes),
            Err(EnvelopeError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_prefix_overflow_is_malformed() {
        let mut bytes = Vec::new();
        bytes.put_u32_le(u32::MAX);
        bytes.put_u32_le(u32::MAX);

        assert!(matches!(
            EncryptedEnvelope::from_bytes(&bytes),
            Err(EnvelopeError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_short_and_garbage_input_is_malformed() {
        let (_, secret_hex, _) = keypair(7);

        assert!(matches!(
            EncryptedEnvelope::from_bytes(&[1, 2, 3]),
            Err(EnvelopeError::MalformedEnvelope(_))
        ));
        assert!(matches!(
            open("!!! not base64 !!!", &secret_hex),
            Err(EnvelopeError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_framing_accepts_foreign_field_sizes() {
        // Framing is scheme-agnostic; sizes are enforced on open.
        let mut bytes = Vec::new();
        bytes.put_u32_le(3);
        bytes.put_u32_le(16);
        bytes.put_slice(&[9u8; 3]);
        bytes.put_slice(&[8u8; 16]);
        bytes.put_slice(&[7u8; 5]);

        let envelope = EncryptedEnvelope::from_bytes(&bytes).unwrap();
        assert_eq!(envelope.enc_key(), &[9u8; 3]);
        assert_eq!(envelope.iv(), &[8u8; 16]);
        assert_eq!(envelope.ciphertext(), &[7u8; 5]);

        let (secret, _, _) = keypair(8);
        assert!(matches!(
            EnvelopeFormat::default().open(&envelope, &secret),
            Err(EnvelopeError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_bad_key_text() {
        let (_, secret_hex, public_hex) = keypair(9);
        let text = seal(b"Gina", &public_hex).unwrap();

        assert!(matches!(seal(b"x", "zz"), Err(EnvelopeError::InvalidKey(_))));
        assert!(matches!(open(&text, "zz"), Err(EnvelopeError::InvalidKey(_))));
        assert!(open(&text, &secret_hex).is_ok());
    }

    #[test]
    fn test_non_utf8_plaintext() {
        let (_, secret_hex, public_hex) = keypair(10);
        let text = seal(&[0xff, 0xfe], &public_hex).unwrap();

        assert_eq!(open(&text, &secret_hex).unwrap(), vec![0xff, 0xfe]);
        assert!(matches!(
            open_text(&text, &secret_hex),
            Err(EnvelopeError::DecryptionFailure(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(seed in any::<[u8; 32]>(), plaintext in prop::collection::vec(any::<u8>(), 0..512)) {
            let secret = ParticipantSecret::from_bytes(seed);
            let format = EnvelopeFormat::default();

            let envelope = format.seal(&plaintext, &secret.public_key()).unwrap();
            let reparsed = EncryptedEnvelope::from_text(&envelope.to_text()).unwrap();

            prop_assert_eq!(format.open(&reparsed, &secret).unwrap(), plaintext);
        }
    }
}
