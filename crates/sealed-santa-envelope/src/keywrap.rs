//! Content-key wrapping via X25519 key agreement.
//!
//! The sender generates an ephemeral X25519 keypair, agrees a shared secret
//! with the recipient's public key, derives a one-time wrap key with BLAKE3,
//! and seals the content key under it. Only the holder of the recipient's
//! secret can redo the agreement and unwrap.
//!
//! Wire form: `ephemeral_public (32) || sealed_content_key (32 + 16 tag)`.

use rand::rngs::OsRng;
use x25519_dalek::{EphemeralSecret, PublicKey, SharedSecret};
use zeroize::Zeroizing;

use crate::crypto::{
    ContentKey, ParticipantPublicKey, ParticipantSecret, PayloadNonce, CONTENT_KEY_SIZE, TAG_SIZE,
    X25519_KEY_SIZE,
};
use crate::error::{EnvelopeError, Result};

/// Length of a wrapped content key in bytes.
pub const WRAPPED_KEY_SIZE: usize = X25519_KEY_SIZE + CONTENT_KEY_SIZE + TAG_SIZE;

const WRAP_CONTEXT: &str = "sealed-santa v1 content-key wrap";

/// Wrap `content_key` so that only `recipient` can recover it.
///
/// Fails with [`EnvelopeError::InvalidKey`] when the recipient key is a
/// low-order point, since the agreed secret would be predictable.
pub fn wrap_content_key(
    content_key: &ContentKey,
    recipient: &ParticipantPublicKey,
) -> Result<Vec<u8>> {
    let ephemeral = EphemeralSecret::random_from_rng(OsRng);
    let ephemeral_public = ParticipantPublicKey::from(PublicKey::from(&ephemeral));

    let shared = ephemeral.diffie_hellman(&recipient.to_dalek());
    if !shared.was_contributory() {
        return Err(EnvelopeError::InvalidKey(
            "public key is a low-order point".into(),
        ));
    }

    let wrap_key = derive_wrap_key(&shared, &ephemeral_public, recipient);
    let sealed = wrap_key.encrypt(content_key.as_bytes(), &PayloadNonce::ZERO)?;

    let mut wrapped = Vec::with_capacity(WRAPPED_KEY_SIZE);
    wrapped.extend_from_slice(ephemeral_public.as_bytes());
    wrapped.extend_from_slice(&sealed);
    Ok(wrapped)
}

/// Recover a content key wrapped for `secret`'s public key.
pub fn unwrap_content_key(wrapped: &[u8], secret: &ParticipantSecret) -> Result<ContentKey> {
    if wrapped.len() != WRAPPED_KEY_SIZE {
        return Err(EnvelopeError::MalformedEnvelope(format!(
            "wrapped key must be {WRAPPED_KEY_SIZE} bytes, got {}",
            wrapped.len()
        )));
    }

    let (ephemeral_bytes, sealed) = wrapped.split_at(X25519_KEY_SIZE);
    let mut ephemeral_arr = [0u8; X25519_KEY_SIZE];
    ephemeral_arr.copy_from_slice(ephemeral_bytes);
    let ephemeral_public = ParticipantPublicKey::from_bytes(ephemeral_arr);

    let shared = secret.inner().diffie_hellman(&ephemeral_public.to_dalek());
    if !shared.was_contributory() {
        return Err(EnvelopeError::DecryptionFailure(
            "ephemeral key is a low-order point".into(),
        ));
    }

    let wrap_key = derive_wrap_key(&shared, &ephemeral_public, &secret.public_key());
    let key_bytes = Zeroizing::new(wrap_key.decrypt(sealed, &PayloadNonce::ZERO)?);

    let arr: [u8; CONTENT_KEY_SIZE] = key_bytes.as_slice().try_into().map_err(|_| {
        EnvelopeError::DecryptionFailure(format!(
            "invalid content key length: expected {CONTENT_KEY_SIZE}, got {}",
            key_bytes.len()
        ))
    })?;
    Ok(ContentKey::from_bytes(arr))
}

/// Bind the wrap key to both public halves of the agreement.
fn derive_wrap_key(
    shared: &SharedSecret,
    ephemeral_public: &ParticipantPublicKey,
    recipient: &ParticipantPublicKey,
) -> ContentKey {
    let mut hasher = blake3::Hasher::new_derive_key(WRAP_CONTEXT);
    hasher.update(shared.as_bytes());
    hasher.update(ephemeral_public.as_bytes());
    hasher.update(recipient.as_bytes());
    ContentKey::from_bytes(*hasher.finalize().as_bytes())
}
