//! Assignment: one derangement, one sealed envelope per giver.
//!
//! Giver `i` receives an envelope holding the id of participant `π(i)`,
//! sealed under giver `i`'s own public key.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use sealed_santa_core::{generate_derangement_with_rng, ParticipantRegistry};
use sealed_santa_envelope::EnvelopeFormat;

use crate::error::Result;

/// A giver and the envelope naming their receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedAssignment {
    /// Id of the participant who gives.
    pub giver: String,

    /// Envelope text; opens to the receiver's id.
    pub envelope: String,
}

/// Assign every participant a receiver using the default envelope format and
/// the thread-local CSPRNG.
pub fn assign(registry: &ParticipantRegistry) -> Result<Vec<SealedAssignment>> {
    assign_with(registry, EnvelopeFormat::default(), &mut rand::thread_rng())
}

/// Assign every participant a receiver.
///
/// `rng` drives the derangement only; envelope keys always come from the OS
/// random source. The output is in registry order. On error nothing is
/// returned, so callers never see a partial assignment.
pub fn assign_with<R>(
    registry: &ParticipantRegistry,
    format: EnvelopeFormat,
    rng: &mut R,
) -> Result<Vec<SealedAssignment>>
where
    R: RngCore + CryptoRng,
{
    let derangement = generate_derangement_with_rng(registry.len(), rng)?;
    let participants = registry.as_slice();

    derangement
        .pairs()
        .map(|(giver, receiver)| -> Result<SealedAssignment> {
            let giver = &participants[giver];
            let receiver = &participants[receiver];
            let envelope = format.seal_str(receiver.id.as_bytes(), &giver.public_key)?;

            Ok(SealedAssignment {
                giver: giver.id.clone(),
                envelope,
            })
        })
        .collect()
}
