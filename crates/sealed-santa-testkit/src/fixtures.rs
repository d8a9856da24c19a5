//! Test fixtures and helpers.
//!
//! Participants with known keypairs, so tests can open every envelope.

use rand::RngCore;

use sealed_santa::SealedAssignment;
use sealed_santa_core::ParticipantRegistry;
use sealed_santa_envelope::{open_text, ParticipantSecret};

/// A participant whose secret key is known to the test.
#[derive(Debug)]
pub struct Party {
    pub name: String,
    pub secret: ParticipantSecret,
    secret_hex: String,
}

impl Party {
    /// Create with a random secret.
    pub fn new(name: &str) -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self::with_seed(name, seed)
    }

    /// Create with a deterministic secret.
    pub fn with_seed(name: &str, seed: [u8; 32]) -> Self {
        Self {
            name: name.to_string(),
            secret: ParticipantSecret::from_bytes(seed),
            secret_hex: hex::encode(seed),
        }
    }

    /// Hex public key, as it appears in setup text.
    pub fn public_hex(&self) -> String {
        self.secret.public_key().to_hex()
    }

    /// Hex secret key, as a participant would type it to reveal.
    pub fn secret_hex(&self) -> &str {
        &self.secret_hex
    }

    /// The `name:key` setup line for this participant.
    pub fn setup_line(&self) -> String {
        format!("{}:{}", self.name, self.public_hex())
    }
}

/// A group of participants for one draw.
#[derive(Debug)]
pub struct Roster {
    pub parties: Vec<Party>,
}

impl Roster {
    /// Participants with deterministic secrets, seeded by position.
    pub fn named(names: &[&str]) -> Self {
        let parties = names
            .iter()
            .enumerate()
            .map(|(i, name)| Party::with_seed(name, seed_for(i)))
            .collect();
        Self { parties }
    }

    /// `count` participants named `p0`, `p1`, ...
    pub fn numbered(count: usize) -> Self {
        let names: Vec<String> = (0..count).map(|i| format!("p{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        Self::named(&refs)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Participant by name.
    pub fn party(&self, name: &str) -> Option<&Party> {
        self.parties.iter().find(|p| p.name == name)
    }

    /// Build the registry a collaborator would hand to a draw.
    pub fn registry(&self) -> ParticipantRegistry {
        ParticipantRegistry::from_pairs(self.parties.iter().map(|p| (p.name.as_str(), p.public_hex())))
            .expect("roster names are unique")
    }

    /// Setup text, one line per participant.
    pub fn setup_text(&self) -> String {
        self.parties
            .iter()
            .map(|p| p.setup_line() + "\n")
            .collect()
    }

    /// Open every giver's envelope with their own secret.
    ///
    /// Returns `(giver, receiver)` pairs in the order given. Panics if a giver
    /// is not in the roster or an envelope does not open.
    pub fn open_all(&self, assignments: &[SealedAssignment]) -> Vec<(String, String)> {
        assignments
            .iter()
            .map(|a| {
                let party = self
                    .party(&a.giver)
                    .unwrap_or_else(|| panic!("unknown giver {}", a.giver));
                let receiver = open_text(&a.envelope, party.secret_hex())
                    .unwrap_or_else(|e| panic!("envelope for {} did not open: {e}", a.giver));
                (a.giver.clone(), receiver)
            })
            .collect()
    }
}

/// Deterministic secret seed for the participant at `index`.
///
/// Every byte depends on `index`, so seeds stay distinct after X25519
/// clamps the low bits.
pub fn seed_for(index: usize) -> [u8; 32] {
    blake3::derive_key(SEED_CONTEXT, &(index as u64).to_le_bytes())
}

const SEED_CONTEXT: &str = "sealed-santa testkit party seed";
