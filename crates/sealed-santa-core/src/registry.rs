//! Participant registry.
//!
//! An insertion-ordered map from participant id to public key text. Uniqueness
//! of ids is checked when a participant is inserted, so a registry that exists
//! is always free of duplicates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{DrawError, Result};

/// A participant in a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name, unique within a registry. Never empty, never padded.
    pub id: String,

    /// Serialized public key. Opaque to the registry.
    pub public_key: String,
}

impl Participant {
    /// Create a participant, trimming surrounding whitespace from the id.
    pub fn new(id: impl AsRef<str>, public_key: impl Into<String>) -> Result<Self> {
        let id = check_id(id.as_ref())?;

        Ok(Self {
            id: id.to_string(),
            public_key: public_key.into(),
        })
    }
}

/// Characters an id may not contain: ids are written into line-based,
/// colon-separated text.
pub const RESERVED_ID_CHARS: [char; 3] = [':', '\n', '\r'];

/// Trim an id and reject empty ids or ids holding reserved characters.
fn check_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DrawError::InvalidInput(
            "participant id must not be empty".into(),
        ));
    }
    if id.contains(RESERVED_ID_CHARS) {
        return Err(DrawError::InvalidInput(format!(
            "participant id {id:?} contains a reserved character"
        )));
    }
    Ok(id)
}

/// Ordered collection of participants with unique ids.
///
/// Iteration order is insertion order; positions returned by [`insert`] and
/// [`position`] are the indices a derangement is computed over.
///
/// [`insert`]: ParticipantRegistry::insert
/// [`position`]: ParticipantRegistry::position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Participant>", into = "Vec<Participant>")]
pub struct ParticipantRegistry {
    entries: Vec<Participant>,
    index: HashMap<String, usize>,
}

impl ParticipantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from `(id, public_key)` pairs, in order.
    ///
    /// Fails on the first duplicate or empty id.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut registry = Self::new();
        for (id, public_key) in pairs {
            registry.insert(id, public_key)?;
        }
        Ok(registry)
    }

    /// Append a participant and return its position.
    pub fn insert(&mut self, id: impl AsRef<str>, public_key: impl Into<String>) -> Result<usize> {
        self.push(Participant::new(id, public_key)?)
    }

    /// Append an already-built participant and return its position.
    pub fn push(&mut self, participant: Participant) -> Result<usize> {
        let id = check_id(&participant.id)?;
        if self.index.contains_key(id) {
            return Err(DrawError::InvalidInput(format!(
                "duplicate participant id: {id}"
            )));
        }

        let position = self.entries.len();
        self.index.insert(id.to_string(), position);
        self.entries.push(Participant {
            id: id.to_string(),
            public_key: participant.public_key,
        });
        Ok(position)
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no participants.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Participant at a position.
    pub fn get(&self, position: usize) -> Option<&Participant> {
        self.entries.get(position)
    }

    /// Participant with the given id.
    pub fn get_by_id(&self, id: &str) -> Option<&Participant> {
        self.position(id).and_then(|p| self.entries.get(p))
    }

    /// Position of the participant with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id.trim()).copied()
    }

    /// Whether a participant with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Participants in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.entries.iter()
    }

    /// Participant ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.id.as_str())
    }

    /// Participants as a slice, in insertion order.
    pub fn as_slice(&self) -> &[Participant] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a ParticipantRegistry {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl TryFrom<Vec<Participant>> for ParticipantRegistry {
    type Error = DrawError;

    fn try_from(participants: Vec<Participant>) -> Result<Self> {
        let mut registry = Self::new();
        for participant in participants {
            registry.push(participant)?;
        }
        Ok(registry)
    }
}

impl From<ParticipantRegistry> for Vec<Participant> {
    fn from(registry: ParticipantRegistry) -> Self {
        registry.entries
    }
}
