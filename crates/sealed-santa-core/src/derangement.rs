//! Random derangements.
//!
//! A derangement is a permutation that leaves no element in its original
//! position. Generation is a Fisher-Yates pass with two corrections:
//!
//! 1. An element that has not moved yet must leave its slot, so its swap
//!    partner is drawn from the positions after it. An element that already
//!    moved may stay, which keeps every derangement reachable.
//! 2. The last two slots are settled together. If either one never moved they
//!    must be swapped. If both moved, a fair coin decides.
//!
//! The resulting distribution covers every derangement but is not uniform.

use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{DrawError, Result};

/// Smallest sequence length that admits a derangement.
pub const MIN_DERANGEMENT_LEN: usize = 2;

/// A fixed-point-free permutation of `[0, n)`.
///
/// Position `i` maps to `receiver_of(i)`, which is never `i`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Derangement(Vec<usize>);

impl Derangement {
    /// Validate an explicit mapping.
    ///
    /// Fails unless `mapping` is a bijection on `[0, len)` with no fixed
    /// point and at least two entries.
    pub fn from_vec(mapping: Vec<usize>) -> Result<Self> {
        let n = mapping.len();
        if n < MIN_DERANGEMENT_LEN {
            return Err(too_short(n));
        }

        let mut seen = vec![false; n];
        for (i, &target) in mapping.iter().enumerate() {
            if target >= n {
                return Err(DrawError::InvalidInput(format!(
                    "position {i} maps outside the sequence: {target}"
                )));
            }
            if target == i {
                return Err(DrawError::InvalidInput(format!(
                    "position {i} maps to itself"
                )));
            }
            if std::mem::replace(&mut seen[target], true) {
                return Err(DrawError::InvalidInput(format!(
                    "position {target} is targeted twice"
                )));
            }
        }

        Ok(Self(mapping))
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a derangement has at least two positions.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position assigned to `giver`.
    pub fn receiver_of(&self, giver: usize) -> Option<usize> {
        self.0.get(giver).copied()
    }

    /// `(giver, receiver)` pairs in giver order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied().enumerate()
    }

    /// The mapping as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Consume into the underlying mapping.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl TryFrom<Vec<usize>> for Derangement {
    type Error = DrawError;

    fn try_from(mapping: Vec<usize>) -> Result<Self> {
        Self::from_vec(mapping)
    }
}

impl From<Derangement> for Vec<usize> {
    fn from(d: Derangement) -> Self {
        d.0
    }
}

/// Generate a derangement of `[0, n)` from the thread-local CSPRNG.
pub fn generate_derangement(n: usize) -> Result<Derangement> {
    generate_derangement_with_rng(n, &mut rand::thread_rng())
}

/// Generate a derangement of `[0, n)` from the given generator.
///
/// The caller's sequence is never touched; the shuffle runs over a fresh
/// identity sequence.
pub fn generate_derangement_with_rng<R>(n: usize, rng: &mut R) -> Result<Derangement>
where
    R: RngCore + CryptoRng,
{
    let mut mapping: Vec<usize> = (0..n).collect();
    derange_in_place(&mut mapping, rng)?;
    Ok(Derangement(mapping))
}

/// Rearrange `items` so that no element stays at its starting index.
///
/// Fails with [`DrawError::InvalidInput`] when `items` has fewer than two
/// elements, in which case `items` is left unchanged.
pub fn derange_in_place<T, R>(items: &mut [T], rng: &mut R) -> Result<()>
where
    R: RngCore + CryptoRng,
{
    let n = items.len();
    if n < MIN_DERANGEMENT_LEN {
        return Err(too_short(n));
    }

    let mut moved = vec![false; n];
    for i in 0..n - 2 {
        let start = if moved[i] { i } else { i + 1 };
        let r = rng.gen_range(start..n);
        items.swap(i, r);
        moved[i] = true;
        moved[r] = true;
    }

    let (a, b) = (n - 2, n - 1);
    if !moved[a] || !moved[b] || rng.gen::<bool>() {
        items.swap(a, b);
    }

    Ok(())
}

fn too_short(n: usize) -> DrawError {
    DrawError::InvalidInput(format!(
        "a derangement needs at least {MIN_DERANGEMENT_LEN} elements, got {n}"
    ))
}
