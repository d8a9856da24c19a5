//! Proptest generators for property-based testing.

use proptest::prelude::*;

use crate::fixtures::{Party, Roster};

/// Generate a participant name: no separator, no surrounding whitespace.
pub fn participant_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,11}( [A-Z][a-z]{1,11})?".prop_map(String::from)
}

/// Generate between `min` and `max` distinct participant names.
pub fn unique_names(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(participant_name(), min..=max)
        .prop_map(|names| names.into_iter().collect())
}

/// Generate a roster of `min..=max` participants with random secret keys.
pub fn roster(min: usize, max: usize) -> impl Strategy<Value = Roster> {
    unique_names(min, max).prop_flat_map(|names| {
        let count = names.len();
        (Just(names), prop::collection::vec(any::<[u8; 32]>(), count))
    })
    .prop_map(|(names, seeds)| Roster {
        parties: names
            .iter()
            .zip(seeds)
            .map(|(name, seed)| Party::with_seed(name, seed))
            .collect(),
    })
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use sealed_santa::{parse_setup, SantaDraw, SetupOptions};
    use sealed_santa_envelope::{open, seal};
    use std::collections::BTreeSet;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn test_names_survive_setup_parsing(names in unique_names(2, 10)) {
            let roster = Roster::named(&names.iter().map(String::as_str).collect::<Vec<_>>());
            let registry = parse_setup(&roster.setup_text(), &SetupOptions::default()).unwrap();

            let parsed: Vec<_> = registry.ids().map(String::from).collect();
            prop_assert_eq!(parsed, names);
        }

        #[test]
        fn test_every_giver_reads_someone_else(group in roster(2, 9), seed in any::<u64>()) {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let out = SantaDraw::default().draw_with_rng(&group.registry(), &mut rng).unwrap();
            let pairs = group.open_all(&out);

            let givers: Vec<_> = pairs.iter().map(|(g, _)| g.clone()).collect();
            let names: Vec<_> = group.parties.iter().map(|p| p.name.clone()).collect();
            prop_assert_eq!(givers, names.clone());

            prop_assert!(pairs.iter().all(|(g, r)| g != r));
            let receivers: BTreeSet<_> = pairs.into_iter().map(|(_, r)| r).collect();
            prop_assert_eq!(receivers, names.into_iter().collect::<BTreeSet<_>>());
        }

        #[test]
        fn test_seal_open_arbitrary_payload(bytes in payload(256), seed in any::<[u8; 32]>()) {
            let party = Party::with_seed("x", seed);
            let text = seal(&bytes, &party.public_hex()).unwrap();
            prop_assert_eq!(open(&text, party.secret_hex()).unwrap(), bytes);
        }
    }
}
