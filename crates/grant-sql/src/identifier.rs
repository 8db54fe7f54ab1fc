//! Row identifier generation.
//!
//! Every generated row needs a fresh primary key. Identifiers are version 4
//! UUIDs, drawn either from the operating system RNG or from a seeded
//! ChaCha8 stream when reproducible output is wanted.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::{Builder, Uuid};

/// Returns a fresh random identifier in canonical hyphenated form.
///
/// # Example
///
/// ```
/// let id = grant_sql::generate_identifier();
///
/// assert_eq!(id.len(), 36);
/// assert_eq!(id.matches('-').count(), 4);
/// ```
#[must_use]
pub fn generate_identifier() -> String {
    RandomIds.next_id().hyphenated().to_string()
}

/// Source of row identifiers.
pub trait IdGenerator {
    /// Returns the next identifier.
    fn next_id(&mut self) -> Uuid;
}

/// Random version 4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic version 4 identifiers derived from a seed.
///
/// The same seed always yields the same sequence.
///
/// # Example
///
/// ```
/// use grant_sql::{IdGenerator, SeededIds};
///
/// let mut first = SeededIds::new(2026);
/// let mut second = SeededIds::new(2026);
///
/// assert_eq!(first.next_id(), second.next_id());
/// ```
#[derive(Debug, Clone)]
pub struct SeededIds {
    rng: ChaCha8Rng,
}

impl SeededIds {
    /// Creates a generator seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl IdGenerator for SeededIds {
    fn next_id(&mut self) -> Uuid {
        let mut bytes = [0_u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;
    use uuid::{Variant, Version};

    use super::*;

    fn is_canonical(text: &str) -> bool {
        let groups: Vec<&str> = text.split('-').collect();
        let lengths: Vec<usize> = groups.iter().map(|group| group.len()).collect();
        lengths == [8, 4, 4, 4, 12]
            && groups.iter().all(|group| {
                group
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            })
    }

    #[test]
    fn generated_identifier_is_canonical() {
        for _ in 0..32 {
            let id = generate_identifier();
            assert!(is_canonical(&id), "not canonical: {id}");
        }
    }

    #[test]
    fn generated_identifiers_do_not_repeat() {
        let ids: HashSet<String> = (0..256).map(|_| generate_identifier()).collect();
        assert_eq!(ids.len(), 256);
    }

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(u64::MAX)]
    fn seeded_ids_are_version_four(#[case] seed: u64) {
        let mut ids = SeededIds::new(seed);
        for _ in 0..16 {
            let id = ids.next_id();
            assert_eq!(id.get_version(), Some(Version::Random));
            assert_eq!(id.get_variant(), Variant::RFC4122);
            assert!(is_canonical(&id.to_string()));
        }
    }

    #[test]
    fn seeded_ids_repeat_for_same_seed() {
        let mut first = SeededIds::new(7);
        let mut second = SeededIds::new(7);

        let a: Vec<Uuid> = (0..12).map(|_| first.next_id()).collect();
        let b: Vec<Uuid> = (0..12).map(|_| second.next_id()).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn seeded_ids_differ_between_seeds() {
        let mut first = SeededIds::new(1);
        let mut second = SeededIds::new(2);

        assert_ne!(first.next_id(), second.next_id());
    }

    #[test]
    fn seeded_sequence_has_no_repeats() {
        let mut ids = SeededIds::new(2026);
        let seen: HashSet<Uuid> = (0..512).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 512);
    }
}
