use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::IndexedRandom, Rng, SeedableRng};

/// Draw up to `k` items per group, uniformly and without replacement.
///
/// Groups are visited in key order; groups smaller than `k` are taken whole.
/// The result is the concatenation of every group's draw.
pub fn sample_per_group<T, K, R>(items: &[T], group_key: impl Fn(&T) -> K, k: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    K: Ord,
    R: Rng + ?Sized,
{
    let mut groups: BTreeMap<K, Vec<&T>> = BTreeMap::new();
    for item in items {
        groups.entry(group_key(item)).or_default().push(item);
    }

    let mut sample = Vec::new();
    for members in groups.values() {
        sample.extend(members.choose_multiple(rng, k).map(|&item| item.clone()));
    }
    sample
}

/// `sample_per_group` with a reproducible RNG when `seed` is given,
/// otherwise the thread-local RNG.
pub fn sample_per_group_seeded<T, K>(items: &[T], group_key: impl Fn(&T) -> K, k: usize, seed: Option<u64>) -> Vec<T>
where
    T: Clone,
    K: Ord,
{
    match seed {
        Some(seed) => sample_per_group(items, group_key, k, &mut StdRng::seed_from_u64(seed)),
        None => sample_per_group(items, group_key, k, &mut rand::rng()),
    }
}
