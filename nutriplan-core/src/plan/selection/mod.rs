use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Uniformly picks one element, or `None` for an empty slice.
///
/// Deterministic as long as the RNG is seeded with a reproducible seed.
pub fn pick_uniform<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// Draws `count` picks independently, with replacement.
pub fn pick_with_replacement<'a, T, R>(items: &'a [T], count: usize, rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Vec::new();
    }
    (0..count).filter_map(|_| items.choose(rng)).collect()
}

/// Returns the explicit seed, or a fresh one from the thread RNG.
pub fn resolve_seed(explicit: Option<u64>) -> u64 {
    explicit.unwrap_or_else(|| rand::thread_rng().gen())
}

pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
