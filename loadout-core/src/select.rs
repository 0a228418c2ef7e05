//! Uniform random selection over catalog slices.
use rand::Rng;
use rand::seq::SliceRandom;

/// Pick one element uniformly at random. `None` only for an empty slice.
pub fn pick_one<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}

/// Pick up to `count` distinct elements: Fisher-Yates shuffle a working copy,
/// then keep the first `count`.
///
/// Distinct means distinct positions in `items`. When `count` exceeds the
/// slice length every element is returned.
pub fn pick_unique<T, R>(items: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    let mut working = items.to_vec();
    working.shuffle(rng);
    working.truncate(count);
    working
}
