use rand::Rng;

use crate::*;

/// Uniform integer in `[min, max]`, both ends inclusive.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: Number, max: Number) -> Number {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Uniform pick from `items`, `None` when there is nothing to pick from.
pub fn pick_random<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.random_range(0..items.len()))
}
