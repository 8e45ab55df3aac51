//! Seeded "You May Also Like" picks.
//!
//! The permutation comes from `ChaCha20Rng::seed_from_u64(seed)` driving
//! `rand`'s Fisher-Yates `SliceRandom::shuffle`. Both crates are pinned in the
//! workspace manifest; bumping either is a change to the recommendation
//! vectors and must be treated as one.
use crate::product::Product;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

pub const DEFAULT_RECOMMENDATION_COUNT: usize = 4;

/// A permutation of `0..len` fully determined by `seed`.
#[must_use]
pub fn shuffled_indices(len: usize, seed: u64) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    indices
}

/// The first `count` products of the seeded permutation (fewer for small catalogs).
#[must_use]
pub fn recommendations(products: &[Product], seed: u64, count: usize) -> Vec<Product> {
    shuffled_indices(products.len(), seed)
        .into_iter()
        .take(count)
        .filter_map(|index| products.get(index).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;

    fn catalog(len: u32) -> Vec<Product> {
        (1..=len)
            .map(|id| Product {
                id,
                name: format!("P{id}"),
                price: Price::from_cents(i64::from(id)),
                description: String::new(),
                image: String::new(),
            })
            .collect()
    }

    #[test]
    fn permutation_is_complete() {
        let mut indices = shuffled_indices(50, 7);
        indices.sort_unstable();
        assert_eq!(indices, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_picks() {
        let products = catalog(30);
        let a = recommendations(&products, 42, DEFAULT_RECOMMENDATION_COUNT);
        let b = recommendations(&products, 42, DEFAULT_RECOMMENDATION_COUNT);
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn next_seed_reorders() {
        assert_ne!(shuffled_indices(20, 0), shuffled_indices(20, 1));
        assert_ne!(shuffled_indices(20, 1), shuffled_indices(20, 2));
    }

    #[test]
    fn small_catalogs_yield_fewer() {
        assert_eq!(recommendations(&catalog(3), 9, 4).len(), 3);
        assert!(recommendations(&[], 9, 4).is_empty());
    }
}
