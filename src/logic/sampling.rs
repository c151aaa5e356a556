use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SeedError;

/// Validate a `[min, max]` subset request against `available` candidates.
pub fn check_subset_range(available: usize, min: usize, max: usize) -> Result<(), SeedError> {
    if min > max {
        return Err(SeedError::Configuration(format!(
            "subset minimum {} is greater than maximum {}",
            min, max
        )));
    }
    if max > available {
        return Err(SeedError::Configuration(format!(
            "subset maximum {} exceeds the {} available candidates",
            max, available
        )));
    }
    Ok(())
}

/// Pick between `min` and `max` (inclusive, uniformly) distinct elements of
/// `items`. The candidates are shuffled with a uniform permutation and the
/// first `size` elements are taken.
pub fn random_subset<T: Clone, R: Rng>(
    rng: &mut R,
    items: &[T],
    min: usize,
    max: usize,
) -> Result<Vec<T>, SeedError> {
    check_subset_range(items.len(), min, max)?;

    let size = rng.gen_range(min..=max);
    let mut candidates = items.to_vec();
    candidates.shuffle(rng);
    candidates.truncate(size);
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    proptest! {
        #[test]
        fn subset_respects_bounds(
            size in 0usize..25,
            a in 0usize..25,
            b in 0usize..25,
            seed in any::<u64>(),
        ) {
            let (min, max) = (a.min(b).min(size), a.max(b).min(size));
            let items: Vec<usize> = (0..size).collect();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let subset = random_subset(&mut rng, &items, min, max).unwrap();

            prop_assert!(subset.len() >= min && subset.len() <= max);
            prop_assert_eq!(subset.iter().unique().count(), subset.len());
            prop_assert!(subset.iter().all(|item| items.contains(item)));
        }
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = random_subset(&mut rng, &[1, 2, 3], 3, 2).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn range_beyond_candidates_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = random_subset(&mut rng, &["a", "b"], 1, 3).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn every_size_in_range_is_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let items: Vec<u32> = (0..20).collect();
        let sizes: Vec<usize> = (0..500)
            .map(|_| random_subset(&mut rng, &items, 5, 7).unwrap().len())
            .unique()
            .sorted()
            .collect();
        assert_eq!(sizes, vec![5, 6, 7]);
    }
}
