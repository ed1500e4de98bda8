//! Cold-start ranking: a uniform sample of places.
//!
//! Used when a user has no bookmarks or interactions. The sample ignores
//! relevance entirely; a popularity- or location-aware cold start would be
//! the natural replacement.

use bena_core::{EmptyReason, Place, PlaceScores, RankedResult, ScoredPlace};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

/// Samples places uniformly without replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRanker;

impl RandomRanker {
    /// Draw `min(n, places.len())` distinct places.
    ///
    /// The same `seed` over the same snapshot always yields the same sample.
    /// Without a seed one is drawn from the thread-local generator and
    /// logged at debug level.
    ///
    /// # Examples
    /// ```
    /// use bena_core::test_support::sample_places;
    /// use bena_ranker::RandomRanker;
    ///
    /// let places = sample_places();
    /// let first = RandomRanker.rank(&places, 2, Some(7));
    /// let again = RandomRanker.rank(&places, 2, Some(7));
    /// assert_eq!(first.len(), 2);
    /// assert_eq!(first.ids(), again.ids());
    /// ```
    #[must_use]
    pub fn rank(&self, places: &[Place], n: usize, seed: Option<u64>) -> RankedResult {
        if places.is_empty() {
            return RankedResult::empty(EmptyReason::EmptySnapshot);
        }
        let seed = seed.unwrap_or_else(|| {
            let drawn = rand::thread_rng().r#gen::<u64>();
            log::debug!("sampling places with seed {drawn}");
            drawn
        });
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        RankedResult::new(
            places
                .choose_multiple(&mut rng, n)
                .map(|place| ScoredPlace::new(place.clone(), PlaceScores::default()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bena_core::test_support::sample_places;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(3, 3)]
    #[case(10, 3)]
    fn sample_size_is_bounded_by_snapshot(#[case] n: usize, #[case] expected: usize) {
        let ranked = RandomRanker.rank(&sample_places(), n, Some(1));
        assert_eq!(ranked.len(), expected);
    }

    #[rstest]
    fn sample_has_no_repeats() {
        let ranked = RandomRanker.rank(&sample_places(), 3, None);
        let unique: HashSet<_> = ranked.ids().into_iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[rstest]
    fn empty_snapshot_yields_reason() {
        let ranked = RandomRanker.rank(&[], 3, Some(1));
        assert_eq!(ranked.reason(), Some(&EmptyReason::EmptySnapshot));
    }
}
