//! Property-based tests for the rankers and fuzzy search.
//!
//! # Invariants tested
//!
//! - **Exclusion:** bookmarked places never appear in a ranking.
//! - **Length:** a ranking never exceeds `n` and fills it when enough
//!   candidates exist.
//! - **Monotonic blend:** raising either input of the hybrid blend never
//!   lowers the score.
//! - **Threshold:** every search hit meets the minimum score, and raising the
//!   minimum never adds hits.

#![expect(clippy::expect_used, reason = "tests should fail fast when setup breaks")]
#![expect(clippy::float_arithmetic, reason = "blend inputs are bumped in tests")]

use bena_core::{BookmarkSet, Place, PlaceId};
use bena_ranker::{
    ContentRanker, FuzzyTextSearch, HybridRanker, HybridWeights, ProximityRanker, RandomRanker,
    SearchOptions, TextSimilarityIndex,
};
use geo::Coord;
use proptest::prelude::*;

const VOCABULARY: &[&str] = &[
    "beach", "desert", "museum", "temple", "market", "garden", "resort", "diving", "pyramid",
];

fn place_strategy(index: usize) -> impl Strategy<Value = Place> {
    (
        -60.0_f64..60.0,
        -170.0_f64..170.0,
        prop::collection::vec(prop::sample::select(VOCABULARY), 0..4),
    )
        .prop_map(move |(lat, lon, tags)| {
            Place::new(format!("P{index}"), format!("Place {index}"), Coord { x: lon, y: lat })
                .with_tags(tags.join(" "))
        })
}

/// Places with unique ids plus a non-empty subset of them as bookmarks.
fn snapshot_strategy() -> impl Strategy<Value = (Vec<Place>, BookmarkSet)> {
    (2_usize..12)
        .prop_flat_map(|count| {
            let places: Vec<_> = (0..count).map(place_strategy).collect();
            (places, prop::collection::vec(any::<bool>(), count))
        })
        .prop_map(|(places, mask)| {
            let mut bookmarks: BookmarkSet = places
                .iter()
                .zip(&mask)
                .filter(|(_, bookmarked)| **bookmarked)
                .map(|(place, _)| place.id.clone())
                .collect();
            if bookmarks.is_empty() {
                bookmarks.extend(places.first().map(|place| place.id.clone()));
            }
            (places, bookmarks)
        })
}

fn assert_excludes(ids: &[&PlaceId], bookmarks: &BookmarkSet) -> Result<(), TestCaseError> {
    for id in ids {
        prop_assert!(!bookmarks.contains(id), "bookmarked {id} was recommended");
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rankings_exclude_bookmarks_and_respect_length(
        (places, bookmarks) in snapshot_strategy(),
        n in 1_usize..12,
    ) {
        let matrix = TextSimilarityIndex::default().build(&places).expect("unique ids");
        let candidates = places.len() - bookmarks.len();
        let expected = n.min(candidates);

        let content = ContentRanker::default().rank(&bookmarks, &places, &matrix, n);
        let proximity = ProximityRanker.rank(&bookmarks, &places, n);
        let hybrid = HybridRanker::default().rank(&bookmarks, &places, &matrix, n);

        for ranked in [&content, &proximity, &hybrid] {
            assert_excludes(&ranked.ids(), &bookmarks)?;
            prop_assert_eq!(ranked.len(), expected);
        }
    }

    #[test]
    fn proximity_is_sorted_ascending((places, bookmarks) in snapshot_strategy()) {
        let ranked = ProximityRanker.rank(&bookmarks, &places, places.len());
        let distances: Vec<f64> = ranked
            .iter()
            .filter_map(|scored| scored.scores.distance_km)
            .collect();
        prop_assert_eq!(distances.len(), ranked.len());
        prop_assert!(distances.windows(2).all(|pair| matches!(pair, [a, b] if a <= b)));
    }

    #[test]
    fn random_sample_is_distinct_and_bounded(
        (places, _) in snapshot_strategy(),
        n in 1_usize..16,
        seed in any::<u64>(),
    ) {
        let ranked = RandomRanker.rank(&places, n, Some(seed));
        let mut ids = ranked.ids();
        prop_assert_eq!(ids.len(), n.min(places.len()));
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), n.min(places.len()));
    }

    #[test]
    fn hybrid_blend_is_monotonic(
        content in 0.0_f64..=1.0,
        proximity in 0.0_f64..=1.0,
        bump in 0.0_f64..=1.0,
    ) {
        let weights = HybridWeights::default();
        let base = weights.blend(content, proximity);
        prop_assert!(weights.blend(content + bump, proximity) >= base);
        prop_assert!(weights.blend(content, proximity + bump) >= base);
    }

    #[test]
    fn search_scores_meet_threshold(
        (places, _) in snapshot_strategy(),
        query in prop::sample::select(VOCABULARY),
        min_score in 0_u8..=100,
        raise in 0_u8..=50,
    ) {
        let lower = SearchOptions { limit: places.len(), min_score };
        let higher = SearchOptions {
            limit: places.len(),
            min_score: min_score.saturating_add(raise).min(100),
        };
        let loose = FuzzyTextSearch.search(query, &places, lower);
        let strict = FuzzyTextSearch.search(query, &places, higher);

        prop_assert!(strict.len() <= loose.len());
        for scored in loose.iter() {
            let score = scored.scores.similarity.expect("search sets similarity");
            prop_assert!(score >= min_score);
        }
    }
}
