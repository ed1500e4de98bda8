//! Hybrid ranking: a weighted blend of content and proximity scores.

use bena_core::{BookmarkSet, EmptyReason, Place, PlaceScores, RankedResult};

use crate::proximity::{bookmark_locations, min_distance};
use crate::rank::{Candidate, Order, top_n};
use crate::{ConfigError, ContentRanker, SimilarityMatrix};

/// Default weight of the content score.
pub const DEFAULT_CONTENT_WEIGHT: f64 = 0.6;
/// Default weight of the proximity score.
pub const DEFAULT_PROXIMITY_WEIGHT: f64 = 0.4;

/// Linear blend weights `{content, proximity}`.
///
/// Weights are expected, but not required, to sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HybridWeights {
    /// Multiplier applied to the content score.
    pub content: f64,
    /// Multiplier applied to the proximity score.
    pub proximity: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            content: DEFAULT_CONTENT_WEIGHT,
            proximity: DEFAULT_PROXIMITY_WEIGHT,
        }
    }
}

impl HybridWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidWeights`] when either value is not
    /// finite or negative, or both are zero.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let finite = self.content.is_finite() && self.proximity.is_finite();
        let non_negative = self.content >= 0.0 && self.proximity >= 0.0;
        let non_zero = self.content > 0.0 || self.proximity > 0.0;
        if finite && non_negative && non_zero {
            Ok(self)
        } else {
            Err(ConfigError::InvalidWeights {
                content: self.content,
                proximity: self.proximity,
            })
        }
    }

    /// Blend a content and a proximity score.
    ///
    /// # Examples
    /// ```
    /// use bena_ranker::HybridWeights;
    ///
    /// let blended = HybridWeights::default().blend(1.0, 0.5);
    /// assert!((blended - 0.8).abs() < 1e-12);
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "linear blend of two scores")]
    pub fn blend(self, content: f64, proximity: f64) -> f64 {
        self.content * content + self.proximity * proximity
    }
}

/// Ranks places by `content·w_c + proximity·w_p`.
///
/// Proximity is normalised per call as `1 - d / max_d`, where `max_d` is the
/// largest distance among the candidates, so the farthest candidate scores
/// `0.0`. When `max_d` is zero every candidate scores `1.0`. Candidates
/// without a finite distance score `0.0` for proximity.
#[derive(Debug, Clone, Default)]
pub struct HybridRanker {
    content: ContentRanker,
    weights: HybridWeights,
}

impl HybridRanker {
    /// Create a ranker from a content ranker and blend weights.
    #[must_use]
    pub const fn new(content: ContentRanker, weights: HybridWeights) -> Self {
        Self { content, weights }
    }

    /// Blend weights in use.
    #[must_use]
    pub const fn weights(&self) -> HybridWeights {
        self.weights
    }

    /// Rank unbookmarked places by hybrid score, best first.
    ///
    /// # Examples
    /// ```
    /// use bena_core::{BookmarkSet, PlaceId, test_support::sample_places};
    /// use bena_ranker::{HybridRanker, TextSimilarityIndex};
    ///
    /// let places = sample_places();
    /// let matrix = TextSimilarityIndex::default().build(&places).expect("unique ids");
    /// let bookmarks: BookmarkSet = [PlaceId::from("P1")].into_iter().collect();
    ///
    /// let ranked = HybridRanker::default().rank(&bookmarks, &places, &matrix, 5);
    /// let ids: Vec<&str> = ranked.ids().into_iter().map(|id| id.as_str()).collect();
    /// assert_eq!(ids, ["P2", "P3"]);
    /// ```
    #[must_use]
    pub fn rank(
        &self,
        bookmarks: &BookmarkSet,
        places: &[Place],
        matrix: &SimilarityMatrix,
        n: usize,
    ) -> RankedResult {
        if bookmarks.is_empty() {
            return RankedResult::empty(EmptyReason::NoBookmarks);
        }
        let anchors = bookmark_locations(bookmarks, places);
        if anchors.is_empty() {
            log::info!("none of {} bookmarked places has a usable location", bookmarks.len());
            return RankedResult::empty(EmptyReason::NoBookmarkLocations);
        }

        let content = self.content.scores(bookmarks, places, matrix);
        let scored: Vec<(&Place, f64, Option<f64>)> = places
            .iter()
            .zip(content)
            .filter(|(place, _)| !bookmarks.contains(&place.id))
            .map(|(place, content)| (place, content, min_distance(place, &anchors)))
            .collect();
        let max_distance = scored
            .iter()
            .filter_map(|&(_, _, distance)| distance)
            .fold(0.0_f64, f64::max);

        let candidates = scored
            .into_iter()
            .map(|(place, content, distance)| {
                let proximity = normalise_proximity(distance, max_distance);
                let hybrid = self.weights.blend(content, proximity);
                Candidate {
                    place,
                    key: hybrid,
                    scores: PlaceScores {
                        content: Some(content),
                        proximity: Some(proximity),
                        hybrid: Some(hybrid),
                        distance_km: distance,
                        ..PlaceScores::default()
                    },
                }
            })
            .collect();
        top_n(candidates, Order::Descending, n)
    }
}

/// Map a distance onto `0.0..=1.0`, closer being higher.
#[expect(clippy::float_arithmetic, reason = "distance normalisation")]
fn normalise_proximity(distance: Option<f64>, max_distance: f64) -> f64 {
    match distance {
        None => 0.0,
        Some(_) if max_distance <= 0.0 => 1.0,
        Some(distance) => (1.0 - distance / max_distance).clamp(0.0, 1.0),
    }
}
