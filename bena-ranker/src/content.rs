//! Content-based ranking from tag similarity to the user's bookmarks.

use bena_core::{BookmarkSet, EmptyReason, Place, PlaceScores, RankedResult};

use crate::SimilarityMatrix;
use crate::rank::{Candidate, Order, top_n};

/// Tag marker flagging places that cannot be visited yet.
pub const DEFAULT_UNAVAILABLE_MARKER: &str = "Not available yet";
/// Content score forced onto places carrying an unavailable marker.
pub const DEFAULT_UNAVAILABLE_SCORE: f64 = 0.1;

/// Override that pins places tagged as unavailable to a fixed low score.
///
/// A place matches when its tags contain any marker, ignoring case. Empty
/// markers never match.
///
/// # Examples
/// ```
/// use bena_ranker::UnavailablePolicy;
///
/// let policy = UnavailablePolicy::default();
/// assert!(policy.matches("museum, NOT AVAILABLE YET"));
/// assert!(!policy.matches("museum"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnavailablePolicy {
    /// Case-insensitive substrings marking a place as unavailable.
    pub markers: Vec<String>,
    /// Score assigned to matching places.
    pub score: f64,
}

impl Default for UnavailablePolicy {
    fn default() -> Self {
        Self {
            markers: vec![DEFAULT_UNAVAILABLE_MARKER.to_owned()],
            score: DEFAULT_UNAVAILABLE_SCORE,
        }
    }
}

impl UnavailablePolicy {
    /// Report whether `tags` carry any unavailable marker.
    #[must_use]
    pub fn matches(&self, tags: &str) -> bool {
        let tags = tags.to_lowercase();
        self.markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| tags.contains(&marker.to_lowercase()))
    }
}

/// Ranks places by summed tag similarity to every bookmarked place.
#[derive(Debug, Clone, Default)]
pub struct ContentRanker {
    unavailable: UnavailablePolicy,
}

impl ContentRanker {
    /// Create a ranker with the given unavailable-place override.
    #[must_use]
    pub const fn new(unavailable: UnavailablePolicy) -> Self {
        Self { unavailable }
    }

    /// Rank places the user has not bookmarked by content score.
    ///
    /// Returns an empty result with [`EmptyReason::NoBookmarks`] when the
    /// bookmark set is empty; choosing another strategy is the caller's job.
    ///
    /// # Examples
    /// ```
    /// use bena_core::{BookmarkSet, PlaceId, test_support::sample_places};
    /// use bena_ranker::{ContentRanker, TextSimilarityIndex};
    ///
    /// let places = sample_places();
    /// let matrix = TextSimilarityIndex::default().build(&places).expect("unique ids");
    /// let bookmarks: BookmarkSet = [PlaceId::from("P1")].into_iter().collect();
    ///
    /// let ranked = ContentRanker::default().rank(&bookmarks, &places, &matrix, 2);
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
        let scores = self.scores(bookmarks, places, matrix);
        let candidates = places
            .iter()
            .zip(scores)
            .filter(|(place, _)| !bookmarks.contains(&place.id))
            .map(|(place, score)| Candidate {
                place,
                key: score,
                scores: PlaceScores {
                    content: Some(score),
                    ..PlaceScores::default()
                },
            })
            .collect();
        top_n(candidates, Order::Descending, n)
    }

    /// Content score of every place, aligned with `places`.
    ///
    /// Bookmarks missing from the matrix contribute nothing. Places missing
    /// from the matrix score `0.0` unless the unavailable override applies.
    #[expect(
        clippy::float_arithmetic,
        reason = "content scores accumulate similarity values"
    )]
    pub(crate) fn scores(
        &self,
        bookmarks: &BookmarkSet,
        places: &[Place],
        matrix: &SimilarityMatrix,
    ) -> Vec<f64> {
        let rows: Vec<&[f64]> = bookmarks
            .iter()
            .filter_map(|place_id| {
                let row = matrix.position(place_id).and_then(|position| matrix.row(position));
                if row.is_none() {
                    log::warn!("bookmarked place {place_id} is not in the similarity matrix");
                }
                row
            })
            .collect();

        places
            .iter()
            .map(|place| {
                if self.unavailable.matches(&place.tags) {
                    return self.unavailable.score;
                }
                let Some(column) = matrix.position(&place.id) else {
                    log::debug!("place {} is not in the similarity matrix", place.id);
                    return 0.0;
                };
                let mut total = 0.0;
                for row in &rows {
                    total += row.get(column).copied().unwrap_or(0.0);
                }
                total
            })
            .collect()
    }
}
