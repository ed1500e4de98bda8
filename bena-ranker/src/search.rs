//! Fuzzy free-text search over place names, tags and addresses.
//!
//! Each place is matched through a composite field joining its name, tags,
//! Arabic name and address. The field is built per call and dropped
//! afterwards; places are never modified.
//!
//! The match score is a case-insensitive partial ratio in `0..=100`: the
//! shorter string slides across every window of the same length in the
//! longer one and the best normalised Levenshtein similarity wins. A query
//! found verbatim scores 100.

use bena_core::{EmptyReason, Place, PlaceScores, RankedResult, ScoredPlace};

/// Default number of results returned by a search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
/// Default minimum match score for a place to be returned.
pub const DEFAULT_MIN_SCORE: u8 = 50;

/// Limits applied to one search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum number of results.
    pub limit: usize,
    /// Places scoring below this threshold are dropped.
    pub min_score: u8,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

/// Fuzzy text matcher over a places snapshot.
///
/// # Examples
/// ```
/// use bena_core::test_support::sample_places;
/// use bena_ranker::{FuzzyTextSearch, SearchOptions};
///
/// let results = FuzzyTextSearch.search("beach", &sample_places(), SearchOptions::default());
/// let ids: Vec<&str> = results.ids().into_iter().map(|id| id.as_str()).collect();
/// assert_eq!(ids, ["P1", "P2"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyTextSearch;

impl FuzzyTextSearch {
    /// Score `query` against every place and return the best matches.
    ///
    /// Results are ordered by descending score; places with equal scores keep
    /// their snapshot order.
    #[must_use]
    pub fn search(&self, query: &str, places: &[Place], options: SearchOptions) -> RankedResult {
        if places.is_empty() {
            return RankedResult::empty(EmptyReason::EmptySnapshot);
        }
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return RankedResult::empty(EmptyReason::EmptyQuery);
        }

        let mut matches: Vec<(u8, &Place)> = places
            .iter()
            .map(|place| (partial_ratio(&needle, &search_field(place).to_lowercase()), place))
            .filter(|&(score, _)| score >= options.min_score)
            .collect();
        matches.sort_by(|left, right| right.0.cmp(&left.0));
        log::debug!(
            "query {query:?} matched {} of {} places",
            matches.len(),
            places.len()
        );

        RankedResult::new(
            matches
                .into_iter()
                .take(options.limit)
                .map(|(score, place)| {
                    ScoredPlace::new(
                        place.clone(),
                        PlaceScores {
                            similarity: Some(score),
                            ..PlaceScores::default()
                        },
                    )
                })
                .collect(),
        )
    }
}

/// Composite text searched for a place.
#[must_use]
pub fn search_field(place: &Place) -> String {
    [
        place.name.as_str(),
        place.tags.as_str(),
        place.arabic_name.as_str(),
        place.address.as_str(),
    ]
    .join(" ")
}

/// Best normalised Levenshtein similarity of the shorter string against any
/// equally long window of the longer one, scaled to `0..=100`.
///
/// Comparison is character-based and case-sensitive; callers lowercase both
/// sides first.
///
/// # Examples
/// ```
/// use bena_ranker::partial_ratio;
///
/// assert_eq!(partial_ratio("beach", "golden sands beach"), 100);
/// assert_eq!(partial_ratio("", "anything"), 0);
/// assert!(partial_ratio("beech", "golden sands beach") >= 80);
/// ```
#[must_use]
pub fn partial_ratio(left: &str, right: &str) -> u8 {
    let (shorter, longer) = if left.chars().count() <= right.chars().count() {
        (left, right)
    } else {
        (right, left)
    };
    if shorter.is_empty() {
        return 0;
    }
    if longer.contains(shorter) {
        return 100;
    }

    let width = shorter.chars().count();
    let longer_chars: Vec<char> = longer.chars().collect();
    let best = longer_chars
        .windows(width)
        .map(|window| {
            let candidate: String = window.iter().collect();
            strsim::normalized_levenshtein(shorter, &candidate)
        })
        .fold(0.0_f64, f64::max);
    to_percentage(best)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "similarity is clamped to 0..=1 before scaling to a percentage"
)]
fn to_percentage(similarity: f64) -> u8 {
    (similarity.clamp(0.0, 1.0) * 100.0).round() as u8
}
