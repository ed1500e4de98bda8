//! Scored places and ranked results.
//!
//! Scores are attached to a cloned [`Place`] for the lifetime of one ranking
//! call. They never feed back into the snapshot, so results from separate
//! calls cannot leak into each other.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{Place, PlaceId};

/// Per-call scores attached to a place.
///
/// Only the scores produced by the ranker that built the result are set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlaceScores {
    /// Aggregated tag similarity to the user's bookmarks.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub content: Option<f64>,
    /// Normalised closeness to the nearest bookmark in `0.0..=1.0`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub proximity: Option<f64>,
    /// Weighted blend of content and proximity.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub hybrid: Option<f64>,
    /// Fuzzy text match score in `0..=100`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub similarity: Option<u8>,
    /// Distance in kilometres to the reference location.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub distance_km: Option<f64>,
}

/// A place together with the scores computed for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScoredPlace {
    /// The ranked place.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub place: Place,
    /// Scores produced during ranking.
    pub scores: PlaceScores,
}

impl ScoredPlace {
    /// Pair a place with its scores.
    #[must_use]
    pub const fn new(place: Place, scores: PlaceScores) -> Self {
        Self { place, scores }
    }
}

/// Why a ranking or search produced no results.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum EmptyReason {
    /// The user has no bookmarks or interactions.
    NoBookmarks,
    /// None of the bookmarked places has a usable location.
    NoBookmarkLocations,
    /// The snapshot contains no places.
    EmptySnapshot,
    /// The search query was empty or blank.
    EmptyQuery,
    /// The referenced place is not part of the snapshot.
    PlaceNotFound {
        /// Identifier that failed to resolve.
        place_id: PlaceId,
    },
    /// The referenced place exists but has no usable coordinates.
    PlaceWithoutLocation {
        /// Identifier of the place lacking a location.
        place_id: PlaceId,
    },
}

impl EmptyReason {
    /// Report whether the reason stems from an unknown identifier rather than
    /// empty input.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::PlaceNotFound { .. })
    }
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBookmarks => f.write_str("no bookmarks or interactions found for the user"),
            Self::NoBookmarkLocations => {
                f.write_str("no coordinates found for the user's bookmarked places")
            }
            Self::EmptySnapshot => f.write_str("the places snapshot is empty"),
            Self::EmptyQuery => f.write_str("the search query is empty"),
            Self::PlaceNotFound { place_id } => write!(f, "no place found with id {place_id}"),
            Self::PlaceWithoutLocation { place_id } => {
                write!(f, "place {place_id} has no usable coordinates")
            }
        }
    }
}

/// Ordered ranking output, at most as long as the requested limit.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bena_core::{EmptyReason, Place, PlaceScores, RankedResult, ScoredPlace};
///
/// let empty = RankedResult::empty(EmptyReason::EmptyQuery);
/// assert!(empty.is_empty());
/// assert_eq!(empty.reason(), Some(&EmptyReason::EmptyQuery));
///
/// let place = Place::new("P1", "Pyramids", Coord { x: 31.13, y: 29.98 });
/// let ranked = RankedResult::new(vec![ScoredPlace::new(place, PlaceScores::default())]);
/// assert_eq!(ranked.ids().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RankedResult {
    places: Vec<ScoredPlace>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    reason: Option<EmptyReason>,
}

impl RankedResult {
    /// Wrap an already ordered list of scored places.
    #[must_use]
    pub const fn new(places: Vec<ScoredPlace>) -> Self {
        Self {
            places,
            reason: None,
        }
    }

    /// Build an empty result explaining why nothing was ranked.
    #[must_use]
    pub const fn empty(reason: EmptyReason) -> Self {
        Self {
            places: Vec::new(),
            reason: Some(reason),
        }
    }

    /// Ranked places in order.
    #[must_use]
    pub fn places(&self) -> &[ScoredPlace] {
        &self.places
    }

    /// Consume the result and return the places.
    #[must_use]
    pub fn into_places(self) -> Vec<ScoredPlace> {
        self.places
    }

    /// Reason for an empty result, when one was recorded.
    #[must_use]
    pub const fn reason(&self) -> Option<&EmptyReason> {
        self.reason.as_ref()
    }

    /// Number of ranked places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Report whether nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Identifiers in ranking order.
    #[must_use]
    pub fn ids(&self) -> Vec<&PlaceId> {
        self.places.iter().map(|scored| &scored.place.id).collect()
    }

    /// Iterate over the ranked places.
    pub fn iter(&self) -> std::slice::Iter<'_, ScoredPlace> {
        self.places.iter()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a ScoredPlace;
    type IntoIter = std::slice::Iter<'a, ScoredPlace>;

    fn into_iter(self) -> Self::IntoIter {
        self.places.iter()
    }
}
