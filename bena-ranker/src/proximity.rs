//! Proximity ranking around bookmarked places and radius lookups.
//!
//! Distances are great-circle kilometres from [`bena_core::haversine_km`].
//! Places without a usable location, or whose distance is not finite, are
//! never ranked.

use bena_core::{
    BookmarkSet, EmptyReason, Place, PlaceId, PlaceScores, RankedResult, haversine_km,
};
use geo::Coord;

use crate::rank::{Candidate, Order, top_n};

/// Ranks places by their distance to the closest bookmarked place.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProximityRanker;

impl ProximityRanker {
    /// Rank unbookmarked places nearest first.
    ///
    /// # Examples
    /// ```
    /// use bena_core::{BookmarkSet, PlaceId, test_support::sample_places};
    /// use bena_ranker::ProximityRanker;
    ///
    /// let bookmarks: BookmarkSet = [PlaceId::from("P1")].into_iter().collect();
    /// let ranked = ProximityRanker.rank(&bookmarks, &sample_places(), 2);
    /// let ids: Vec<&str> = ranked.ids().into_iter().map(|id| id.as_str()).collect();
    /// assert_eq!(ids, ["P2", "P3"]);
    /// ```
    #[must_use]
    pub fn rank(&self, bookmarks: &BookmarkSet, places: &[Place], n: usize) -> RankedResult {
        if bookmarks.is_empty() {
            return RankedResult::empty(EmptyReason::NoBookmarks);
        }
        let anchors = bookmark_locations(bookmarks, places);
        if anchors.is_empty() {
            log::info!("none of {} bookmarked places has a usable location", bookmarks.len());
            return RankedResult::empty(EmptyReason::NoBookmarkLocations);
        }

        let candidates = places
            .iter()
            .filter(|place| !bookmarks.contains(&place.id))
            .filter_map(|place| {
                let distance = min_distance(place, &anchors)?;
                Some(Candidate {
                    place,
                    key: distance,
                    scores: PlaceScores {
                        distance_km: Some(distance),
                        ..PlaceScores::default()
                    },
                })
            })
            .collect();
        top_n(candidates, Order::Ascending, n)
    }

    /// Places within `radius_km` of the place `place_id`, nearest first.
    ///
    /// The anchor itself is never returned and the radius is inclusive.
    /// An unknown identifier yields [`EmptyReason::PlaceNotFound`] and an
    /// anchor without valid coordinates yields
    /// [`EmptyReason::PlaceWithoutLocation`].
    ///
    /// # Examples
    /// ```
    /// use bena_core::{EmptyReason, PlaceId, test_support::sample_places};
    /// use bena_ranker::ProximityRanker;
    ///
    /// let near = ProximityRanker.find_near(&PlaceId::from("P1"), &sample_places(), 5.0, 5);
    /// assert_eq!(near.ids(), [&PlaceId::from("P2")]);
    ///
    /// let missing = ProximityRanker.find_near(&PlaceId::from("P9"), &sample_places(), 5.0, 5);
    /// assert!(missing.reason().is_some_and(EmptyReason::is_not_found));
    /// ```
    #[must_use]
    pub fn find_near(
        &self,
        place_id: &PlaceId,
        places: &[Place],
        radius_km: f64,
        n: usize,
    ) -> RankedResult {
        if places.is_empty() {
            log::info!("places snapshot is empty");
            return RankedResult::empty(EmptyReason::EmptySnapshot);
        }
        let Some(anchor) = places.iter().find(|place| &place.id == place_id) else {
            log::info!("no place found with id {place_id}");
            return RankedResult::empty(EmptyReason::PlaceNotFound {
                place_id: place_id.clone(),
            });
        };
        if !anchor.has_valid_location() {
            log::info!("place {place_id} has no usable coordinates");
            return RankedResult::empty(EmptyReason::PlaceWithoutLocation {
                place_id: place_id.clone(),
            });
        }

        let candidates = places
            .iter()
            .filter(|place| &place.id != place_id)
            .filter_map(|place| {
                let distance = haversine_km(anchor.location, place.location);
                (distance.is_finite() && distance <= radius_km).then_some(Candidate {
                    place,
                    key: distance,
                    scores: PlaceScores {
                        distance_km: Some(distance),
                        ..PlaceScores::default()
                    },
                })
            })
            .collect();
        top_n(candidates, Order::Ascending, n)
    }
}

/// Locations of bookmarked places that have valid coordinates.
pub(crate) fn bookmark_locations(bookmarks: &BookmarkSet, places: &[Place]) -> Vec<Coord<f64>> {
    places
        .iter()
        .filter(|place| bookmarks.contains(&place.id) && place.has_valid_location())
        .map(|place| place.location)
        .collect()
}

/// Smallest finite distance from `place` to any anchor.
///
/// Returns `None` for places without a valid location or when no distance is
/// finite.
pub(crate) fn min_distance(place: &Place, anchors: &[Coord<f64>]) -> Option<f64> {
    if !place.has_valid_location() {
        return None;
    }
    anchors
        .iter()
        .map(|&anchor| haversine_km(place.location, anchor))
        .filter(|distance| distance.is_finite())
        .min_by(f64::total_cmp)
}
