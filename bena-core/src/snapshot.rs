//! Point-in-time copies of places and user activity.
//!
//! A [`Snapshot`] is loaded once per recommendation session and then only
//! read. It owns an explicit identifier index so lookups never depend on the
//! position of a place in some other collection.

use std::collections::HashMap;

use crate::{Bookmark, BookmarkSet, Interaction, Place, PlaceId, UserId};

/// Read-only ranking input.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bena_core::{Bookmark, Place, PlaceId, Snapshot, UserId};
///
/// let snapshot = Snapshot::new(
///     vec![Place::new("P1", "Beach", Coord { x: 31.0, y: 30.0 })],
///     vec![Bookmark::new("U1", "P1")],
///     Vec::new(),
/// );
/// let user = UserId::from("U1");
/// assert!(snapshot.has_activity(&user));
/// assert!(snapshot.bookmark_set(&user).contains(&PlaceId::from("P1")));
/// assert!(snapshot.place(&PlaceId::from("P1")).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    places: Vec<Place>,
    bookmarks: Vec<Bookmark>,
    interactions: Vec<Interaction>,
    positions: HashMap<PlaceId, usize>,
}

impl Snapshot {
    /// Assemble a snapshot from loaded rows.
    ///
    /// When identifiers repeat, lookups resolve to the first occurrence.
    #[must_use]
    pub fn new(
        places: Vec<Place>,
        bookmarks: Vec<Bookmark>,
        interactions: Vec<Interaction>,
    ) -> Self {
        let mut positions = HashMap::with_capacity(places.len());
        for (position, place) in places.iter().enumerate() {
            if positions.contains_key(&place.id) {
                log::warn!("duplicate place id {} in snapshot; keeping first", place.id);
                continue;
            }
            positions.insert(place.id.clone(), position);
        }
        Self {
            places,
            bookmarks,
            interactions,
            positions,
        }
    }

    /// All places in load order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// All bookmark rows.
    #[must_use]
    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// All interaction rows.
    #[must_use]
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Look up a place by identifier.
    #[must_use]
    pub fn place(&self, place_id: &PlaceId) -> Option<&Place> {
        self.positions
            .get(place_id)
            .and_then(|&position| self.places.get(position))
    }

    /// Report whether the snapshot holds no places.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Report whether the user has any bookmark or interaction.
    #[must_use]
    pub fn has_activity(&self, user_id: &UserId) -> bool {
        self.bookmarks.iter().any(|row| &row.user_id == user_id)
            || self.interactions.iter().any(|row| &row.user_id == user_id)
    }

    /// Places the user bookmarked or interacted with, bookmarks first.
    #[must_use]
    pub fn bookmark_set(&self, user_id: &UserId) -> BookmarkSet {
        let bookmarked = self
            .bookmarks
            .iter()
            .filter(|row| &row.user_id == user_id)
            .map(|row| row.place_id.clone());
        let interacted = self
            .interactions
            .iter()
            .filter(|row| &row.user_id == user_id)
            .map(|row| row.place_id.clone());
        bookmarked.chain(interacted).collect()
    }
}
