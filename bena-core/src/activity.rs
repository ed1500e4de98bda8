//! User activity: bookmarks, interactions and the per-user bookmark set.

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PlaceId, UserId};

/// A place saved by a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bookmark {
    /// Owner of the bookmark.
    pub user_id: UserId,
    /// Bookmarked place.
    pub place_id: PlaceId,
}

/// A recorded interaction between a user and a place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interaction {
    /// User who interacted with the place.
    pub user_id: UserId,
    /// Place the user interacted with.
    pub place_id: PlaceId,
}

impl Bookmark {
    /// Construct a bookmark row.
    pub fn new(user_id: impl Into<UserId>, place_id: impl Into<PlaceId>) -> Self {
        Self {
            user_id: user_id.into(),
            place_id: place_id.into(),
        }
    }
}

impl Interaction {
    /// Construct an interaction row.
    pub fn new(user_id: impl Into<UserId>, place_id: impl Into<PlaceId>) -> Self {
        Self {
            user_id: user_id.into(),
            place_id: place_id.into(),
        }
    }
}

/// Ordered, de-duplicated set of place identifiers tied to one user.
///
/// Insertion order is preserved so score accumulation is deterministic.
///
/// # Examples
/// ```
/// use bena_core::{BookmarkSet, PlaceId};
///
/// let set: BookmarkSet = ["P1", "P2", "P1"].into_iter().map(PlaceId::from).collect();
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&PlaceId::from("P2")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    ordered: Vec<PlaceId>,
    members: HashSet<PlaceId>,
}

impl BookmarkSet {
    /// Construct an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place; returns `false` when it was already present.
    pub fn insert(&mut self, place_id: PlaceId) -> bool {
        if self.members.contains(&place_id) {
            return false;
        }
        self.members.insert(place_id.clone());
        self.ordered.push(place_id);
        true
    }

    /// Report whether the place is part of the set.
    #[must_use]
    pub fn contains(&self, place_id: &PlaceId) -> bool {
        self.members.contains(place_id)
    }

    /// Number of distinct places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaceId> {
        self.ordered.iter()
    }
}

impl FromIterator<PlaceId> for BookmarkSet {
    fn from_iter<I: IntoIterator<Item = PlaceId>>(iter: I) -> Self {
        let mut set = Self::new();
        for place_id in iter {
            set.insert(place_id);
        }
        set
    }
}

impl Extend<PlaceId> for BookmarkSet {
    fn extend<I: IntoIterator<Item = PlaceId>>(&mut self, iter: I) {
        for place_id in iter {
            self.insert(place_id);
        }
    }
}
