//! Loading snapshots of places and user activity.
//!
//! The [`SnapshotProvider`] trait is the seam between persistence and
//! ranking. Rankers only ever see a [`Snapshot`]; where the rows came from is
//! the provider's concern.

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteSnapshotError, SqliteSnapshotProvider};

use crate::{Bookmark, Interaction, Place, Snapshot};

/// Read-only source of places, bookmarks and interactions.
///
/// Implementers return every row they hold. Callers are expected to load a
/// snapshot once per session and treat it as immutable afterwards.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use geo::Coord;
/// use bena_core::{Bookmark, Interaction, Place, SnapshotProvider};
///
/// struct Fixed;
///
/// impl SnapshotProvider for Fixed {
///     type Error = Infallible;
///
///     fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
///         Ok(vec![Place::new("P1", "Beach", Coord { x: 31.0, y: 30.0 })])
///     }
///
///     fn load_bookmarks(&self) -> Result<Vec<Bookmark>, Self::Error> {
///         Ok(vec![Bookmark::new("U1", "P1")])
///     }
///
///     fn load_interactions(&self) -> Result<Vec<Interaction>, Self::Error> {
///         Ok(Vec::new())
///     }
/// }
///
/// let snapshot = Fixed.load_snapshot().unwrap();
/// assert_eq!(snapshot.places().len(), 1);
/// ```
pub trait SnapshotProvider {
    /// Error raised when a backing store cannot be read.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every known place.
    fn load_places(&self) -> Result<Vec<Place>, Self::Error>;

    /// Return every bookmark row.
    fn load_bookmarks(&self) -> Result<Vec<Bookmark>, Self::Error>;

    /// Return every interaction row.
    fn load_interactions(&self) -> Result<Vec<Interaction>, Self::Error>;

    /// Load all three collections into a [`Snapshot`].
    fn load_snapshot(&self) -> Result<Snapshot, Self::Error> {
        let places = self.load_places()?;
        let bookmarks = self.load_bookmarks()?;
        let interactions = self.load_interactions()?;
        log::debug!(
            "loaded snapshot with {} places, {} bookmarks and {} interactions",
            places.len(),
            bookmarks.len(),
            interactions.len()
        );
        Ok(Snapshot::new(places, bookmarks, interactions))
    }
}
