//! Test-only snapshot providers and fixtures shared by unit and behaviour
//! tests.

use std::convert::Infallible;

use geo::Coord;

use crate::{Bookmark, Interaction, Place, Snapshot, SnapshotProvider};

/// In-memory `SnapshotProvider` used in tests.
///
/// Rows are cloned on every load and never change afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotProvider {
    places: Vec<Place>,
    bookmarks: Vec<Bookmark>,
    interactions: Vec<Interaction>,
}

impl MemorySnapshotProvider {
    /// Create a provider holding the given places and no activity.
    pub fn with_places<I>(places: I) -> Self
    where
        I: IntoIterator<Item = Place>,
    {
        Self {
            places: places.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Add bookmark rows.
    #[must_use]
    pub fn with_bookmarks<I>(mut self, bookmarks: I) -> Self
    where
        I: IntoIterator<Item = Bookmark>,
    {
        self.bookmarks.extend(bookmarks);
        self
    }

    /// Add interaction rows.
    #[must_use]
    pub fn with_interactions<I>(mut self, interactions: I) -> Self
    where
        I: IntoIterator<Item = Interaction>,
    {
        self.interactions.extend(interactions);
        self
    }
}

impl SnapshotProvider for MemorySnapshotProvider {
    type Error = Infallible;

    fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
        Ok(self.places.clone())
    }

    fn load_bookmarks(&self) -> Result<Vec<Bookmark>, Self::Error> {
        Ok(self.bookmarks.clone())
    }

    fn load_interactions(&self) -> Result<Vec<Interaction>, Self::Error> {
        Ok(self.interactions.clone())
    }
}

/// Three places used throughout the test suites.
///
/// `P1` and `P2` are beaches about 1.5 km apart in Egypt; `P3` is a desert
/// site over 3000 km away.
#[must_use]
pub fn sample_places() -> Vec<Place> {
    vec![
        Place::new("P1", "Golden Sands", Coord { x: 31.0, y: 30.0 }).with_tags("beach"),
        Place::new("P2", "Coral Bay", Coord { x: 31.01, y: 30.01 }).with_tags("beach resort"),
        Place::new("P3", "Great Sand Sea", Coord { x: 10.0, y: 10.0 }).with_tags("desert"),
    ]
}

/// Snapshot over [`sample_places`] where user `U1` bookmarked `P1`.
#[must_use]
pub fn sample_snapshot() -> Snapshot {
    Snapshot::new(sample_places(), vec![Bookmark::new("U1", "P1")], Vec::new())
}

/// Write a SQLite database with the tables read by
/// [`SqliteSnapshotProvider`](crate::SqliteSnapshotProvider).
///
/// Passing `None` for `interactions` omits the `interactions` table.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_database(
    path: &std::path::Path,
    places: &[Place],
    bookmarks: &[Bookmark],
    interactions: Option<&[Interaction]>,
) -> rusqlite::Result<()> {
    use rusqlite::{Connection, params};

    let mut connection = Connection::open(path)?;
    let tx = connection.transaction()?;
    tx.execute_batch(
        "CREATE TABLE places (
            places_id TEXT PRIMARY KEY,
            name TEXT,
            tags TEXT,
            latitude REAL,
            longitude REAL,
            arabic_name TEXT,
            address TEXT
        );
        CREATE TABLE bookmarks (user_id TEXT NOT NULL, place_id TEXT NOT NULL);",
    )?;
    {
        let mut insert = tx.prepare("INSERT INTO places VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)")?;
        for place in places {
            insert.execute(params![
                place.id.as_str(),
                place.name,
                place.tags,
                place.latitude(),
                place.longitude(),
                place.arabic_name,
                place.address,
            ])?;
        }
        let mut insert = tx.prepare("INSERT INTO bookmarks VALUES (?1, ?2)")?;
        for bookmark in bookmarks {
            insert.execute(params![bookmark.user_id.as_str(), bookmark.place_id.as_str()])?;
        }
    }
    if let Some(interactions) = interactions {
        tx.execute_batch(
            "CREATE TABLE interactions (user_id TEXT NOT NULL, place_id TEXT NOT NULL);",
        )?;
        let mut insert = tx.prepare("INSERT INTO interactions VALUES (?1, ?2)")?;
        for interaction in interactions {
            insert.execute(params![
                interaction.user_id.as_str(),
                interaction.place_id.as_str()
            ])?;
        }
        drop(insert);
    }
    tx.commit()
}
