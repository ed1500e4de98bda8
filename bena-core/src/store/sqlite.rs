//! SQLite-backed snapshot provider.

use std::path::{Path, PathBuf};

use geo::Coord;
use rusqlite::{Connection, OpenFlags, Row, types::ValueRef};
use thiserror::Error;

use crate::{Bookmark, Interaction, Place, PlaceId, UserId};

use super::SnapshotProvider;

const PLACES_QUERY: &str =
    "SELECT places_id, name, tags, latitude, longitude, arabic_name, address FROM places";
const BOOKMARKS_QUERY: &str = "SELECT user_id, place_id FROM bookmarks";
const INTERACTIONS_QUERY: &str = "SELECT user_id, place_id FROM interactions";

/// Error raised when reading snapshot rows from SQLite.
#[derive(Debug, Error)]
pub enum SqliteSnapshotError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A required table is absent from the database.
    #[error("required table `{table}` is missing from the database")]
    MissingTable {
        /// Name of the absent table.
        table: &'static str,
    },
    /// An identifier column held a value that is neither text nor integer.
    #[error("column `{column}` of table `{table}` holds an unsupported identifier type")]
    InvalidIdentifier {
        /// Table being read.
        table: &'static str,
        /// Column holding the identifier.
        column: &'static str,
    },
    /// Generic SQLite error when reading rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only provider over the `places`, `bookmarks` and `interactions`
/// tables.
///
/// NULL text columns load as empty strings and NULL coordinates load as NaN,
/// which rankers treat as an unusable location. A database without an
/// `interactions` table yields no interactions.
#[derive(Debug)]
pub struct SqliteSnapshotProvider {
    connection: Connection,
}

impl SqliteSnapshotProvider {
    /// Open the database at `path` in read-only mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteSnapshotError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| SqliteSnapshotError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { connection })
    }

    fn has_table(&self, table: &str) -> Result<bool, SqliteSnapshotError> {
        let mut statement = self
            .connection
            .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        Ok(statement.exists([table])?)
    }

    fn require_table(&self, table: &'static str) -> Result<(), SqliteSnapshotError> {
        if self.has_table(table)? {
            Ok(())
        } else {
            Err(SqliteSnapshotError::MissingTable { table })
        }
    }

    fn load_pairs(
        &self,
        table: &'static str,
        query: &str,
    ) -> Result<Vec<(UserId, PlaceId)>, SqliteSnapshotError> {
        let mut statement = self.connection.prepare(query)?;
        let mut rows = statement.query([])?;
        let mut pairs = Vec::new();
        while let Some(row) = rows.next()? {
            let user_id = read_identifier(row, 0, table, "user_id")?;
            let place_id = read_identifier(row, 1, table, "place_id")?;
            pairs.push((UserId::new(user_id), PlaceId::new(place_id)));
        }
        Ok(pairs)
    }
}

impl SnapshotProvider for SqliteSnapshotProvider {
    type Error = SqliteSnapshotError;

    fn load_places(&self) -> Result<Vec<Place>, Self::Error> {
        self.require_table("places")?;
        let mut statement = self.connection.prepare(PLACES_QUERY)?;
        let mut rows = statement.query([])?;
        let mut places = Vec::new();
        while let Some(row) = rows.next()? {
            let id = read_identifier(row, 0, "places", "places_id")?;
            let latitude: Option<f64> = row.get(3)?;
            let longitude: Option<f64> = row.get(4)?;
            let location = Coord {
                x: longitude.unwrap_or(f64::NAN),
                y: latitude.unwrap_or(f64::NAN),
            };
            let place = Place::new(id, read_text(row, 1)?, location)
                .with_tags(read_text(row, 2)?)
                .with_arabic_name(read_text(row, 5)?)
                .with_address(read_text(row, 6)?);
            places.push(place);
        }
        Ok(places)
    }

    fn load_bookmarks(&self) -> Result<Vec<Bookmark>, Self::Error> {
        self.require_table("bookmarks")?;
        let pairs = self.load_pairs("bookmarks", BOOKMARKS_QUERY)?;
        Ok(pairs
            .into_iter()
            .map(|(user_id, place_id)| Bookmark { user_id, place_id })
            .collect())
    }

    fn load_interactions(&self) -> Result<Vec<Interaction>, Self::Error> {
        if !self.has_table("interactions")? {
            log::debug!("no interactions table; treating interactions as empty");
            return Ok(Vec::new());
        }
        let pairs = self.load_pairs("interactions", INTERACTIONS_QUERY)?;
        Ok(pairs
            .into_iter()
            .map(|(user_id, place_id)| Interaction { user_id, place_id })
            .collect())
    }
}

fn read_text(row: &Row<'_>, index: usize) -> Result<String, rusqlite::Error> {
    let value: Option<String> = row.get(index)?;
    Ok(value.unwrap_or_default())
}

fn read_identifier(
    row: &Row<'_>,
    index: usize,
    table: &'static str,
    column: &'static str,
) -> Result<String, SqliteSnapshotError> {
    match row.get_ref(index)? {
        ValueRef::Text(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(value) => Ok(value.to_string()),
        ValueRef::Null | ValueRef::Real(_) | ValueRef::Blob(_) => {
            Err(SqliteSnapshotError::InvalidIdentifier { table, column })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_sqlite_database;
    use crate::{SnapshotProvider, UserId};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp_db() -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("bena.db");
        (dir, path)
    }

    #[rstest]
    fn loads_places_and_activity(#[from(temp_db)] (_dir, path): (TempDir, PathBuf)) {
        let places = vec![
            Place::new("P1", "Beach", Coord { x: 31.0, y: 30.0 }).with_tags("beach, sea"),
            Place::new("P2", "Museum", Coord { x: 31.01, y: 30.01 }).with_tags("museum"),
        ];
        write_sqlite_database(
            &path,
            &places,
            &[Bookmark::new("U1", "P1")],
            Some(&[Interaction::new("U1", "P2")]),
        )
        .expect("persist database");

        let provider = SqliteSnapshotProvider::open(&path).expect("open provider");
        let snapshot = provider.load_snapshot().expect("load snapshot");
        assert_eq!(snapshot.places(), places.as_slice());
        assert_eq!(snapshot.bookmark_set(&UserId::from("U1")).len(), 2);
    }

    #[rstest]
    fn null_text_loads_as_empty_string(#[from(temp_db)] (_dir, path): (TempDir, PathBuf)) {
        let connection = Connection::open(&path).expect("create database");
        connection
            .execute_batch(
                "CREATE TABLE places (places_id INTEGER, name TEXT, tags TEXT, latitude REAL, \
                 longitude REAL, arabic_name TEXT, address TEXT);
                 INSERT INTO places VALUES (7, 'Tower', NULL, 30.0, 31.0, NULL, NULL);
                 CREATE TABLE bookmarks (user_id TEXT, place_id TEXT);",
            )
            .expect("seed database");
        drop(connection);

        let provider = SqliteSnapshotProvider::open(&path).expect("open provider");
        let snapshot = provider.load_snapshot().expect("load snapshot");
        let place = snapshot.places().first().expect("one place");
        assert_eq!(place.id.as_str(), "7");
        assert!(place.tags.is_empty());
        assert!(place.arabic_name.is_empty());
        assert!(snapshot.interactions().is_empty());
    }

    #[rstest]
    fn missing_places_table_is_reported(#[from(temp_db)] (_dir, path): (TempDir, PathBuf)) {
        let connection = Connection::open(&path).expect("create database");
        connection
            .execute_batch("CREATE TABLE bookmarks (user_id TEXT, place_id TEXT);")
            .expect("seed database");
        drop(connection);

        let provider = SqliteSnapshotProvider::open(&path).expect("open provider");
        let err = provider.load_places().expect_err("places table absent");
        assert!(matches!(
            err,
            SqliteSnapshotError::MissingTable { table: "places" }
        ));
    }

    #[rstest]
    fn opening_a_missing_file_fails(#[from(temp_db)] (_dir, path): (TempDir, PathBuf)) {
        let err = SqliteSnapshotProvider::open(&path).expect_err("no database file");
        assert!(matches!(err, SqliteSnapshotError::OpenDatabase { .. }));
    }
}
