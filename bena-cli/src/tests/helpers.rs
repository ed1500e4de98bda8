//! Test helpers for writing snapshot databases into temporary directories.

use std::fs;

use bena_core::test_support::sample_places;
use bena_core::{Bookmark, Interaction};
use camino::Utf8PathBuf;
use tempfile::TempDir;

/// A temporary directory holding `bena.db` built from the sample places.
///
/// `U1` bookmarked `P1`; `U2` only interacted with `P3`.
#[derive(Debug)]
pub(super) struct SnapshotDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl SnapshotDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let snapshot = Self { _dir: dir, root };
        bena_core::test_support::write_sqlite_database(
            snapshot.database().as_std_path(),
            &sample_places(),
            &[Bookmark::new("U1", "P1")],
            Some(&[Interaction::new("U2", "P3")]),
        )
        .expect("write snapshot database");
        snapshot
    }

    pub(super) fn root(&self) -> &Utf8PathBuf {
        &self.root
    }

    pub(super) fn database(&self) -> Utf8PathBuf {
        self.root.join("bena.db")
    }

    /// Write an empty file that opens as a database without any tables.
    pub(super) fn empty_database(&self) -> Utf8PathBuf {
        let path = self.root.join("empty.db");
        fs::write(&path, b"").expect("write empty database");
        path
    }
}

pub(super) fn ids(result: &bena_core::RankedResult) -> Vec<&str> {
    result
        .ids()
        .into_iter()
        .map(bena_core::PlaceId::as_str)
        .collect()
}
