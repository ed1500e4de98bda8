//! Core domain types for the Bena recommendation engine.
//!
//! The crate models read-only snapshots of places, bookmarks and interactions,
//! the great-circle distance used by proximity ranking, and the scored result
//! types shared by every ranker. Loading snapshots is delegated to a
//! [`SnapshotProvider`]; the SQLite-backed provider sits behind the
//! `store-sqlite` feature.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod activity;
pub mod distance;
pub mod ids;
pub mod place;
pub mod ranked;
pub mod snapshot;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use activity::{Bookmark, BookmarkSet, Interaction};
pub use distance::{EARTH_RADIUS_KM, distance, haversine_km};
pub use ids::{PlaceId, UserId};
pub use place::Place;
pub use ranked::{EmptyReason, PlaceScores, RankedResult, ScoredPlace};
pub use snapshot::Snapshot;
pub use store::SnapshotProvider;

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteSnapshotError, SqliteSnapshotProvider};
