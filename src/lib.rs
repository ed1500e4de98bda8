//! Facade crate for the Bena place recommendation and search engine.
//!
//! This crate re-exports the domain types from `bena-core` and the rankers
//! from `bena-ranker`, and exposes the SQLite snapshot provider behind the
//! `store-sqlite` feature.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "test-support")]
//! # {
//! use bena_engine::test_support::sample_snapshot;
//! use bena_engine::{RecommendationEngine, RecommendationRequest, Strategy};
//!
//! let engine = RecommendationEngine::default();
//! let prepared = engine.prepare(sample_snapshot()).expect("unique place ids");
//! let outcome = engine.recommend(
//!     &prepared,
//!     &RecommendationRequest::new("U1").with_method("near_bookmarks"),
//! );
//! assert_eq!(outcome.method, Strategy::NearBookmarks);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use bena_core::{
    Bookmark, BookmarkSet, EARTH_RADIUS_KM, EmptyReason, Interaction, Place, PlaceId, PlaceScores,
    RankedResult, ScoredPlace, Snapshot, SnapshotProvider, UserId, distance, haversine_km,
};

pub use bena_ranker::{
    ConfigError, ContentRanker, EngineConfig, FuzzyTextSearch, HybridRanker, HybridWeights,
    LengthPolicy, NearbyPlaces, PrepareError, PreparedSnapshot, ProximityRanker, RadiusPolicy,
    RandomRanker, Recommendation, RecommendationEngine, RecommendationRequest, SearchOptions,
    SearchResults, SimilarityError, SimilarityMatrix, SnapshotCache, Strategy, TextSimilarityIndex,
    TfIdfOptions, UnavailablePolicy, UnknownStrategy, Warnings,
};

#[cfg(feature = "store-sqlite")]
pub use bena_core::{SqliteSnapshotError, SqliteSnapshotProvider};

#[cfg(feature = "test-support")]
pub use bena_core::test_support;
