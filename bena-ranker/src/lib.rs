//! Ranking and search over Bena place snapshots.
//!
//! The crate turns a read-only [`Snapshot`](bena_core::Snapshot) into ranked
//! places:
//! - [`TextSimilarityIndex`] builds a TF-IDF [`SimilarityMatrix`] over place
//!   tags once per snapshot.
//! - [`ContentRanker`], [`ProximityRanker`] and [`HybridRanker`] rank places
//!   against a user's bookmarks; [`RandomRanker`] covers cold starts.
//! - [`FuzzyTextSearch`] matches free-text queries against place text.
//! - [`RecommendationEngine`] chooses a [`Strategy`], applies length and
//!   radius policies, and reports corrections as [`Warnings`].
//!
//! Every ranking function is pure over its inputs. Sharing a prepared
//! snapshot between threads goes through [`SnapshotCache`], which swaps whole
//! values instead of editing them.
//!
//! # Examples
//!
//! ```
//! use bena_core::{PlaceId, test_support::sample_snapshot};
//! use bena_ranker::{RecommendationEngine, RecommendationRequest};
//!
//! let engine = RecommendationEngine::default();
//! let prepared = engine.prepare(sample_snapshot()).expect("unique place ids");
//!
//! let near = engine.find_near(&prepared, &PlaceId::from("P1"), Some(5), Some(5.0));
//! assert_eq!(near.result.len(), 1);
//!
//! let found = engine.search(&prepared, "beach", None);
//! assert_eq!(found.result.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod content;
mod engine;
mod error;
mod hybrid;
mod prepared;
mod proximity;
mod random;
mod rank;
mod search;
mod similarity;
mod strategy;

pub use config::{EngineConfig, LengthPolicy, RadiusPolicy, Warnings};
pub use content::{
    ContentRanker, DEFAULT_UNAVAILABLE_MARKER, DEFAULT_UNAVAILABLE_SCORE, UnavailablePolicy,
};
pub use engine::{
    NearbyPlaces, Recommendation, RecommendationEngine, RecommendationRequest, SearchResults,
};
pub use error::{ConfigError, PrepareError, SimilarityError};
pub use hybrid::{DEFAULT_CONTENT_WEIGHT, DEFAULT_PROXIMITY_WEIGHT, HybridRanker, HybridWeights};
pub use prepared::{PreparedSnapshot, SnapshotCache};
pub use proximity::ProximityRanker;
pub use random::RandomRanker;
pub use search::{
    DEFAULT_MIN_SCORE, DEFAULT_SEARCH_LIMIT, FuzzyTextSearch, SearchOptions, partial_ratio,
    search_field,
};
pub use similarity::{ENGLISH_STOP_WORDS, SimilarityMatrix, TextSimilarityIndex, TfIdfOptions};
pub use strategy::{Strategy, UnknownStrategy};
