//! Error types raised while preparing snapshots and validating configuration.
//!
//! Ranking itself never fails: empty input degrades to an empty
//! [`RankedResult`](bena_core::RankedResult). These errors only cover the
//! plumbing around it.

use bena_core::PlaceId;
use thiserror::Error;

/// Errors raised while building a [`SimilarityMatrix`](crate::SimilarityMatrix).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimilarityError {
    /// Two places share an identifier, so matrix rows would be ambiguous.
    #[error("place id {place_id} appears more than once in the snapshot")]
    DuplicatePlaceId {
        /// Identifier seen twice.
        place_id: PlaceId,
    },
}

/// Errors raised when engine configuration is inconsistent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Hybrid weights are non-finite, negative, or sum to zero.
    #[error("hybrid weights must be finite, non-negative and not both zero (content {content}, proximity {proximity})")]
    InvalidWeights {
        /// Configured content weight.
        content: f64,
        /// Configured proximity weight.
        proximity: f64,
    },
    /// A length policy does not satisfy `1 <= min <= default <= max`.
    #[error("{name} length policy must satisfy 1 <= min <= default <= max (got {min}/{default}/{max})")]
    InvalidLengthPolicy {
        /// Which policy failed.
        name: &'static str,
        /// Configured minimum.
        min: usize,
        /// Configured default.
        default: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The nearby radius policy is not a finite `0 <= default <= max` range.
    #[error("radius policy must satisfy 0 <= default <= max (got {default_km}/{max_km})")]
    InvalidRadiusPolicy {
        /// Configured default radius in kilometres.
        default_km: f64,
        /// Configured maximum radius in kilometres.
        max_km: f64,
    },
    /// The fuzzy search threshold lies outside `0..=100`.
    #[error("minimum search score {min_score} exceeds 100")]
    InvalidMinScore {
        /// Configured threshold.
        min_score: u8,
    },
    /// The score forced onto unavailable places is not finite.
    #[error("unavailable score {score} must be finite")]
    InvalidUnavailableScore {
        /// Configured score.
        score: f64,
    },
}

/// Errors raised while loading and preparing a snapshot.
#[derive(Debug, Error)]
pub enum PrepareError {
    /// The snapshot provider failed.
    #[error("failed to load snapshot")]
    Load {
        /// Provider error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The similarity matrix could not be built.
    #[error("failed to build similarity matrix")]
    Similarity {
        /// Matrix build error.
        #[source]
        source: SimilarityError,
    },
}

impl From<SimilarityError> for PrepareError {
    fn from(source: SimilarityError) -> Self {
        Self::Similarity { source }
    }
}
