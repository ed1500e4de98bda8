//! Snapshots paired with their similarity matrix, and a swap-only cache.
//!
//! Building the similarity matrix is quadratic in the number of places, so it
//! happens once per snapshot rather than per request. A [`PreparedSnapshot`]
//! owns both halves and is never modified; [`SnapshotCache`] replaces it
//! wholesale so readers never see a half-updated table.

use std::sync::{Arc, PoisonError, RwLock};

use bena_core::{Snapshot, SnapshotProvider};

use crate::{PrepareError, SimilarityMatrix, TextSimilarityIndex};

/// An immutable snapshot and the similarity matrix derived from it.
///
/// # Examples
/// ```
/// use bena_core::test_support::sample_snapshot;
/// use bena_ranker::{PreparedSnapshot, TextSimilarityIndex};
///
/// let prepared = PreparedSnapshot::build(sample_snapshot(), &TextSimilarityIndex::default())
///     .expect("unique place ids");
/// assert_eq!(prepared.matrix().len(), prepared.snapshot().places().len());
/// ```
#[derive(Debug, Clone)]
pub struct PreparedSnapshot {
    snapshot: Snapshot,
    matrix: SimilarityMatrix,
}

impl PreparedSnapshot {
    /// Build the similarity matrix for `snapshot`.
    ///
    /// # Errors
    /// Returns [`PrepareError::Similarity`] when place identifiers repeat.
    pub fn build(snapshot: Snapshot, index: &TextSimilarityIndex) -> Result<Self, PrepareError> {
        let matrix = index.build(snapshot.places())?;
        Ok(Self { snapshot, matrix })
    }

    /// Load a fresh snapshot from `provider` and prepare it.
    ///
    /// # Errors
    /// Returns [`PrepareError::Load`] when the provider fails and
    /// [`PrepareError::Similarity`] when place identifiers repeat.
    pub fn load<P>(provider: &P, index: &TextSimilarityIndex) -> Result<Self, PrepareError>
    where
        P: SnapshotProvider + ?Sized,
    {
        let snapshot = provider
            .load_snapshot()
            .map_err(|source| PrepareError::Load {
                source: Box::new(source),
            })?;
        Self::build(snapshot, index)
    }

    /// The underlying snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The similarity matrix over the snapshot's places.
    #[must_use]
    pub const fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}

/// Shared holder of the current [`PreparedSnapshot`].
///
/// Readers clone an `Arc` and keep using it even while a reload swaps in a
/// newer snapshot.
#[derive(Debug)]
pub struct SnapshotCache {
    current: RwLock<Arc<PreparedSnapshot>>,
}

impl SnapshotCache {
    /// Start the cache with an already prepared snapshot.
    #[must_use]
    pub fn new(prepared: PreparedSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(prepared)),
        }
    }

    /// The snapshot in use right now.
    #[must_use]
    pub fn current(&self) -> Arc<PreparedSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Swap in `prepared` and return it.
    pub fn replace(&self, prepared: PreparedSnapshot) -> Arc<PreparedSnapshot> {
        let fresh = Arc::new(prepared);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&fresh);
        fresh
    }

    /// Load and prepare a new snapshot, then swap it in.
    ///
    /// The matrix is built before the write lock is taken. On error the
    /// current snapshot stays in place.
    ///
    /// # Errors
    /// Propagates [`PreparedSnapshot::load`] failures.
    pub fn reload<P>(
        &self,
        provider: &P,
        index: &TextSimilarityIndex,
    ) -> Result<Arc<PreparedSnapshot>, PrepareError>
    where
        P: SnapshotProvider + ?Sized,
    {
        let prepared = PreparedSnapshot::load(provider, index)?;
        log::info!(
            "reloaded snapshot with {} places",
            prepared.snapshot().places().len()
        );
        Ok(self.replace(prepared))
    }
}
