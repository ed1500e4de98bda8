//! Ordering helpers shared by the rankers.

use bena_core::{Place, PlaceScores, RankedResult, ScoredPlace};

/// Candidate place paired with the key it is ordered by.
pub(crate) struct Candidate<'a> {
    pub(crate) place: &'a Place,
    pub(crate) key: f64,
    pub(crate) scores: PlaceScores,
}

/// Direction in which candidate keys are ranked.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Order {
    Ascending,
    Descending,
}

/// Stable-sort candidates by key and keep the first `limit`.
///
/// Keys are expected to be finite; `total_cmp` keeps the ordering total even
/// if they are not.
pub(crate) fn top_n(mut candidates: Vec<Candidate<'_>>, order: Order, limit: usize) -> RankedResult {
    candidates.sort_by(|left, right| match order {
        Order::Ascending => left.key.total_cmp(&right.key),
        Order::Descending => right.key.total_cmp(&left.key),
    });
    RankedResult::new(
        candidates
            .into_iter()
            .take(limit)
            .map(|candidate| ScoredPlace::new(candidate.place.clone(), candidate.scores))
            .collect(),
    )
}
