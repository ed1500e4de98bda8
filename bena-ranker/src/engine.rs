//! The recommendation, search and nearby entry points.
//!
//! [`RecommendationEngine`] picks a ranker, resolves request parameters
//! through the configured policies and never fails: invalid parameters are
//! replaced and reported in [`Warnings`], and missing data yields an empty
//! [`RankedResult`] carrying its reason.

use bena_core::{PlaceId, RankedResult, UserId};

use crate::{
    ConfigError, ContentRanker, EngineConfig, FuzzyTextSearch, HybridRanker, PreparedSnapshot,
    ProximityRanker, RandomRanker, SearchOptions, Strategy, TextSimilarityIndex, Warnings,
};

const NO_ACTIVITY_WARNING: &str =
    "No past bookmarks or interactions found for this user, random recommendations are generated.";
const UNKNOWN_METHOD_WARNING: &str =
    "Method entered is not valid, hybrid recommendations are generated.";

/// Parameters of one recommendation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    /// User to recommend for.
    pub user_id: UserId,
    /// Requested strategy name; `None` selects the default.
    pub method: Option<String>,
    /// Requested number of results; `None` selects the default.
    pub length: Option<i64>,
    /// Seed for the random strategy, for reproducible samples.
    pub seed: Option<u64>,
}

impl RecommendationRequest {
    /// Request default recommendations for `user_id`.
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            method: None,
            length: None,
            seed: None,
        }
    }

    /// Request a specific strategy by name.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Request a number of results.
    #[must_use]
    pub const fn with_length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    /// Fix the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcome of [`RecommendationEngine::recommend`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recommendation {
    /// Ranked places.
    #[cfg_attr(feature = "serde", serde(rename = "recommendations"))]
    pub result: RankedResult,
    /// Strategy that produced the ranking.
    pub method: Strategy,
    /// Length limit that was applied.
    pub length: usize,
    /// Corrections made to the request.
    pub warnings: Warnings,
}

/// Outcome of [`RecommendationEngine::search`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchResults {
    /// Matching places.
    #[cfg_attr(feature = "serde", serde(rename = "search_results"))]
    pub result: RankedResult,
    /// The query as received.
    #[cfg_attr(feature = "serde", serde(rename = "searched_query"))]
    pub query: String,
    /// Length limit that was applied.
    pub length: usize,
    /// Corrections made to the request.
    pub warnings: Warnings,
}

/// Outcome of [`RecommendationEngine::find_near`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NearbyPlaces {
    /// Places within the radius, nearest first.
    #[cfg_attr(feature = "serde", serde(rename = "near_places"))]
    pub result: RankedResult,
    /// Anchor place.
    #[cfg_attr(feature = "serde", serde(rename = "searched_place_id"))]
    pub place_id: PlaceId,
    /// Length limit that was applied.
    pub length: usize,
    /// Radius that was applied, in kilometres.
    #[cfg_attr(feature = "serde", serde(rename = "radius"))]
    pub radius_km: f64,
    /// Corrections made to the request.
    pub warnings: Warnings,
}

/// Ranks and searches places over a [`PreparedSnapshot`].
///
/// # Examples
/// ```
/// use bena_core::test_support::sample_snapshot;
/// use bena_ranker::{RecommendationEngine, RecommendationRequest, Strategy};
///
/// let engine = RecommendationEngine::default();
/// let prepared = engine.prepare(sample_snapshot()).expect("unique place ids");
///
/// let outcome = engine.recommend(&prepared, &RecommendationRequest::new("U1").with_length(2));
/// assert_eq!(outcome.method, Strategy::Hybrid);
/// assert_eq!(outcome.length, 2);
/// assert!(outcome.warnings.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: EngineConfig,
    index: TextSimilarityIndex,
    content: ContentRanker,
    hybrid: HybridRanker,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::from_valid(EngineConfig::default())
    }
}

impl RecommendationEngine {
    /// Validate `config` and build an engine from it.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration is inconsistent.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate().map(Self::from_valid)
    }

    fn from_valid(config: EngineConfig) -> Self {
        let content = ContentRanker::new(config.unavailable.clone());
        let hybrid = HybridRanker::new(content.clone(), config.hybrid_weights);
        let index = TextSimilarityIndex::new(&config.tfidf);
        Self {
            config,
            index,
            content,
            hybrid,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Similarity index used by [`prepare`](Self::prepare).
    #[must_use]
    pub const fn index(&self) -> &TextSimilarityIndex {
        &self.index
    }

    /// Build the similarity matrix for `snapshot` with this engine's
    /// tokenisation.
    ///
    /// # Errors
    /// Returns [`PrepareError`](crate::PrepareError) when place identifiers
    /// repeat.
    pub fn prepare(
        &self,
        snapshot: bena_core::Snapshot,
    ) -> Result<PreparedSnapshot, crate::PrepareError> {
        PreparedSnapshot::build(snapshot, &self.index)
    }

    /// Recommend places for a user.
    ///
    /// An explicitly requested known strategy is used; a missing one selects
    /// [`Strategy::Hybrid`], as does an unknown one (with a warning). A user
    /// without bookmarks or interactions always gets [`Strategy::Random`],
    /// also with a warning.
    #[must_use]
    pub fn recommend(
        &self,
        prepared: &PreparedSnapshot,
        request: &RecommendationRequest,
    ) -> Recommendation {
        let mut warnings = Warnings::default();
        let length = self.config.recommendation_length.resolve(
            request.length,
            "recommendations",
            &mut warnings,
        );
        let mut method = select_strategy(request.method.as_deref(), &mut warnings);
        let snapshot = prepared.snapshot();
        if !snapshot.has_activity(&request.user_id) {
            log::info!(
                "user {} has no bookmarks or interactions; using random recommendations",
                request.user_id
            );
            warnings.push(NO_ACTIVITY_WARNING);
            method = Strategy::Random;
        }

        let bookmarks = snapshot.bookmark_set(&request.user_id);
        let places = snapshot.places();
        let result = match method {
            Strategy::ContentBased => {
                self.content
                    .rank(&bookmarks, places, prepared.matrix(), length)
            }
            Strategy::NearBookmarks => ProximityRanker.rank(&bookmarks, places, length),
            Strategy::Hybrid => self.hybrid.rank(&bookmarks, places, prepared.matrix(), length),
            Strategy::Random => RandomRanker.rank(places, length, request.seed),
        };
        if let Some(reason) = result.reason() {
            log::info!("no {method} recommendations for {}: {reason}", request.user_id);
        }

        Recommendation {
            result,
            method,
            length,
            warnings,
        }
    }

    /// Fuzzy-search places by free text.
    #[must_use]
    pub fn search(
        &self,
        prepared: &PreparedSnapshot,
        query: &str,
        length: Option<i64>,
    ) -> SearchResults {
        let mut warnings = Warnings::default();
        let limit = self
            .config
            .search_length
            .resolve(length, "results", &mut warnings);
        let options = SearchOptions {
            limit,
            min_score: self.config.min_search_score,
        };
        let result = FuzzyTextSearch.search(query, prepared.snapshot().places(), options);
        if let Some(reason) = result.reason() {
            log::info!("search for {query:?} returned nothing: {reason}");
        }
        SearchResults {
            result,
            query: query.to_owned(),
            length: limit,
            warnings,
        }
    }

    /// Places near `place_id`, nearest first.
    ///
    /// An unknown identifier yields an empty result whose reason is
    /// [`EmptyReason::PlaceNotFound`](bena_core::EmptyReason::PlaceNotFound).
    #[must_use]
    pub fn find_near(
        &self,
        prepared: &PreparedSnapshot,
        place_id: &PlaceId,
        length: Option<i64>,
        radius_km: Option<f64>,
    ) -> NearbyPlaces {
        let mut warnings = Warnings::default();
        let limit = self
            .config
            .nearby_length
            .resolve(length, "places", &mut warnings);
        let radius_km = self.config.nearby_radius.resolve(radius_km, &mut warnings);
        let result =
            ProximityRanker.find_near(place_id, prepared.snapshot().places(), radius_km, limit);
        NearbyPlaces {
            result,
            place_id: place_id.clone(),
            length: limit,
            radius_km,
            warnings,
        }
    }
}

fn select_strategy(requested: Option<&str>, warnings: &mut Warnings) -> Strategy {
    match requested.map(str::parse::<Strategy>) {
        None => Strategy::default(),
        Some(Ok(strategy)) => strategy,
        Some(Err(err)) => {
            log::warn!("{err}; falling back to {}", Strategy::default());
            warnings.push(UNKNOWN_METHOD_WARNING);
            Strategy::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bena_core::test_support::sample_snapshot;
    use bena_core::{Bookmark, EmptyReason, Interaction, Snapshot};
    use rstest::{fixture, rstest};

    #[fixture]
    fn engine() -> RecommendationEngine {
        RecommendationEngine::default()
    }

    #[fixture]
    fn prepared(engine: RecommendationEngine) -> PreparedSnapshot {
        engine.prepare(sample_snapshot()).expect("unique place ids")
    }

    fn ids(result: &RankedResult) -> Vec<&str> {
        result.ids().into_iter().map(|id| id.as_str()).collect()
    }

    #[rstest]
    #[case("content_based", Strategy::ContentBased)]
    #[case("near_bookmarks", Strategy::NearBookmarks)]
    #[case("hybrid", Strategy::Hybrid)]
    #[case("random", Strategy::Random)]
    fn explicit_strategies_are_honoured(
        engine: RecommendationEngine,
        prepared: PreparedSnapshot,
        #[case] method: &str,
        #[case] expected: Strategy,
    ) {
        let request = RecommendationRequest::new("U1")
            .with_method(method)
            .with_length(3)
            .with_seed(3);
        let outcome = engine.recommend(&prepared, &request);
        assert_eq!(outcome.method, expected);
        assert!(outcome.warnings.is_empty());
    }

    #[rstest]
    fn proximity_example_orders_by_distance(
        engine: RecommendationEngine,
        prepared: PreparedSnapshot,
    ) {
        let request = RecommendationRequest::new("U1")
            .with_method("near_bookmarks")
            .with_length(2);
        let outcome = engine.recommend(&prepared, &request);
        assert_eq!(ids(&outcome.result), ["P2", "P3"]);
    }

    #[rstest]
    fn unknown_method_falls_back_to_hybrid(
        engine: RecommendationEngine,
        prepared: PreparedSnapshot,
    ) {
        let request = RecommendationRequest::new("U1")
            .with_method("trending")
            .with_length(3);
        let outcome = engine.recommend(&prepared, &request);
        assert_eq!(outcome.method, Strategy::Hybrid);
        assert_eq!(
            outcome.warnings.iter().collect::<Vec<_>>(),
            [UNKNOWN_METHOD_WARNING]
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some("content_based"))]
    #[case(Some("hybrid"))]
    fn users_without_activity_get_random(
        engine: RecommendationEngine,
        prepared: PreparedSnapshot,
        #[case] method: Option<&str>,
    ) {
        let mut request = RecommendationRequest::new("stranger").with_seed(11);
        request.method = method.map(str::to_owned);
        let outcome = engine.recommend(&prepared, &request);
        assert_eq!(outcome.method, Strategy::Random);
        assert!(outcome.warnings.iter().any(|warning| warning == NO_ACTIVITY_WARNING));
        assert_eq!(outcome.result.len(), 3);
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(999))]
    #[case(Some(-1))]
    #[case(None)]
    fn invalid_lengths_fall_back_to_default(
        engine: RecommendationEngine,
        prepared: PreparedSnapshot,
        #[case] length: Option<i64>,
    ) {
        let mut request = RecommendationRequest::new("U1");
        request.length = length;
        let outcome = engine.recommend(&prepared, &request);
        assert_eq!(outcome.length, 10);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[rstest]
    fn missing_length_is_defaulted_with_warning(
        engine: RecommendationEngine,
        prepared: PreparedSnapshot,
    ) {
        let request = RecommendationRequest::new("U1").with_method("near_bookmarks");
        let outcome = engine.recommend(&prepared, &request);
        assert_eq!(outcome.method, Strategy::NearBookmarks);
        assert_eq!(outcome.length, 10);
        assert_eq!(
            outcome.warnings.iter().collect::<Vec<_>>(),
            ["Length entered is not valid, 10 recommendations are generated."]
        );
    }

    #[rstest]
    fn interactions_count_as_activity(engine: RecommendationEngine) {
        let snapshot = Snapshot::new(
            bena_core::test_support::sample_places(),
            vec![Bookmark::new("U1", "P1")],
            vec![Interaction::new("U2", "P3")],
        );
        let prepared = engine.prepare(snapshot).expect("unique place ids");
        let request = RecommendationRequest::new("U2").with_length(5);
        let outcome = engine.recommend(&prepared, &request);
        assert_eq!(outcome.method, Strategy::Hybrid);
        assert!(outcome.warnings.is_empty());
        assert_eq!(ids(&outcome.result), ["P1", "P2"]);
    }

    #[rstest]
    fn search_applies_length_policy(engine: RecommendationEngine, prepared: PreparedSnapshot) {
        let results = engine.search(&prepared, "beach", Some(1));
        assert_eq!(ids(&results.result), ["P1"]);
        assert_eq!(results.length, 1);
        assert!(results.warnings.is_empty());

        let defaulted = engine.search(&prepared, "beach", Some(50));
        assert_eq!(defaulted.length, 10);
        assert_eq!(defaulted.warnings.len(), 1);
    }

    #[rstest]
    fn find_near_reports_unknown_place(engine: RecommendationEngine, prepared: PreparedSnapshot) {
        let near = engine.find_near(&prepared, &PlaceId::from("P404"), None, None);
        assert!(near.result.is_empty());
        assert!(matches!(
            near.result.reason(),
            Some(EmptyReason::PlaceNotFound { .. })
        ));
    }

    #[rstest]
    fn find_near_clamps_length_and_radius(
        engine: RecommendationEngine,
        prepared: PreparedSnapshot,
    ) {
        let near = engine.find_near(&prepared, &PlaceId::from("P1"), Some(9), Some(50.0));
        assert_eq!(near.length, 5);
        assert_eq!(near.radius_km, 1.0);
        assert_eq!(near.warnings.len(), 2);
        assert!(near.result.is_empty());

        let wider = engine.find_near(&prepared, &PlaceId::from("P1"), Some(2), Some(5.0));
        assert_eq!(ids(&wider.result), ["P2"]);
        assert!(wider.warnings.is_empty());
    }

    #[rstest]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            hybrid_weights: crate::HybridWeights {
                content: -1.0,
                proximity: 0.4,
            },
            ..EngineConfig::default()
        };
        assert!(RecommendationEngine::new(config).is_err());
    }
}
