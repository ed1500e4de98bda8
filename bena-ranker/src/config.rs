//! Engine configuration and request parameter policies.
//!
//! Out-of-range request parameters are never fatal. A [`LengthPolicy`] or
//! [`RadiusPolicy`] replaces them with a default and records a warning for
//! the caller to surface.

use std::fmt;

use crate::{ConfigError, DEFAULT_MIN_SCORE, HybridWeights, TfIdfOptions, UnavailablePolicy};

/// Human-readable notes about corrected request parameters.
///
/// # Examples
/// ```
/// use bena_ranker::Warnings;
///
/// let mut warnings = Warnings::default();
/// warnings.push("Length entered is not valid.");
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings.to_string(), "Length entered is not valid.\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Warnings(Vec<String>);

impl Warnings {
    /// Append a warning.
    pub fn push(&mut self, warning: impl Into<String>) {
        self.0.push(warning.into());
    }

    /// Number of warnings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Report whether nothing was corrected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over warnings in the order they were raised.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Warnings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for warning in &self.0 {
            writeln!(f, "{warning}")?;
        }
        Ok(())
    }
}

/// Accepted range and fallback for a requested result length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LengthPolicy {
    /// Length used when the request is missing or out of range.
    pub default: usize,
    /// Smallest accepted length.
    pub min: usize,
    /// Largest accepted length.
    pub max: usize,
}

impl LengthPolicy {
    /// Recommendations: default 10, accepted `1..=10`.
    pub const RECOMMENDATIONS: Self = Self::new(10, 1, 10);
    /// Free-text search: default 10, accepted `1..=10`.
    pub const SEARCH: Self = Self::new(10, 1, 10);
    /// Nearby lookups: default 5, accepted `1..=5`.
    pub const NEARBY: Self = Self::new(5, 1, 5);

    /// Build a policy.
    #[must_use]
    pub const fn new(default: usize, min: usize, max: usize) -> Self {
        Self { default, min, max }
    }

    /// Resolve a requested length, recording a warning when it is replaced.
    ///
    /// `noun` names the items in the warning, e.g. `"recommendations"`.
    ///
    /// # Examples
    /// ```
    /// use bena_ranker::{LengthPolicy, Warnings};
    ///
    /// let mut warnings = Warnings::default();
    /// assert_eq!(LengthPolicy::RECOMMENDATIONS.resolve(Some(3), "recommendations", &mut warnings), 3);
    /// assert!(warnings.is_empty());
    /// assert_eq!(LengthPolicy::RECOMMENDATIONS.resolve(Some(999), "recommendations", &mut warnings), 10);
    /// assert_eq!(LengthPolicy::RECOMMENDATIONS.resolve(None, "recommendations", &mut warnings), 10);
    /// assert_eq!(warnings.len(), 2);
    /// ```
    pub fn resolve(self, requested: Option<i64>, noun: &str, warnings: &mut Warnings) -> usize {
        let accepted = requested
            .and_then(|length| usize::try_from(length).ok())
            .filter(|length| (self.min..=self.max).contains(length));
        accepted.unwrap_or_else(|| {
            warnings.push(format!(
                "Length entered is not valid, {} {noun} are generated.",
                self.default
            ));
            self.default
        })
    }

    fn validate(self, name: &'static str) -> Result<Self, ConfigError> {
        if 1 <= self.min && self.min <= self.default && self.default <= self.max {
            Ok(self)
        } else {
            Err(ConfigError::InvalidLengthPolicy {
                name,
                min: self.min,
                default: self.default,
                max: self.max,
            })
        }
    }
}

/// Accepted range and fallback for a nearby-search radius in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadiusPolicy {
    /// Radius used when the request is missing or out of range.
    pub default_km: f64,
    /// Largest accepted radius. The smallest is zero.
    pub max_km: f64,
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self {
            default_km: 1.0,
            max_km: 5.0,
        }
    }
}

impl RadiusPolicy {
    /// Resolve a requested radius, recording a warning when it is replaced.
    ///
    /// # Examples
    /// ```
    /// use bena_ranker::{RadiusPolicy, Warnings};
    ///
    /// let mut warnings = Warnings::default();
    /// let policy = RadiusPolicy::default();
    /// assert_eq!(policy.resolve(Some(2.5), &mut warnings), 2.5);
    /// assert_eq!(policy.resolve(Some(-1.0), &mut warnings), 1.0);
    /// assert_eq!(warnings.len(), 1);
    /// ```
    pub fn resolve(self, requested: Option<f64>, warnings: &mut Warnings) -> f64 {
        match requested {
            Some(radius) if radius.is_finite() && (0.0..=self.max_km).contains(&radius) => radius,
            _ => {
                warnings.push(format!(
                    "Radius entered is not valid, places within {} km are returned.",
                    self.default_km
                ));
                self.default_km
            }
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        let finite = self.default_km.is_finite() && self.max_km.is_finite();
        if finite && 0.0 <= self.default_km && self.default_km <= self.max_km {
            Ok(self)
        } else {
            Err(ConfigError::InvalidRadiusPolicy {
                default_km: self.default_km,
                max_km: self.max_km,
            })
        }
    }
}

/// Everything the [`RecommendationEngine`](crate::RecommendationEngine) can
/// be tuned with. Every field has a default.
///
/// # Examples
/// ```
/// use bena_ranker::EngineConfig;
///
/// let config = EngineConfig::default().validate().expect("defaults are valid");
/// assert_eq!(config.hybrid_weights.content, 0.6);
/// assert_eq!(config.recommendation_length.max, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Blend weights for the hybrid strategy.
    pub hybrid_weights: HybridWeights,
    /// Override for places tagged as unavailable.
    pub unavailable: UnavailablePolicy,
    /// Tokenisation used for the similarity matrix.
    pub tfidf: TfIdfOptions,
    /// Minimum fuzzy score for search results.
    pub min_search_score: u8,
    /// Length policy for recommendations.
    pub recommendation_length: LengthPolicy,
    /// Length policy for search results.
    pub search_length: LengthPolicy,
    /// Length policy for nearby lookups.
    pub nearby_length: LengthPolicy,
    /// Radius policy for nearby lookups.
    pub nearby_radius: RadiusPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hybrid_weights: HybridWeights::default(),
            unavailable: UnavailablePolicy::default(),
            tfidf: TfIdfOptions::default(),
            min_search_score: DEFAULT_MIN_SCORE,
            recommendation_length: LengthPolicy::RECOMMENDATIONS,
            search_length: LengthPolicy::SEARCH,
            nearby_length: LengthPolicy::NEARBY,
            nearby_radius: RadiusPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Check every field and return the configuration unchanged.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.hybrid_weights.validate()?;
        self.recommendation_length.validate("recommendation")?;
        self.search_length.validate("search")?;
        self.nearby_length.validate("nearby")?;
        self.nearby_radius.validate()?;
        if self.min_search_score > 100 {
            return Err(ConfigError::InvalidMinScore {
                min_score: self.min_search_score,
            });
        }
        if !self.unavailable.score.is_finite() {
            return Err(ConfigError::InvalidUnavailableScore {
                score: self.unavailable.score,
            });
        }
        Ok(self)
    }
}
