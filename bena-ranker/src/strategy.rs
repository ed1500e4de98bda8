//! Recommendation strategies and their wire names.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// How recommendations are ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Tag similarity to the user's bookmarks.
    ContentBased,
    /// Distance to the nearest bookmark.
    NearBookmarks,
    /// Weighted blend of content and proximity.
    #[default]
    Hybrid,
    /// Uniform sample, used for cold starts.
    Random,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::ContentBased,
        Self::NearBookmarks,
        Self::Hybrid,
        Self::Random,
    ];

    /// Name used on the wire and in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentBased => "content_based",
            Self::NearBookmarks => "near_bookmarks",
            Self::Hybrid => "hybrid",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recommendation method `{name}`")]
pub struct UnknownStrategy {
    /// The rejected name.
    pub name: String,
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    /// Parse a wire name, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use bena_ranker::Strategy;
    ///
    /// assert_eq!("Near_Bookmarks".parse::<Strategy>(), Ok(Strategy::NearBookmarks));
    /// assert!("popular".parse::<Strategy>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownStrategy {
                name: raw.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("content_based", Strategy::ContentBased)]
    #[case("NEAR_BOOKMARKS", Strategy::NearBookmarks)]
    #[case(" hybrid ", Strategy::Hybrid)]
    #[case("random", Strategy::Random)]
    fn parses_wire_names(#[case] raw: &str, #[case] expected: Strategy) {
        assert_eq!(raw.parse::<Strategy>(), Ok(expected));
    }

    #[rstest]
    fn display_round_trips_through_parse() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>(), Ok(strategy));
        }
    }

    #[rstest]
    fn unknown_names_are_reported() {
        let err = "popular".parse::<Strategy>().expect_err("unknown");
        assert_eq!(err.to_string(), "unknown recommendation method `popular`");
    }
}
