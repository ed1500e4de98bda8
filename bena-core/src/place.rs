//! Places: the points of interest ranked and searched by the engine.

use geo::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::PlaceId;

/// A point of interest that can be recommended or searched.
///
/// Coordinates are WGS84 decimal degrees with `x = longitude` and
/// `y = latitude`. Optional text fields are stored as empty strings rather
/// than being absent, so ranking code never has to special-case missing data.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bena_core::Place;
///
/// let place = Place::new("P1", "Montaza Beach", Coord { x: 29.96, y: 31.28 })
///     .with_tags("beach, garden")
///     .with_address("Alexandria");
///
/// assert_eq!(place.id.as_str(), "P1");
/// assert_eq!(place.latitude(), 31.28);
/// assert!(place.arabic_name.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Place {
    /// Unique identifier within the snapshot.
    pub id: PlaceId,
    /// Display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Free-text tags describing the place.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Localised (Arabic) display name.
    #[cfg_attr(feature = "serde", serde(default))]
    pub arabic_name: String,
    /// Postal or descriptive address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
}

impl Place {
    /// Construct a place with a name and location and empty text fields.
    pub fn new(id: impl Into<PlaceId>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: String::new(),
            location,
            arabic_name: String::new(),
            address: String::new(),
        }
    }

    /// Replace the tag text.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Replace the localised name.
    #[must_use]
    pub fn with_arabic_name(mut self, arabic_name: impl Into<String>) -> Self {
        self.arabic_name = arabic_name.into();
        self
    }

    /// Replace the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Report whether the coordinates are finite and inside the WGS84 range.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use bena_core::Place;
    ///
    /// assert!(Place::new("a", "", Coord { x: 180.0, y: -90.0 }).has_valid_location());
    /// assert!(!Place::new("b", "", Coord { x: 0.0, y: 91.0 }).has_valid_location());
    /// assert!(!Place::new("c", "", Coord { x: f64::NAN, y: 0.0 }).has_valid_location());
    /// ```
    #[must_use]
    pub fn has_valid_location(&self) -> bool {
        let Coord { x: lon, y: lat } = self.location;
        lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
    }
}
