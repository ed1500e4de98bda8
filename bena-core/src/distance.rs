//! Great-circle distance between WGS84 coordinates.
//!
//! Distances use the haversine formula on a sphere with radius
//! [`EARTH_RADIUS_KM`]. Inputs are decimal degrees. The functions never
//! validate their inputs: a NaN coordinate yields a NaN distance and
//! out-of-range degrees are used as given. Rankers decide how to treat
//! non-finite distances.

use geo::Coord;

/// Mean Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two `(x = lon, y = lat)` points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bena_core::haversine_km;
///
/// let cairo = Coord { x: 31.2357, y: 30.0444 };
/// let alexandria = Coord { x: 29.9187, y: 31.2001 };
/// let km = haversine_km(cairo, alexandria);
/// assert!((km - 180.0).abs() < 0.5);
/// assert_eq!(haversine_km(cairo, cairo), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat1 = from.y.to_radians();
    let lat2 = to.y.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (to.x - from.x).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Haversine distance in kilometres from latitude/longitude pairs.
///
/// # Examples
/// ```
/// use bena_core::distance;
///
/// let there = distance(30.0, 31.0, 30.01, 31.01);
/// let back = distance(30.01, 31.01, 30.0, 31.0);
/// assert!((there - back).abs() < 1e-9);
/// ```
#[must_use]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_km(Coord { x: lon1, y: lat1 }, Coord { x: lon2, y: lat2 })
}
