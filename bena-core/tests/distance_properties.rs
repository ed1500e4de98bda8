//! Property-based tests for great-circle distance.
//!
//! # Invariants tested
//!
//! - **Symmetry:** `d(a, b) == d(b, a)`.
//! - **Identity:** `d(a, a) == 0`.
//! - **Bounds:** distances lie in `0..=π·R` for valid coordinates.

use geo::Coord;
use proptest::prelude::*;

use bena_core::{EARTH_RADIUS_KM, haversine_km};

fn coord_strategy() -> impl Strategy<Value = Coord<f64>> {
    (-180.0_f64..=180.0_f64, -90.0_f64..=90.0_f64).prop_map(|(x, y)| Coord { x, y })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: swapping the endpoints does not change the distance.
    #[test]
    #[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
    fn distance_is_symmetric(a in coord_strategy(), b in coord_strategy()) {
        let there = haversine_km(a, b);
        let back = haversine_km(b, a);
        prop_assert!((there - back).abs() < 1e-6, "{there} != {back}");
    }

    /// Property: a point is at distance zero from itself.
    #[test]
    fn distance_to_self_is_zero(a in coord_strategy()) {
        prop_assert_eq!(haversine_km(a, a), 0.0);
    }

    /// Property: distances never exceed half the circumference.
    #[test]
    #[expect(clippy::float_arithmetic, reason = "bound includes rounding slack")]
    fn distance_is_bounded(a in coord_strategy(), b in coord_strategy()) {
        let km = haversine_km(a, b);
        let limit = EARTH_RADIUS_KM * std::f64::consts::PI + 1e-6;
        prop_assert!(km >= 0.0);
        prop_assert!(km <= limit, "{km} exceeds {limit}");
    }
}
