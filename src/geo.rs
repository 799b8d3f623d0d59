// ABOUTME: Great-circle distance between coordinate pairs via the haversine formula
// ABOUTME: Pure function, numerically stable near coincident and antipodal points
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Stridelog

//! # Geographic Distance
//!
//! Distance between consecutive location fixes. GPS jitter makes identical
//! and near-identical consecutive coordinates routine, so coincident points
//! resolve to exactly 0 rather than an error.

/// Mean Earth radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two coordinates in degrees
///
/// Uses the haversine formula. The intermediate term is fed through `atan2`,
/// which stays in-domain for antipodal points where a naive `asin` of a value
/// that rounds just above 1.0 would not.
#[must_use]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_are_zero_distance() {
        assert_eq!(haversine_distance(45.5, -73.6, 45.5, -73.6), 0.0);
        assert_eq!(haversine_distance(0.0, 0.0, 0.0, 0.0), 0.0);
        assert_eq!(haversine_distance(-89.9, 179.9, -89.9, 179.9), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let d1 = haversine_distance(45.501, -73.567, 48.857, 2.352);
        let d2 = haversine_distance(48.857, 2.352, 45.501, -73.567);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn one_millidegree_of_longitude_at_equator() {
        // 0.001 degrees of longitude at the equator is roughly 111.19 m.
        let d = haversine_distance(0.0, 0.0, 0.0, 0.001);
        assert!((d - 111.19).abs() < 0.05, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let d = haversine_distance(0.0, 0.0, 0.0, 180.0);
        let half_circumference = std::f64::consts::PI * 6_371_000.0;
        assert!((d - half_circumference).abs() < 1.0, "got {d}");
        assert!(d.is_finite());
    }

    #[test]
    fn near_identical_points_stay_finite_and_tiny() {
        let d = haversine_distance(45.5, -73.6, 45.5 + 1e-12, -73.6);
        assert!(d.is_finite());
        assert!(d < 1e-3);
    }
}
