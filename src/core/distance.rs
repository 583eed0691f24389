/// Statute miles per degree of great-circle arc (60 nautical miles × 1.1515)
const MILES_PER_DEGREE: f64 = 60.0 * 1.1515;

/// Meters in one statute mile, as the Places API radius expects
pub const METERS_PER_MILE: f64 = 1609.34;

/// Great-circle distance between two points in miles
///
/// Uses the spherical law of cosines. Coincident points short-circuit to
/// exactly `0.0`, and the cosine sum is clamped to `[-1, 1]` so round-off
/// can never push `acos` out of its domain.
///
/// # Arguments
/// * `lat1`, `lon1` - First point in degrees
/// * `lat2`, `lon2` - Second point in degrees
#[inline]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let theta_rad = (lon1 - lon2).to_radians();

    let cos_sum = lat1_rad.sin() * lat2_rad.sin()
        + lat1_rad.cos() * lat2_rad.cos() * theta_rad.cos();

    cos_sum.clamp(-1.0, 1.0).acos().to_degrees() * MILES_PER_DEGREE
}

/// Convert a search radius in miles to meters
#[inline]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_points_are_zero() {
        assert_eq!(distance_miles(42.373, -71.118, 42.373, -71.118), 0.0);
        assert_eq!(distance_miles(-90.0, 180.0, -90.0, 180.0), 0.0);
    }

    #[test]
    fn test_boston_to_new_york() {
        // Boston to New York is roughly 190 miles as the crow flies
        let distance = distance_miles(42.3601, -71.0589, 40.7128, -74.0060);
        assert!((distance - 190.0).abs() < 5.0, "Distance should be ~190mi, got {}", distance);
    }

    #[test]
    fn test_nearly_identical_points_do_not_nan() {
        let distance = distance_miles(42.373, -71.118, 42.373, -71.118_000_000_000_1);
        assert!(distance.is_finite());
        assert!(distance >= 0.0);
    }

    #[test]
    fn test_antipodes() {
        // Half of the circumference: 180 degrees of arc
        let distance = distance_miles(0.0, 0.0, 0.0, 180.0);
        assert!((distance - 180.0 * MILES_PER_DEGREE).abs() < 1e-6);
    }

    #[test]
    fn test_miles_to_meters() {
        assert!((miles_to_meters(1.5) - 2414.01).abs() < 1e-9);
    }
}
