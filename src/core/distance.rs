use crate::models::Coordinates;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// Spherical-Earth approximation; callers must not expect sub-100m
/// accuracy.
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance between two coordinate pairs
#[inline]
pub fn distance_between(a: &Coordinates, b: &Coordinates) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Round a distance to one decimal place for display; internal callers
/// keep full precision
#[inline]
pub fn round_km(distance: f64) -> f64 {
    (distance * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let distance = haversine_distance(51.5074, -0.1278, 51.5074, -0.1278);
        assert_eq!(distance, 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let ab = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
        let ba = haversine_distance(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_london_to_paris() {
        // London to Paris is approximately 343-344 km
        let distance = haversine_distance(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(
            (343.0..=344.5).contains(&distance),
            "Distance should be ~343-344km, got {}",
            distance
        );
    }

    #[test]
    fn test_distance_between_coordinates() {
        let london = Coordinates::new(51.5074, -0.1278);
        let paris = Coordinates::new(48.8566, 2.3522);
        let distance = distance_between(&london, &paris);
        assert!((distance - haversine_distance(51.5074, -0.1278, 48.8566, 2.3522)).abs() < 1e-12);
    }

    #[test]
    fn test_round_km_one_decimal() {
        assert_eq!(round_km(3.14159), 3.1);
        assert_eq!(round_km(3.15), 3.2);
        assert_eq!(round_km(0.0), 0.0);
        assert_eq!(round_km(99.96), 100.0);
    }
}
