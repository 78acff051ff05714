use crate::models::Coordinates;

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// 50 miles in meters
pub const FAR_RESULT_METERS: f64 = 80_467.0;

/// Calculate the Haversine distance between two points in kilometers
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

/// Haversine distance between two coordinates in meters
#[inline]
pub fn haversine_meters(from: &Coordinates, to: &Coordinates) -> f64 {
    haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude) * 1000.0
}

/// Warning shown when the farthest result lies beyond 50 miles
pub fn far_result_warning(max_distance_meters: f64) -> String {
    if max_distance_meters > FAR_RESULT_METERS {
        "Some results are more than 50 miles away.".to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Distance from London to Paris (approximately 344 km)
        let london_lat = 51.5074;
        let london_lon = -0.1278;
        let paris_lat = 48.8566;
        let paris_lon = 2.3522;

        let distance = haversine_distance(london_lat, london_lon, paris_lat, paris_lon);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_haversine_meters() {
        let a = Coordinates { latitude: 40.7128, longitude: -74.0060 };
        let b = Coordinates { latitude: 40.72, longitude: -74.01 };

        let meters = haversine_meters(&a, &b);
        assert!(meters > 500.0 && meters < 2000.0, "Expected ~870m, got {}", meters);
        assert!(haversine_meters(&a, &a) < 0.01);
    }

    #[test]
    fn test_far_result_warning() {
        assert!(far_result_warning(0.0).is_empty());
        assert!(far_result_warning(FAR_RESULT_METERS).is_empty());
        assert!(far_result_warning(FAR_RESULT_METERS + 1.0).contains("50 miles"));
    }
}
