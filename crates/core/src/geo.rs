//! Great-circle distance helpers used by circle drawing.

/// Mean Earth radius in meters (IUGG).
///
/// Map distances use the Earth radius regardless of the active dataset;
/// circle radii are stored in meters and rendered on the same projected
/// surface for every celestial body.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance in meters between two `(lat, lng)`
/// points given in degrees.
pub fn haversine_distance_m(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lng1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lng2) = (b.0.to_radians(), b.1.to_radians());

    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * MEAN_EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_for_identical_points() {
        assert_eq!(haversine_distance_m((45.0, 90.0), (45.0, 90.0)), 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = haversine_distance_m((0.0, 0.0), (1.0, 0.0));
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = (48.8566, 2.3522);
        let b = (40.7128, -74.0060);
        let ab = haversine_distance_m(a, b);
        let ba = haversine_distance_m(b, a);
        assert!((ab - ba).abs() < 1e-6);
        // Paris to New York is roughly 5 837 km.
        assert!((ab - 5_837_000.0).abs() < 10_000.0, "got {ab}");
    }
}
