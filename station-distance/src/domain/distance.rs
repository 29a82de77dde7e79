//! Great-circle distance between stations.

use super::Station;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
///
/// See <https://en.wikipedia.org/wiki/Haversine_formula>.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Distance in kilometres between two stations.
///
/// Computed in double precision and narrowed to `f32` on return.
///
/// # Examples
///
/// ```
/// use station_distance::domain::{Station, distance_km};
///
/// let a = Station::new(1, "Warszawa Centralna", 52.232222, 21.008333, 10);
/// assert_eq!(distance_km(&a, &a), 0.0);
/// ```
pub fn distance_km(a: &Station, b: &Station) -> f32 {
    haversine_km(a.latitude, a.longitude, b.latitude, b.longitude) as f32
}
