use crate::models::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates via the haversine
/// formula, rounded to the nearest whole kilometer.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> u32 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    (EARTH_RADIUS_KM * c).round() as u32
}
