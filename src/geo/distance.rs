//! Great-circle distance.

use super::types::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates, in kilometers.
///
/// Non-finite inputs propagate as NaN or infinity; the tour evaluator is
/// responsible for clamping such totals.
///
/// # Examples
///
/// ```
/// use u_beeroute::geo::{haversine_km, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// let d = haversine_km(a, b);
/// assert!((d - 111.19).abs() < 0.01);
/// ```
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let s_lat = (d_lat / 2.0).sin();
    let s_lng = (d_lng / 2.0).sin();
    let h = s_lat * s_lat + a.lat.to_radians().cos() * b.lat.to_radians().cos() * s_lng * s_lng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
