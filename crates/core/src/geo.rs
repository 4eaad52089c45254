use crate::models::Coordinates;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres, rounded to two decimals.
/// Returns 0.0 when either end is unknown.
pub fn haversine_km(from: Option<Coordinates>, to: Option<Coordinates>) -> f64 {
    let (Some(a), Some(b)) = (from, to) else {
        return 0.0;
    };

    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    round_to(EARTH_RADIUS_KM * c, 2)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
