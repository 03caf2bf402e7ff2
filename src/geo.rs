use serde::{Deserialize, Serialize};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average walking speed assumed for time estimates, in km/h.
const WALKING_SPEED_KMH: f64 = 5.0;

/// A WGS84 point. Latitude in [-90, 90], longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two points in kilometers (haversine).
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Estimated walking time between two points, in whole minutes.
///
/// Straight-line distance at 5 km/h, so it undershoots street routes a bit.
/// Always succeeds for finite coordinates; identical points estimate to 0.
pub fn walk_minutes(from: Coordinate, to: Coordinate) -> u32 {
    let km = haversine_km(from, to);
    (km / WALKING_SPEED_KMH * 60.0).round() as u32
}
