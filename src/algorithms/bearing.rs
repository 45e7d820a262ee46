//! Great-circle bearing and distance on a spherical Earth
//!
//! Stateless helpers used by the tracker on every heading update:
//! - initial bearing from one point to another, in [0, 360)
//! - haversine surface distance
//! - the direct problem (point at a bearing and distance), used to lay out
//!   scripted walks and test geometry

use crate::core::{GeoPoint, EARTH_MEAN_RADIUS_M, FULL_CIRCLE_DEG};
use crate::validation::error::{TrackingError, TrackingResult};

/// Initial great-circle bearing from `from` to `to` in degrees, 0 = north,
/// clockwise, normalized into [0, 360).
///
/// When both points coincide the bearing is undefined; the formula then
/// yields `atan2(0, 0) = 0`, so the result is 0 on every call.
pub fn bearing(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let f_lat = from.latitude.to_radians();
    let f_lng = from.longitude.to_radians();
    let t_lat = to.latitude.to_radians();
    let t_lng = to.longitude.to_radians();
    let d_lng = t_lng - f_lng;

    let y = d_lng.sin() * t_lat.cos();
    let x = f_lat.cos() * t_lat.sin() - f_lat.sin() * t_lat.cos() * d_lng.cos();
    let degrees = y.atan2(x).to_degrees();

    if degrees >= 0.0 {
        degrees
    } else {
        let wrapped = degrees + FULL_CIRCLE_DEG;
        // -1e-15 + 360 rounds to 360
        if wrapped >= FULL_CIRCLE_DEG {
            0.0
        } else {
            wrapped
        }
    }
}

/// Haversine surface distance in meters.
pub fn distance(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let f_lat = from.latitude.to_radians();
    let t_lat = to.latitude.to_radians();
    let d_lat = t_lat - f_lat;
    let d_lng = (to.longitude - from.longitude).to_radians();

    let half_lat = (d_lat / 2.0).sin();
    let half_lng = (d_lng / 2.0).sin();
    let a = half_lat * half_lat + f_lat.cos() * t_lat.cos() * half_lng * half_lng;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_MEAN_RADIUS_M * c
}

/// Point reached by travelling `distance_m` meters from `from` along the
/// great circle leaving at `bearing_deg`.
pub fn destination(from: &GeoPoint, bearing_deg: f64, distance_m: f64) -> GeoPoint {
    let lat1 = from.latitude.to_radians();
    let lng1 = from.longitude.to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_m / EARTH_MEAN_RADIUS_M;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lng2 = lng1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new_unchecked(lat2.to_degrees(), normalize_longitude(lng2.to_degrees()))
}

/// Wrap a longitude into [-180, 180]
pub fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 540.0).rem_euclid(FULL_CIRCLE_DEG) - 180.0
}

/// Range checks for geodetic input
pub struct CoordinateValidator;

impl CoordinateValidator {
    /// Validate WGS84 latitude/longitude ranges
    pub fn validate(point: &GeoPoint) -> TrackingResult<()> {
        let lat_ok = point.latitude.is_finite() && (-90.0..=90.0).contains(&point.latitude);
        let lon_ok = point.longitude.is_finite() && (-180.0..=180.0).contains(&point.longitude);

        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(TrackingError::InvalidCoordinate {
                latitude: point.latitude,
                longitude: point.longitude,
            })
        }
    }
}
