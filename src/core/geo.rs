use crate::domain::model::{RadianCoordinate, Value};
use crate::utils::error::Result;
use crate::utils::validation::validate_coordinate;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Validate a `(latitude, longitude)` pair in degrees and convert it to radians.
pub fn degrees_to_radians(coordinate: &Value) -> Result<RadianCoordinate> {
    Ok(validate_coordinate(coordinate)?.to_radians())
}

/// Great-circle distance using the spherical law of cosines
///
/// # Arguments
/// * `from` - First point in radians
/// * `to` - Second point in radians
/// * `radius_km` - Sphere radius in kilometers
///
/// # Returns
/// Distance in kilometers, unrounded
#[inline]
pub fn great_circle_distance(from: RadianCoordinate, to: RadianCoordinate, radius_km: f64) -> f64 {
    let cos_angle = from.latitude.sin() * to.latitude.sin()
        + from.latitude.cos() * to.latitude.cos() * (from.longitude - to.longitude).cos();

    // Rounding can push the cosine just past +/-1 for identical or antipodal points.
    cos_angle.clamp(-1.0, 1.0).acos() * radius_km
}

/// Round to `digits` decimals on the exact binary value, ties to even.
pub fn round_half_even(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}
