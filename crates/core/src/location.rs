//! Coordinate bounds for shared locations.

use crate::error::CoreError;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Validate a latitude/longitude pair.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), CoreError> {
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude) {
        return Err(CoreError::Validation(format!(
            "latitude must be between {MIN_LATITUDE} and {MAX_LATITUDE}, got {latitude}"
        )));
    }
    if !(MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude) {
        return Err(CoreError::Validation(format!(
            "longitude must be between {MIN_LONGITUDE} and {MAX_LONGITUDE}, got {longitude}"
        )));
    }
    Ok(())
}

/// Validate an optional pair: both present, or both absent.
pub fn validate_optional_coordinates(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<(), CoreError> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => validate_coordinates(lat, lon),
        (None, None) => Ok(()),
        _ => Err(CoreError::Validation(
            "latitude and longitude must be supplied together".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(13.0827, 80.2707).is_ok());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert!(validate_coordinates(90.5, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.1).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn optional_pair_must_be_complete() {
        assert!(validate_optional_coordinates(None, None).is_ok());
        assert!(validate_optional_coordinates(Some(1.0), Some(2.0)).is_ok());
        assert!(validate_optional_coordinates(Some(1.0), None).is_err());
    }
}
