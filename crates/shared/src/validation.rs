//! Common validation utilities for request payloads.

use chrono::{DateTime, Utc};
use validator::ValidationError;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that a price/rate is positive.
pub fn validate_price(price: f64) -> Result<(), ValidationError> {
    if price > 0.0 && price.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be a positive amount".into());
        Err(err)
    }
}

/// Validates a reservation window: end must be strictly after start.
pub fn validate_time_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if end > start {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_window");
        err.message = Some("End time must be after start time".into());
        Err(err)
    }
}

/// Validates a search radius in meters.
pub fn validate_radius_meters(radius: f64) -> Result<(), ValidationError> {
    if (1.0..=50_000.0).contains(&radius) {
        Ok(())
    } else {
        let mut err = ValidationError::new("radius_range");
        err.message = Some("Radius must be between 1 and 50000 meters".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_latitude() {
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(90.1).is_err());
        assert!(validate_latitude(-90.1).is_err());
    }

    #[test]
    fn test_validate_longitude() {
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(180.5).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(2.50).is_ok());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_time_window() {
        let start = Utc::now();
        assert!(validate_time_window(start, start + Duration::hours(1)).is_ok());
        assert!(validate_time_window(start, start).is_err());
        assert!(validate_time_window(start, start - Duration::minutes(5)).is_err());
    }

    #[test]
    fn test_validate_radius() {
        assert!(validate_radius_meters(1000.0).is_ok());
        assert!(validate_radius_meters(0.5).is_err());
        assert!(validate_radius_meters(100_000.0).is_err());
    }
}
