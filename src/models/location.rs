// Location model representing geographic coordinates

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::utils::distance::haversine_km;

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    /// Creates a new location with the given coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to another location in kilometres
    pub fn distance_to(&self, other: &Location) -> f64 {
        haversine_km(self, other)
    }

    /// Checks that both coordinates are finite and inside the WGS84 ranges.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(InputError::NonFiniteCoordinate {
                lat: self.lat,
                lng: self.lng,
            });
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(InputError::LatitudeOutOfRange(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(InputError::LongitudeOutOfRange(self.lng));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let loc = Location::new(52.37, 4.89);
        assert_eq!(loc.distance_to(&loc), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let amsterdam = Location::new(52.3676, 4.9041);
        let utrecht = Location::new(52.0907, 5.1214);

        let there = amsterdam.distance_to(&utrecht);
        let back = utrecht.distance_to(&amsterdam);
        assert!((there - back).abs() < 1e-9);
        // roughly 34 km as the crow flies
        assert!(there > 30.0 && there < 40.0);
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(Location::new(90.0, 180.0).validate().is_ok());
        assert!(Location::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert_eq!(
            Location::new(91.0, 0.0).validate(),
            Err(InputError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Location::new(0.0, -180.5).validate(),
            Err(InputError::LongitudeOutOfRange(-180.5))
        );
        assert!(matches!(
            Location::new(f64::NAN, 0.0).validate(),
            Err(InputError::NonFiniteCoordinate { .. })
        ));
    }
}
