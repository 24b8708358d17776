//! Travel-time estimation between locations.
//!
//! Distance is the great-circle distance on a spherical Earth
//! (haversine formula, mean radius). Travel time is distance divided by
//! a constant speed.
//!
//! # Reference
//! Sinnott (1984), "Virtues of the Haversine", Sky and Telescope 68(2)

use thiserror::Error;

use crate::models::Location;

/// Mean Earth radius in kilometers (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Failure to compute a distance or travel time.
///
/// Callers treat this as "not reachable", never as zero travel time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TravelError {
    /// Speed is not a finite positive number.
    #[error("travel velocity must be finite and positive, got {0}")]
    InvalidVelocity(f64),
    /// A coordinate is non-finite or outside its valid range.
    #[error("location '{location_id}' has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        location_id: String,
        latitude: f64,
        longitude: f64,
    },
    /// A location reference could not be resolved.
    #[error("unknown location '{0}'")]
    UnknownLocation(String),
}

/// Converts pairs of locations into travel durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimator {
    velocity_kmh: f64,
}

impl TravelEstimator {
    /// Creates an estimator for the given speed in km/h.
    pub fn new(velocity_kmh: f64) -> Result<Self, TravelError> {
        if !velocity_kmh.is_finite() || velocity_kmh <= 0.0 {
            return Err(TravelError::InvalidVelocity(velocity_kmh));
        }
        Ok(Self { velocity_kmh })
    }

    /// Travel time from `from` to `to` in minutes.
    pub fn travel_minutes(&self, from: &Location, to: &Location) -> Result<f64, TravelError> {
        let km = great_circle_km(from, to)?;
        Ok(km / self.velocity_kmh * 60.0)
    }
}

/// Great-circle distance between two locations in kilometers.
pub fn great_circle_km(from: &Location, to: &Location) -> Result<f64, TravelError> {
    check_coordinates(from)?;
    check_coordinates(to)?;

    let (lat1, lat2) = (from.latitude.to_radians(), to.latitude.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (to.longitude - from.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points.
    let central_angle = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    Ok(EARTH_RADIUS_KM * central_angle)
}

fn check_coordinates(location: &Location) -> Result<(), TravelError> {
    if location.has_valid_coordinates() {
        Ok(())
    } else {
        Err(TravelError::InvalidCoordinates {
            location_id: location.location_id.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let a = Location::new("a", 10.0, 20.0);
        assert!(great_circle_km(&a, &a).unwrap().abs() < 1e-9);

        let est = TravelEstimator::new(60.0).unwrap();
        assert!(est.travel_minutes(&a, &a).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // One degree of longitude on the equator.
        let a = Location::new("a", 0.0, 0.0);
        let b = Location::new("b", 0.0, 1.0);
        let km = great_circle_km(&a, &b).unwrap();
        assert!((km - 111.195).abs() < 0.01);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Location::new("a", 10.0, 20.0);
        let b = Location::new("b", 15.0, 25.0);
        let ab = great_circle_km(&a, &b).unwrap();
        let ba = great_circle_km(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-9);
        // ~777 km between the two points
        assert!(ab > 750.0 && ab < 790.0);
    }

    #[test]
    fn test_antipodal_points() {
        let a = Location::new("a", 0.0, 0.0);
        let b = Location::new("b", 0.0, 180.0);
        let km = great_circle_km(&a, &b).unwrap();
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_travel_minutes_scales_with_velocity() {
        let a = Location::new("a", 0.0, 0.0);
        let b = Location::new("b", 0.0, 1.0);
        let slow = TravelEstimator::new(60.0).unwrap();
        let fast = TravelEstimator::new(120.0).unwrap();

        let t_slow = slow.travel_minutes(&a, &b).unwrap();
        let t_fast = fast.travel_minutes(&a, &b).unwrap();
        // 111.195 km at 60 km/h
        assert!((t_slow - 111.195).abs() < 0.01);
        assert!((t_slow - 2.0 * t_fast).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_velocity() {
        assert_eq!(TravelEstimator::new(0.0), Err(TravelError::InvalidVelocity(0.0)));
        assert!(TravelEstimator::new(-5.0).is_err());
        assert!(TravelEstimator::new(f64::INFINITY).is_err());
        assert!(TravelEstimator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_coordinates_fail() {
        let est = TravelEstimator::new(60.0).unwrap();
        let good = Location::new("good", 10.0, 20.0);
        let bad = Location::new("bad", 95.0, 20.0);
        let err = est.travel_minutes(&good, &bad).unwrap_err();
        assert!(matches!(err, TravelError::InvalidCoordinates { ref location_id, .. } if location_id == "bad"));

        let nan = Location::new("nan", f64::NAN, 0.0);
        assert!(est.travel_minutes(&nan, &good).is_err());
    }
}
