use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A position in floating-point degrees. Valid latitudes lie in [-90, 90],
/// valid longitudes in [-180, 180].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GeoPoint {
	pub latitude: f64,
	pub longitude: f64,
}
impl GeoPoint {
	pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
		let point = Self { latitude, longitude };

		point.validate()?;

		Ok(point)
	}

	pub fn validate(&self) -> Result<()> {
		let in_range = self.latitude.is_finite()
			&& self.longitude.is_finite()
			&& (-90.0..=90.0).contains(&self.latitude)
			&& (-180.0..=180.0).contains(&self.longitude);

		if !in_range {
			return Err(Error::InvalidCoordinate {
				latitude: self.latitude,
				longitude: self.longitude,
			});
		}

		Ok(())
	}
}

/// Great-circle distance between two points in kilometers, via the
/// Haversine formula.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
	let lat_a = a.latitude.to_radians();
	let lat_b = b.latitude.to_radians();
	let d_lat = (b.latitude - a.latitude).to_radians();
	let d_lon = (b.longitude - a.longitude).to_radians();
	let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

	2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distance_to_self_is_zero() {
		let point = GeoPoint { latitude: 12.5, longitude: -33.25 };

		assert_eq!(distance_km(point, point), 0.0);
	}

	#[test]
	fn distance_is_symmetric() {
		let a = GeoPoint { latitude: 48.8566, longitude: 2.3522 };
		let b = GeoPoint { latitude: 51.5074, longitude: -0.1278 };

		assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
	}

	#[test]
	fn one_degree_of_longitude_at_the_equator() {
		let origin = GeoPoint { latitude: 0.0, longitude: 0.0 };
		let east = GeoPoint { latitude: 0.0, longitude: 1.0 };

		assert!((distance_km(origin, east) - 111.194_926_644_558_74).abs() < 1e-6);
	}

	#[test]
	fn antipodal_points_are_half_the_circumference() {
		let a = GeoPoint { latitude: 0.0, longitude: 0.0 };
		let b = GeoPoint { latitude: 0.0, longitude: 180.0 };
		let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;

		assert!((distance_km(a, b) - half_circumference).abs() < 1e-6);
	}

	#[test]
	fn rejects_out_of_range_coordinates() {
		assert!(GeoPoint::new(90.001, 0.0).is_err());
		assert!(GeoPoint::new(-90.001, 0.0).is_err());
		assert!(GeoPoint::new(0.0, 180.001).is_err());
		assert!(GeoPoint::new(0.0, -180.001).is_err());
		assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
		assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
	}

	#[test]
	fn accepts_boundary_coordinates() {
		assert!(GeoPoint::new(90.0, 180.0).is_ok());
		assert!(GeoPoint::new(-90.0, -180.0).is_ok());
	}
}
