#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid coordinate: latitude {latitude}, longitude {longitude}.")]
	InvalidCoordinate { latitude: f64, longitude: f64 },
	#[error("Invalid radius: {radius_km} km.")]
	InvalidRadius { radius_km: f64 },
}
