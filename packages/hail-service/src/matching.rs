use serde_json::Value;

use hail_domain::{Candidate, GeoPoint, ranking};
use hail_storage::models::DocumentRecord;

use crate::{HailService, Result};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NearbyDriversRequest {
	pub origin: GeoPoint,
	/// Overrides the configured matching radius when set.
	pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NearbyDriver {
	pub driver_id: String,
	pub distance_km: f64,
	pub fields: Value,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct NearbyDriversResponse {
	pub drivers: Vec<NearbyDriver>,
}

impl HailService {
	/// Ranks available, verified drivers by great-circle distance from the
	/// rider's position, nearest first. Drivers without a usable stored
	/// position are skipped, never an error.
	pub async fn find_nearby_drivers(
		&self,
		req: NearbyDriversRequest,
	) -> Result<NearbyDriversResponse> {
		let radius_km = req.radius_km.unwrap_or(self.cfg.matching.radius_km);
		let records = self.store.list(self.cfg.store.drivers_collection.as_str()).await?;
		let candidates =
			records.into_iter().filter_map(candidate_from_record).collect::<Vec<_>>();
		let ranked = ranking::rank_nearby(req.origin, candidates, radius_km)?;
		let mut drivers = ranked
			.into_iter()
			.map(|ranked| NearbyDriver {
				driver_id: ranked.candidate.id,
				distance_km: ranked.distance_km,
				fields: ranked.candidate.payload,
			})
			.collect::<Vec<_>>();

		if let Some(max_results) = self.cfg.matching.max_results {
			drivers.truncate(max_results as usize);
		}

		Ok(NearbyDriversResponse { drivers })
	}
}

fn candidate_from_record(record: DocumentRecord) -> Option<Candidate> {
	let available = record.fields.get("is_available").and_then(Value::as_bool).unwrap_or(false);
	let verified = record.fields.get("is_verified").and_then(Value::as_bool).unwrap_or(false);

	if !available || !verified {
		return None;
	}

	let position = stored_position(&record);

	Some(Candidate { id: record.id, position, payload: record.fields })
}

fn stored_position(record: &DocumentRecord) -> Option<GeoPoint> {
	let location = record.fields.get("current_location")?;

	if location.is_null() {
		return None;
	}

	let latitude = location.get("latitude").and_then(Value::as_f64);
	let longitude = location.get("longitude").and_then(Value::as_f64);
	let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
		tracing::warn!(driver_id = %record.id, "Driver location is malformed; skipping.");

		return None;
	};

	match GeoPoint::new(latitude, longitude) {
		Ok(point) => Some(point),
		Err(err) => {
			tracing::warn!(driver_id = %record.id, %err, "Driver location is invalid; skipping.");

			None
		},
	}
}
