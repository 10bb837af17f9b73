// crates.io
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use tokio_util::sync::CancellationToken;

// self
use hail_domain::GeoPoint;
use hail_storage::realtime::LocationUpdate;

use crate::{Error, HailService, Result, format_rfc3339, now_rfc3339, require_id};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
	Car,
	Bike,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverDocuments {
	pub driver_license_url: String,
	pub insurance_url: String,
	pub vehicle_registration_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDriverRequest {
	pub driver_id: String,
	pub full_name: String,
	pub phone_number: String,
	pub vehicle_type: VehicleType,
	pub vehicle_model: String,
	pub license_plate: String,
	/// Blob-storage URLs; uploading is the caller's concern.
	pub documents: DriverDocuments,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDriverResponse {
	pub driver_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfileRequest {
	pub driver_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredLocation {
	pub latitude: f64,
	pub longitude: f64,
	pub recorded_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfile {
	pub full_name: String,
	pub phone_number: String,
	pub vehicle_type: VehicleType,
	pub vehicle_model: String,
	pub license_plate: String,
	pub is_verified: bool,
	pub is_available: bool,
	pub rating: f64,
	pub total_rides: u64,
	#[serde(default)]
	pub current_location: Option<StoredLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfileResponse {
	pub driver_id: String,
	pub profile: DriverProfile,
	/// True when the profile came from local cache and may be stale.
	pub from_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAvailabilityRequest {
	pub driver_id: String,
	pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAvailabilityResponse {
	pub driver_id: String,
	pub is_available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLocationRequest {
	pub driver_id: String,
	pub position: GeoPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLocationResponse {
	pub driver_id: String,
}

impl HailService {
	pub async fn register_driver(
		&self,
		req: RegisterDriverRequest,
	) -> Result<RegisterDriverResponse> {
		require_id("driver_id", &req.driver_id)?;

		for (label, url) in [
			("driver_license_url", &req.documents.driver_license_url),
			("insurance_url", &req.documents.insurance_url),
			("vehicle_registration_url", &req.documents.vehicle_registration_url),
		] {
			if url.trim().is_empty() {
				return Err(Error::InvalidRequest {
					message: format!("Missing required document: {label}."),
				});
			}
		}

		let now = now_rfc3339()?;
		let fields = json!({
			"full_name": req.full_name,
			"phone_number": req.phone_number,
			"vehicle_type": req.vehicle_type,
			"vehicle_model": req.vehicle_model,
			"license_plate": req.license_plate,
			"documents": {
				"driver_license": req.documents.driver_license_url,
				"insurance": req.documents.insurance_url,
				"vehicle_registration": req.documents.vehicle_registration_url,
			},
			"is_verified": false,
			"is_available": false,
			"rating": 0.0,
			"total_rides": 0,
			"created_at": now,
			"current_location": null,
		});

		self.store.set(&self.driver_doc(&req.driver_id), fields).await?;
		// The user record now points at the new driver profile.
		self.store
			.update(
				&self.user_doc(&req.driver_id),
				json!({ "user_type": "driver", "driver_id": req.driver_id }),
			)
			.await?;

		Ok(RegisterDriverResponse { driver_id: req.driver_id })
	}

	/// Fetches a driver profile through the resilient read path; stale
	/// cache-sourced data is surfaced via `from_cache`, not an error.
	pub async fn get_driver_profile(
		&self,
		req: DriverProfileRequest,
		cancel: &CancellationToken,
	) -> Result<DriverProfileResponse> {
		require_id("driver_id", &req.driver_id)?;

		let doc = self.driver_doc(&req.driver_id);
		let fetched = self.reader.fetch_with_retry(&doc, &self.fetch_options(), cancel).await?;

		if fetched.from_cache {
			tracing::warn!(driver_id = %req.driver_id, "Serving cached driver profile.");
		}

		let profile: DriverProfile = serde_json::from_value(fetched.fields).map_err(|err| {
			Error::Internal { message: format!("Driver document {doc} is malformed: {err}.") }
		})?;

		Ok(DriverProfileResponse {
			driver_id: req.driver_id,
			profile,
			from_cache: fetched.from_cache,
		})
	}

	pub async fn set_availability(
		&self,
		req: SetAvailabilityRequest,
	) -> Result<SetAvailabilityResponse> {
		require_id("driver_id", &req.driver_id)?;

		self.store
			.update(
				&self.driver_doc(&req.driver_id),
				json!({ "is_available": req.is_available, "last_updated": now_rfc3339()? }),
			)
			.await?;

		Ok(SetAvailabilityResponse { driver_id: req.driver_id, is_available: req.is_available })
	}

	/// Persists the driver's position and publishes it on the realtime
	/// feed.
	pub async fn update_location(
		&self,
		req: UpdateLocationRequest,
	) -> Result<UpdateLocationResponse> {
		require_id("driver_id", &req.driver_id)?;
		req.position.validate()?;

		let recorded_at = OffsetDateTime::now_utc();
		let stamp = format_rfc3339(recorded_at)?;

		self.store
			.update(
				&self.driver_doc(&req.driver_id),
				json!({
					"current_location": {
						"latitude": req.position.latitude,
						"longitude": req.position.longitude,
						"recorded_at": stamp,
					},
				}),
			)
			.await?;
		self.feed
			.publish(LocationUpdate {
				driver_id: req.driver_id.clone(),
				position: req.position,
				recorded_at,
			})
			.await?;

		Ok(UpdateLocationResponse { driver_id: req.driver_id })
	}
}
