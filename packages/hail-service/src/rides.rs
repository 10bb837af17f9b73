// crates.io
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

// self
use hail_domain::GeoPoint;

use crate::{Error, HailService, Result, now_rfc3339, require_id};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
	Pending,
	Accepted,
	InProgress,
	Completed,
	Cancelled,
}
impl RideStatus {
	/// `Completed` and `Cancelled` are terminal; everything else moves
	/// forward one step or cancels.
	pub fn allows_transition(self, next: Self) -> bool {
		matches!(
			(self, next),
			(Self::Pending, Self::Accepted)
				| (Self::Accepted, Self::InProgress)
				| (Self::InProgress, Self::Completed)
				| (Self::Pending | Self::Accepted | Self::InProgress, Self::Cancelled)
		)
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRideRequest {
	pub rider_id: String,
	pub pickup: GeoPoint,
	pub dropoff: GeoPoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestRideResponse {
	pub ride_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptRideRequest {
	pub ride_id: String,
	pub driver_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptRideResponse {
	pub ride_id: String,
	pub status: RideStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRideStatusRequest {
	pub ride_id: String,
	pub status: RideStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRideStatusResponse {
	pub ride_id: String,
	pub status: RideStatus,
}

impl HailService {
	pub async fn request_ride(&self, req: RequestRideRequest) -> Result<RequestRideResponse> {
		require_id("rider_id", &req.rider_id)?;
		req.pickup.validate()?;
		req.dropoff.validate()?;

		let ride_id = Uuid::new_v4().to_string();
		let fields = json!({
			"rider_id": req.rider_id,
			"pickup": req.pickup,
			"dropoff": req.dropoff,
			"status": RideStatus::Pending,
			"driver_id": null,
			"created_at": now_rfc3339()?,
		});

		self.store.set(&self.ride_doc(&ride_id), fields).await?;

		Ok(RequestRideResponse { ride_id })
	}

	pub async fn accept_ride(&self, req: AcceptRideRequest) -> Result<AcceptRideResponse> {
		require_id("ride_id", &req.ride_id)?;
		require_id("driver_id", &req.driver_id)?;

		let current = self.ride_status(&req.ride_id).await?;

		if !current.allows_transition(RideStatus::Accepted) {
			return Err(Error::Conflict {
				message: format!(
					"Ride {} cannot be accepted from status {current:?}.",
					req.ride_id
				),
			});
		}

		self.store
			.update(
				&self.ride_doc(&req.ride_id),
				json!({ "status": RideStatus::Accepted, "driver_id": req.driver_id }),
			)
			.await?;

		Ok(AcceptRideResponse { ride_id: req.ride_id, status: RideStatus::Accepted })
	}

	pub async fn update_ride_status(
		&self,
		req: UpdateRideStatusRequest,
	) -> Result<UpdateRideStatusResponse> {
		require_id("ride_id", &req.ride_id)?;

		let current = self.ride_status(&req.ride_id).await?;

		if !current.allows_transition(req.status) {
			return Err(Error::Conflict {
				message: format!(
					"Ride {} cannot move from {current:?} to {:?}.",
					req.ride_id, req.status
				),
			});
		}

		let mut fields = json!({ "status": req.status });

		if req.status == RideStatus::Completed {
			fields["completed_at"] = Value::String(now_rfc3339()?);
		}

		self.store.update(&self.ride_doc(&req.ride_id), fields).await?;

		Ok(UpdateRideStatusResponse { ride_id: req.ride_id, status: req.status })
	}

	async fn ride_status(&self, ride_id: &str) -> Result<RideStatus> {
		let doc = self.ride_doc(ride_id);
		let snapshot = self.store.get(&doc).await?;

		if !snapshot.exists {
			return Err(Error::NotFound { message: format!("Ride {ride_id} does not exist.") });
		}

		let status = snapshot
			.fields
			.as_ref()
			.and_then(|fields| fields.get("status"))
			.cloned()
			.unwrap_or(Value::Null);

		serde_json::from_value(status).map_err(|err| Error::Internal {
			message: format!("Ride {ride_id} carries a malformed status: {err}."),
		})
	}
}
