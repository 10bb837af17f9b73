// crates.io
use serde_json::json;

// self
use crate::{Error, HailService, Result, now_rfc3339, require_id};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateRiderRequest {
	pub rider_id: String,
	pub full_name: String,
	pub phone_number: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateRiderResponse {
	pub rider_id: String,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateRiderRequest {
	pub rider_id: String,
	pub full_name: Option<String>,
	pub phone_number: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateRiderResponse {
	pub rider_id: String,
}

impl HailService {
	pub async fn create_rider_profile(
		&self,
		req: CreateRiderRequest,
	) -> Result<CreateRiderResponse> {
		require_id("rider_id", &req.rider_id)?;

		let now = now_rfc3339()?;
		let fields = json!({
			"full_name": req.full_name,
			"phone_number": req.phone_number,
			"user_type": "rider",
			"created_at": now,
			"last_login": now,
		});

		self.store.set(&self.user_doc(&req.rider_id), fields).await?;

		Ok(CreateRiderResponse { rider_id: req.rider_id })
	}

	pub async fn update_rider_profile(
		&self,
		req: UpdateRiderRequest,
	) -> Result<UpdateRiderResponse> {
		require_id("rider_id", &req.rider_id)?;

		let mut patch = serde_json::Map::new();

		if let Some(full_name) = req.full_name {
			patch.insert("full_name".to_string(), full_name.into());
		}
		if let Some(phone_number) = req.phone_number {
			patch.insert("phone_number".to_string(), phone_number.into());
		}
		if patch.is_empty() {
			return Err(Error::InvalidRequest { message: "No fields to update.".to_string() });
		}

		patch.insert("updated_at".to_string(), now_rfc3339()?.into());

		self.store.update(&self.user_doc(&req.rider_id), patch.into()).await?;

		Ok(UpdateRiderResponse { rider_id: req.rider_id })
	}
}
