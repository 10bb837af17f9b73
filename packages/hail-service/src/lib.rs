pub mod drivers;
pub mod matching;
pub mod riders;
pub mod rides;

mod error;

pub use error::{Error, Result};

use std::sync::Arc;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use hail_config::Config;
use hail_storage::{
	docs::DocumentStore,
	models::{DocumentRef, FetchOptions},
	realtime::LocationFeed,
	resilient::ResilientReader,
};

pub struct HailService {
	pub cfg: Config,
	pub store: Arc<dyn DocumentStore>,
	pub feed: Arc<dyn LocationFeed>,
	pub reader: ResilientReader,
}
impl HailService {
	pub fn new(cfg: Config, store: Arc<dyn DocumentStore>, feed: Arc<dyn LocationFeed>) -> Self {
		let reader = ResilientReader::new(Arc::clone(&store));

		Self { cfg, store, feed, reader }
	}

	pub(crate) fn fetch_options(&self) -> FetchOptions {
		FetchOptions::from(&self.cfg.fetch)
	}

	pub(crate) fn user_doc(&self, user_id: &str) -> DocumentRef {
		DocumentRef::new(self.cfg.store.users_collection.as_str(), user_id)
	}

	pub(crate) fn driver_doc(&self, driver_id: &str) -> DocumentRef {
		DocumentRef::new(self.cfg.store.drivers_collection.as_str(), driver_id)
	}

	pub(crate) fn ride_doc(&self, ride_id: &str) -> DocumentRef {
		DocumentRef::new(self.cfg.store.rides_collection.as_str(), ride_id)
	}
}

pub(crate) fn format_rfc3339(timestamp: OffsetDateTime) -> Result<String> {
	timestamp
		.format(&Rfc3339)
		.map_err(|err| Error::Internal { message: format!("Failed to format timestamp: {err}.") })
}

pub(crate) fn now_rfc3339() -> Result<String> {
	format_rfc3339(OffsetDateTime::now_utc())
}

pub(crate) fn require_id(label: &str, value: &str) -> Result<()> {
	if value.trim().is_empty() {
		return Err(Error::InvalidRequest { message: format!("{label} must be non-empty.") });
	}

	Ok(())
}
