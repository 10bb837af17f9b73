use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub store: Store,
	pub fetch: Fetch,
	pub matching: Matching,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Store {
	pub users_collection: String,
	pub drivers_collection: String,
	pub rides_collection: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fetch {
	#[serde(default = "default_max_retries")]
	pub max_retries: u32,
	#[serde(default = "default_retry_delay_ms")]
	pub retry_delay_ms: u64,
	#[serde(default = "default_allow_cached")]
	pub allow_cached: bool,
	pub overall_deadline_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Matching {
	pub radius_km: f64,
	pub max_results: Option<u32>,
}

fn default_max_retries() -> u32 {
	3
}

fn default_retry_delay_ms() -> u64 {
	1_000
}

fn default_allow_cached() -> bool {
	true
}
