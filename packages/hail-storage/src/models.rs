use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct DocumentRef {
	pub collection: String,
	pub id: String,
}
impl DocumentRef {
	pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
		Self { collection: collection.into(), id: id.into() }
	}
}
impl std::fmt::Display for DocumentRef {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}/{}", self.collection, self.id)
	}
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct SnapshotMetadata {
	pub from_cache: bool,
	pub has_pending_writes: bool,
}

/// The store's answer to a single-document read. A snapshot for a missing
/// document has `exists: false` and no fields.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Snapshot {
	pub exists: bool,
	pub fields: Option<Value>,
	pub metadata: SnapshotMetadata,
}
impl Snapshot {
	pub fn missing() -> Self {
		Self { exists: false, fields: None, metadata: SnapshotMetadata::default() }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DocumentRecord {
	pub id: String,
	pub fields: Value,
}

/// A materialized document with read provenance: `from_cache` is true when
/// the store answered from its local cache rather than a live read.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FetchedDocument {
	pub id: String,
	pub fields: Value,
	pub from_cache: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FetchOptions {
	pub max_retries: u32,
	pub retry_delay_ms: u64,
	pub allow_cached: bool,
	pub overall_deadline_ms: Option<u64>,
}
impl Default for FetchOptions {
	fn default() -> Self {
		Self { max_retries: 3, retry_delay_ms: 1_000, allow_cached: true, overall_deadline_ms: None }
	}
}
impl From<&hail_config::Fetch> for FetchOptions {
	fn from(cfg: &hail_config::Fetch) -> Self {
		Self {
			max_retries: cfg.max_retries,
			retry_delay_ms: cfg.retry_delay_ms,
			allow_cached: cfg.allow_cached,
			overall_deadline_ms: cfg.overall_deadline_ms,
		}
	}
}
