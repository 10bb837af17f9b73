use std::{
	collections::{HashMap, VecDeque},
	sync::{
		Mutex,
		atomic::{AtomicBool, AtomicUsize, Ordering},
	},
};

use serde_json::Value;
use tokio::sync::watch;

use hail_storage::{
	BoxFuture, Error, Result,
	docs::DocumentStore,
	models::{DocumentRecord, DocumentRef, Snapshot, SnapshotMetadata},
	realtime::{LocationFeed, LocationUpdate},
};

#[derive(Clone, Copy, Debug)]
pub enum FailureKind {
	Unavailable,
	FailedPrecondition,
	PermissionDenied,
	Backend,
}
impl FailureKind {
	fn into_error(self) -> Error {
		match self {
			Self::Unavailable => Error::Unavailable("Scripted outage.".to_string()),
			Self::FailedPrecondition =>
				Error::FailedPrecondition("Scripted precondition failure.".to_string()),
			Self::PermissionDenied => Error::PermissionDenied("Scripted denial.".to_string()),
			Self::Backend => Error::Backend("Scripted backend failure.".to_string()),
		}
	}
}

/// One scripted outcome for a network read. Reads issued while the network
/// flag is off bypass the script and answer from the cache map.
#[derive(Clone, Copy, Debug)]
pub enum ReadScript {
	/// Serve the server copy (live read, `from_cache = false`).
	Serve,
	/// Serve the cached copy (`from_cache = true`).
	ServeCached { pending_writes: bool },
	/// Report the document as nonexistent.
	Missing,
	Fail(FailureKind),
}

/// In-memory `DocumentStore` with a scripted outcome queue for network
/// reads, a cache layer served while the network flag is off, and counters
/// the resilient-fetch tests assert on. Writes apply to both layers;
/// offline write buffering is not modeled.
pub struct ScriptedStore {
	server: Mutex<HashMap<DocumentRef, Value>>,
	cache: Mutex<HashMap<DocumentRef, Value>>,
	script: Mutex<VecDeque<ReadScript>>,
	network_enabled: AtomicBool,
	reads: AtomicUsize,
	enables: AtomicUsize,
	disables: AtomicUsize,
}
impl ScriptedStore {
	pub fn new() -> Self {
		Self {
			server: Mutex::new(HashMap::new()),
			cache: Mutex::new(HashMap::new()),
			script: Mutex::new(VecDeque::new()),
			network_enabled: AtomicBool::new(true),
			reads: AtomicUsize::new(0),
			enables: AtomicUsize::new(0),
			disables: AtomicUsize::new(0),
		}
	}

	pub fn insert_server(&self, collection: &str, id: &str, fields: Value) {
		self.server
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.insert(DocumentRef::new(collection, id), fields);
	}

	pub fn insert_cache(&self, collection: &str, id: &str, fields: Value) {
		self.cache
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.insert(DocumentRef::new(collection, id), fields);
	}

	pub fn push_script(&self, steps: impl IntoIterator<Item = ReadScript>) {
		self.script.lock().unwrap_or_else(|err| err.into_inner()).extend(steps);
	}

	pub fn server_fields(&self, collection: &str, id: &str) -> Option<Value> {
		self.server
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.get(&DocumentRef::new(collection, id))
			.cloned()
	}

	pub fn reads(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	pub fn enables(&self) -> usize {
		self.enables.load(Ordering::SeqCst)
	}

	pub fn disables(&self) -> usize {
		self.disables.load(Ordering::SeqCst)
	}

	pub fn network_enabled(&self) -> bool {
		self.network_enabled.load(Ordering::SeqCst)
	}

	fn server_snapshot(&self, doc: &DocumentRef) -> Snapshot {
		match self.server.lock().unwrap_or_else(|err| err.into_inner()).get(doc) {
			Some(fields) => Snapshot {
				exists: true,
				fields: Some(fields.clone()),
				metadata: SnapshotMetadata { from_cache: false, has_pending_writes: false },
			},
			None => Snapshot::missing(),
		}
	}

	fn cached_snapshot(&self, doc: &DocumentRef, has_pending_writes: bool) -> Snapshot {
		match self.cache.lock().unwrap_or_else(|err| err.into_inner()).get(doc) {
			Some(fields) => Snapshot {
				exists: true,
				fields: Some(fields.clone()),
				metadata: SnapshotMetadata { from_cache: true, has_pending_writes },
			},
			None => Snapshot::missing(),
		}
	}
}
impl Default for ScriptedStore {
	fn default() -> Self {
		Self::new()
	}
}
impl DocumentStore for ScriptedStore {
	fn get<'a>(&'a self, doc: &'a DocumentRef) -> BoxFuture<'a, Result<Snapshot>> {
		Box::pin(async move {
			self.reads.fetch_add(1, Ordering::SeqCst);

			if !self.network_enabled.load(Ordering::SeqCst) {
				return Ok(self.cached_snapshot(doc, false));
			}

			let step = self.script.lock().unwrap_or_else(|err| err.into_inner()).pop_front();

			match step {
				None | Some(ReadScript::Serve) => Ok(self.server_snapshot(doc)),
				Some(ReadScript::ServeCached { pending_writes }) =>
					Ok(self.cached_snapshot(doc, pending_writes)),
				Some(ReadScript::Missing) => Ok(Snapshot::missing()),
				Some(ReadScript::Fail(kind)) => Err(kind.into_error()),
			}
		})
	}

	fn set<'a>(&'a self, doc: &'a DocumentRef, fields: Value) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.server
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.insert(doc.clone(), fields.clone());
			self.cache.lock().unwrap_or_else(|err| err.into_inner()).insert(doc.clone(), fields);

			Ok(())
		})
	}

	fn update<'a>(&'a self, doc: &'a DocumentRef, fields: Value) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			let merged = {
				let server = self.server.lock().unwrap_or_else(|err| err.into_inner());
				let Some(existing) = server.get(doc) else {
					return Err(Error::NotFound(doc.to_string()));
				};

				merge_fields(existing.clone(), fields)
			};

			self.server
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.insert(doc.clone(), merged.clone());
			self.cache.lock().unwrap_or_else(|err| err.into_inner()).insert(doc.clone(), merged);

			Ok(())
		})
	}

	fn list<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<DocumentRecord>>> {
		Box::pin(async move {
			if !self.network_enabled.load(Ordering::SeqCst) {
				return Err(Error::Unavailable("Network disabled.".to_string()));
			}

			let mut records = self
				.server
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.iter()
				.filter(|(doc, _)| doc.collection == collection)
				.map(|(doc, fields)| DocumentRecord { id: doc.id.clone(), fields: fields.clone() })
				.collect::<Vec<_>>();

			records.sort_by(|left, right| left.id.cmp(&right.id));

			Ok(records)
		})
	}

	fn enable_network<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.enables.fetch_add(1, Ordering::SeqCst);
			self.network_enabled.store(true, Ordering::SeqCst);

			Ok(())
		})
	}

	fn disable_network<'a>(&'a self) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.disables.fetch_add(1, Ordering::SeqCst);
			self.network_enabled.store(false, Ordering::SeqCst);

			Ok(())
		})
	}
}

fn merge_fields(existing: Value, incoming: Value) -> Value {
	match (existing, incoming) {
		(Value::Object(mut base), Value::Object(patch)) => {
			for (key, value) in patch {
				base.insert(key, value);
			}

			Value::Object(base)
		},
		(_, replacement) => replacement,
	}
}

/// Watch-channel location feed: subscribers observe the latest update per
/// driver.
pub struct InMemoryFeed {
	channels: Mutex<HashMap<String, watch::Sender<Option<LocationUpdate>>>>,
}
impl InMemoryFeed {
	pub fn new() -> Self {
		Self { channels: Mutex::new(HashMap::new()) }
	}
}
impl Default for InMemoryFeed {
	fn default() -> Self {
		Self::new()
	}
}
impl LocationFeed for InMemoryFeed {
	fn publish<'a>(&'a self, update: LocationUpdate) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			self.channels
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.entry(update.driver_id.clone())
				.or_insert_with(|| watch::channel(None).0)
				.send_replace(Some(update));

			Ok(())
		})
	}

	fn subscribe<'a>(
		&'a self,
		driver_id: &'a str,
	) -> BoxFuture<'a, Result<watch::Receiver<Option<LocationUpdate>>>> {
		Box::pin(async move {
			let receiver = self
				.channels
				.lock()
				.unwrap_or_else(|err| err.into_inner())
				.entry(driver_id.to_string())
				.or_insert_with(|| watch::channel(None).0)
				.subscribe();

			Ok(receiver)
		})
	}
}
