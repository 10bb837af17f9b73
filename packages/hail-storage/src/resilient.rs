use std::{sync::Arc, time::Duration};

use tokio::{
	sync::Mutex,
	time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::{
	Error, Result,
	docs::DocumentStore,
	models::{DocumentRef, FetchOptions, FetchedDocument, Snapshot},
};

/// Fetches single documents from a store whose availability is uncertain:
/// a best-effort cached read first, then a bounded retry loop against the
/// network, then a forced-cache fallback.
///
/// Calls on one reader are serialized through an internal mutex. The
/// fallback toggles the store-wide network flag, so two interleaved calls
/// could otherwise suspend each other's reads or race disable against
/// re-enable.
pub struct ResilientReader {
	store: Arc<dyn DocumentStore>,
	fetch_lock: Mutex<()>,
}
impl ResilientReader {
	pub fn new(store: Arc<dyn DocumentStore>) -> Self {
		Self { store, fetch_lock: Mutex::new(()) }
	}

	/// Resolves `doc` to a materialized document or fails with
	/// `Error::NotFound` (document confirmed absent, never retried), the
	/// last retryable error once attempts are exhausted, or the first
	/// non-retryable error encountered.
	///
	/// `cancel` is honored before every network read and during every
	/// retry delay.
	pub async fn fetch_with_retry(
		&self,
		doc: &DocumentRef,
		options: &FetchOptions,
		cancel: &CancellationToken,
	) -> Result<FetchedDocument> {
		let _serialized = self.fetch_lock.lock().await;

		// Best-effort cache probe; a failure here must never fail the fetch.
		if options.allow_cached {
			match self.store.get(doc).await {
				Ok(snapshot) if snapshot.exists && !snapshot.metadata.has_pending_writes =>
					return materialize(doc, snapshot),
				Ok(_) => {},
				Err(err) => {
					tracing::warn!(doc = %doc, %err, "Cache-first read failed.");
				},
			}
		}

		let deadline =
			options.overall_deadline_ms.map(|ms| Instant::now() + Duration::from_millis(ms));
		let mut last_error = None;

		for attempt in 0..options.max_retries {
			if cancel.is_cancelled() {
				return Err(Error::Cancelled);
			}
			if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
				tracing::debug!(doc = %doc, attempt, "Fetch deadline reached.");

				break;
			}

			if let Err(err) = self.store.enable_network().await {
				tracing::warn!(doc = %doc, %err, "Failed to enable network before read.");
			}

			match self.store.get(doc).await {
				Ok(snapshot) if snapshot.exists => return materialize(doc, snapshot),
				// Retrying cannot make a nonexistent document appear.
				Ok(_) => return Err(Error::NotFound(doc.to_string())),
				Err(err) if err.is_retryable() => {
					tracing::debug!(doc = %doc, attempt, %err, "Retryable read failure.");

					last_error = Some(err);

					tokio::select! {
						() = cancel.cancelled() => return Err(Error::Cancelled),
						() = time::sleep(Duration::from_millis(options.retry_delay_ms)) => {},
					}
				},
				Err(err) => return Err(err),
			}
		}

		if options.allow_cached {
			match self.read_cache_only(doc, cancel).await {
				Ok(Some(fetched)) => return Ok(fetched),
				Ok(None) => {},
				Err(err) => {
					tracing::warn!(doc = %doc, %err, "Forced-cache fallback failed.");
				},
			}
		}

		Err(last_error.unwrap_or_else(|| Error::Backend(format!("Failed to fetch {doc}."))))
	}

	/// Disables the network so the store must answer from local cache, and
	/// re-enables it on every exit path before returning. `Ok(None)` means
	/// the cache holds no such document.
	async fn read_cache_only(
		&self,
		doc: &DocumentRef,
		cancel: &CancellationToken,
	) -> Result<Option<FetchedDocument>> {
		if cancel.is_cancelled() {
			return Err(Error::Cancelled);
		}

		let outcome = match self.store.disable_network().await {
			Ok(()) => self.store.get(doc).await,
			Err(err) => Err(err),
		};

		if let Err(err) = self.store.enable_network().await {
			tracing::warn!(doc = %doc, %err, "Failed to re-enable network after cache read.");
		}

		match outcome {
			Ok(snapshot) if snapshot.exists => materialize(doc, snapshot).map(Some),
			Ok(_) => Ok(None),
			Err(err) => Err(err),
		}
	}
}

fn materialize(doc: &DocumentRef, snapshot: Snapshot) -> Result<FetchedDocument> {
	let Some(fields) = snapshot.fields else {
		return Err(Error::Backend(format!("Snapshot for {doc} exists but carries no fields.")));
	};

	Ok(FetchedDocument { id: doc.id.clone(), fields, from_cache: snapshot.metadata.from_cache })
}
