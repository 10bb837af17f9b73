use serde_json::Value;

use crate::{
	BoxFuture, Result,
	models::{DocumentRecord, DocumentRef, Snapshot},
};

/// The hosted document database, as seen by this crate: a remote
/// key-document store with a local cache layered under normal reads and
/// process-wide network controls. Reads fail with `Error::Unavailable` or
/// `Error::FailedPrecondition` when the store is offline.
pub trait DocumentStore
where
	Self: Send + Sync,
{
	fn get<'a>(&'a self, doc: &'a DocumentRef) -> BoxFuture<'a, Result<Snapshot>>;

	fn set<'a>(&'a self, doc: &'a DocumentRef, fields: Value) -> BoxFuture<'a, Result<()>>;

	fn update<'a>(&'a self, doc: &'a DocumentRef, fields: Value) -> BoxFuture<'a, Result<()>>;

	fn list<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<Vec<DocumentRecord>>>;

	/// Idempotent; the flag is shared by every handle on the same store.
	fn enable_network<'a>(&'a self) -> BoxFuture<'a, Result<()>>;

	/// Idempotent. While disabled, reads are answered from local cache.
	fn disable_network<'a>(&'a self) -> BoxFuture<'a, Result<()>>;
}
