use time::OffsetDateTime;
use tokio::sync::watch;

use hail_domain::GeoPoint;

use crate::{BoxFuture, Result};

#[derive(Clone, Debug)]
pub struct LocationUpdate {
	pub driver_id: String,
	pub position: GeoPoint,
	pub recorded_at: OffsetDateTime,
}

/// The realtime key-value store carrying live driver positions. Subscribers
/// observe the latest published update per driver; `None` until the first
/// publish.
pub trait LocationFeed
where
	Self: Send + Sync,
{
	fn publish<'a>(&'a self, update: LocationUpdate) -> BoxFuture<'a, Result<()>>;

	fn subscribe<'a>(
		&'a self,
		driver_id: &'a str,
	) -> BoxFuture<'a, Result<watch::Receiver<Option<LocationUpdate>>>>;
}
