use serde_json::Value;

use crate::{Error, GeoPoint, Result, geo};

/// One entity under consideration for a nearby match. The payload is
/// carried through ranking unchanged.
#[derive(Clone, Debug)]
pub struct Candidate {
	pub id: String,
	pub position: Option<GeoPoint>,
	pub payload: Value,
}

#[derive(Clone, Debug)]
pub struct Ranked {
	pub candidate: Candidate,
	pub distance_km: f64,
}

/// Ranks `candidates` by great-circle distance from `origin`, keeping only
/// those within `radius_km` (boundary inclusive). Candidates without a
/// position are skipped. The sort is stable: equal distances preserve
/// input order.
pub fn rank_nearby(
	origin: GeoPoint,
	candidates: Vec<Candidate>,
	radius_km: f64,
) -> Result<Vec<Ranked>> {
	origin.validate()?;

	if !radius_km.is_finite() || radius_km <= 0.0 {
		return Err(Error::InvalidRadius { radius_km });
	}

	let mut ranked = candidates
		.into_iter()
		.filter_map(|candidate| {
			let position = candidate.position?;
			let distance_km = geo::distance_km(origin, position);

			(distance_km <= radius_km).then_some(Ranked { candidate, distance_km })
		})
		.collect::<Vec<_>>();

	ranked.sort_by(|left, right| left.distance_km.total_cmp(&right.distance_km));

	Ok(ranked)
}
