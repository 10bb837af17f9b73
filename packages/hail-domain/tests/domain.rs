use serde_json::json;

use hail_domain::{Candidate, Error, GeoPoint, geo, ranking::rank_nearby};

fn origin() -> GeoPoint {
	GeoPoint { latitude: 0.0, longitude: 0.0 }
}

fn candidate(id: &str, position: Option<GeoPoint>) -> Candidate {
	Candidate { id: id.to_string(), position, payload: json!({ "id": id }) }
}

fn at(latitude: f64, longitude: f64) -> Option<GeoPoint> {
	Some(GeoPoint { latitude, longitude })
}

#[test]
fn empty_candidates_rank_to_empty() {
	let ranked = rank_nearby(origin(), Vec::new(), 10.0).expect("Ranking must succeed.");

	assert!(ranked.is_empty());
}

#[test]
fn output_is_sorted_ascending_by_distance() {
	let candidates = vec![
		candidate("far", at(0.0, 1.5)),
		candidate("near", at(0.0, 0.1)),
		candidate("mid", at(0.0, 0.7)),
	];
	let ranked = rank_nearby(origin(), candidates, 200.0).expect("Ranking must succeed.");
	let ids = ranked.iter().map(|r| r.candidate.id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, ["near", "mid", "far"]);
	assert!(ranked.windows(2).all(|pair| pair[0].distance_km <= pair[1].distance_km));
}

#[test]
fn equal_distances_preserve_input_order() {
	// One degree east and one degree north are equidistant from (0, 0).
	let candidates = vec![
		candidate("east", at(0.0, 1.0)),
		candidate("north", at(1.0, 0.0)),
		candidate("west", at(0.0, -1.0)),
	];
	let ranked = rank_nearby(origin(), candidates, 200.0).expect("Ranking must succeed.");
	let ids = ranked.iter().map(|r| r.candidate.id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, ["east", "north", "west"]);
}

#[test]
fn known_distances_at_the_equator() {
	let candidates = vec![candidate("east", at(0.0, 1.0)), candidate("north", at(1.0, 0.0))];
	let ranked =
		rank_nearby(origin(), candidates.clone(), 200.0).expect("Ranking must succeed.");

	assert_eq!(ranked.len(), 2);

	for entry in &ranked {
		assert!((entry.distance_km - 111.194_926_644_558_74).abs() < 1e-6);
	}

	let excluded = rank_nearby(origin(), candidates, 50.0).expect("Ranking must succeed.");

	assert!(excluded.is_empty());
}

#[test]
fn boundary_distance_is_included() {
	let east = GeoPoint { latitude: 0.0, longitude: 1.0 };
	let radius_km = geo::distance_km(origin(), east);
	let ranked = rank_nearby(origin(), vec![candidate("edge", Some(east))], radius_km)
		.expect("Ranking must succeed.");

	assert_eq!(ranked.len(), 1);
	assert_eq!(ranked[0].candidate.id, "edge");
}

#[test]
fn beyond_radius_is_excluded() {
	let ranked = rank_nearby(origin(), vec![candidate("far", at(0.0, 5.0))], 100.0)
		.expect("Ranking must succeed.");

	assert!(ranked.is_empty());
}

#[test]
fn positionless_candidates_are_skipped() {
	let candidates = vec![candidate("ghost", None), candidate("near", at(0.0, 0.1))];
	let ranked = rank_nearby(origin(), candidates, 20_100.0).expect("Ranking must succeed.");
	let ids = ranked.iter().map(|r| r.candidate.id.as_str()).collect::<Vec<_>>();

	assert_eq!(ids, ["near"]);
}

#[test]
fn payload_is_carried_through_unchanged() {
	let payload = json!({ "vehicle_type": "bike", "rating": 4.8 });
	let candidates = vec![Candidate {
		id: "d1".to_string(),
		position: at(0.0, 0.2),
		payload: payload.clone(),
	}];
	let ranked = rank_nearby(origin(), candidates, 100.0).expect("Ranking must succeed.");

	assert_eq!(ranked[0].candidate.payload, payload);
}

#[test]
fn invalid_origin_is_rejected() {
	let bad = GeoPoint { latitude: 91.0, longitude: 0.0 };
	let err = rank_nearby(bad, Vec::new(), 10.0).expect_err("Invalid origin must be rejected.");

	assert!(matches!(err, Error::InvalidCoordinate { .. }));
}

#[test]
fn invalid_radius_is_rejected() {
	for radius_km in [0.0, -1.0, f64::NAN, f64::INFINITY] {
		let err = rank_nearby(origin(), Vec::new(), radius_km)
			.expect_err("Invalid radius must be rejected.");

		assert!(matches!(err, Error::InvalidRadius { .. }));
	}
}
