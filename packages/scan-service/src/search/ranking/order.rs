use std::cmp::Ordering;

use super::score::tier_priority;
use crate::search::MatchCandidate;
use scan_config::Ranking;

/// Width of the bands inside which prices and distances count as equal.
#[derive(Debug, Clone, Copy)]
pub struct Tolerances {
	pub price: f64,
	pub distance_km: f64,
}
impl Tolerances {
	pub fn from_config(cfg: &Ranking) -> Self {
		Self { price: cfg.price_tolerance, distance_km: cfg.distance_tolerance_km }
	}
}

type Criterion = fn(&MatchCandidate, &MatchCandidate, &Tolerances) -> Ordering;

/// Evaluated left to right; the first non-equal result decides.
const CRITERIA: [Criterion; 6] =
	[by_exact_match, by_tier, by_price, by_distance, by_relevance, by_product_id];

pub fn compare_candidates(
	left: &MatchCandidate,
	right: &MatchCandidate,
	tolerances: &Tolerances,
) -> Ordering {
	CRITERIA
		.iter()
		.map(|criterion| criterion(left, right, tolerances))
		.find(|ord| ord.is_ne())
		.unwrap_or(Ordering::Equal)
}

pub fn rank_candidates(
	mut candidates: Vec<MatchCandidate>,
	tolerances: &Tolerances,
) -> Vec<MatchCandidate> {
	candidates.sort_by(|left, right| compare_candidates(left, right, tolerances));

	candidates
}

fn by_exact_match(left: &MatchCandidate, right: &MatchCandidate, _: &Tolerances) -> Ordering {
	right.is_exact_match.cmp(&left.is_exact_match)
}

fn by_tier(left: &MatchCandidate, right: &MatchCandidate, _: &Tolerances) -> Ordering {
	tier_priority(right.matched_in).cmp(&tier_priority(left.matched_in))
}

fn by_price(left: &MatchCandidate, right: &MatchCandidate, tolerances: &Tolerances) -> Ordering {
	band(left.product.price, tolerances.price)
		.total_cmp(&band(right.product.price, tolerances.price))
}

fn by_distance(left: &MatchCandidate, right: &MatchCandidate, tolerances: &Tolerances) -> Ordering {
	match (left.distance_km, right.distance_km) {
		(Some(lhs), Some(rhs)) =>
			band(lhs, tolerances.distance_km).total_cmp(&band(rhs, tolerances.distance_km)),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}

fn by_relevance(left: &MatchCandidate, right: &MatchCandidate, _: &Tolerances) -> Ordering {
	right.relevance_score.total_cmp(&left.relevance_score)
}

fn by_product_id(left: &MatchCandidate, right: &MatchCandidate, _: &Tolerances) -> Ordering {
	left.product.id.cmp(&right.product.id)
}

/// Snaps `value` to a multiple of `width` so equality inside a band stays transitive.
///
/// Bands are fixed on a grid: two values closer than `width` still compare unequal when they sit
/// on opposite sides of a band edge (2.004 and 2.006 land in bands 200 and 201 at width 0.01).
fn band(value: f64, width: f64) -> f64 {
	if width > 0.0 { (value / width).round() } else { value }
}

#[cfg(test)]
mod tests {
	use uuid::Uuid;

	use super::*;
	use crate::search::MatchTier;
	use scan_domain::catalog::CatalogEntry;

	fn candidate(
		ordinal: u128,
		tier: MatchTier,
		price: f64,
		distance_km: Option<f64>,
		score: f64,
	) -> MatchCandidate {
		MatchCandidate {
			product: CatalogEntry {
				id: Uuid::from_u128(ordinal),
				name: format!("product-{ordinal}"),
				category: String::new(),
				description: String::new(),
				price,
				image: None,
				unit: None,
				shop: None,
			},
			relevance_score: score,
			match_confidence: 0.5,
			matched_in: Some(tier),
			is_exact_match: tier == MatchTier::NameExact,
			distance_km,
		}
	}

	fn tolerances() -> Tolerances {
		Tolerances::from_config(&Ranking::default())
	}

	#[test]
	fn exact_match_beats_cheaper_and_closer() {
		let exact = candidate(1, MatchTier::NameExact, 50.0, Some(900.0), 1.0);
		let plain = candidate(2, MatchTier::Name, 1.0, Some(0.1), 9.0);

		assert_eq!(compare_candidates(&exact, &plain, &tolerances()), Ordering::Less);
	}

	#[test]
	fn higher_tier_beats_lower_price() {
		let category = candidate(1, MatchTier::Category, 10.0, None, 1.0);
		let description = candidate(2, MatchTier::Description, 0.5, Some(1.0), 0.3);

		assert_eq!(compare_candidates(&category, &description, &tolerances()), Ordering::Less);
	}

	#[test]
	fn prices_within_band_fall_through_to_distance() {
		let far = candidate(1, MatchTier::Name, 2.001, Some(10.0), 9.0);
		let near = candidate(2, MatchTier::Name, 2.003, Some(2.0), 9.0);

		assert_eq!(compare_candidates(&near, &far, &tolerances()), Ordering::Less);
	}

	#[test]
	fn distances_within_band_fall_through_to_relevance() {
		let strong = candidate(1, MatchTier::Name, 2.0, Some(3.003), 9.0);
		let weak = candidate(2, MatchTier::Name, 2.0, Some(3.001), 4.0);

		assert_eq!(by_distance(&strong, &weak, &tolerances()), Ordering::Equal);
		assert_eq!(compare_candidates(&strong, &weak, &tolerances()), Ordering::Less);
	}

	#[test]
	fn distances_in_different_bands_order_by_distance() {
		let near = candidate(2, MatchTier::Name, 2.0, Some(3.001), 4.0);
		let far = candidate(1, MatchTier::Name, 2.0, Some(3.02), 9.0);

		assert_eq!(compare_candidates(&near, &far, &tolerances()), Ordering::Less);
	}

	#[test]
	fn prices_straddling_a_band_edge_still_order_by_price() {
		let cheaper_far = candidate(1, MatchTier::Name, 2.004, Some(500.0), 1.0);
		let pricier_near = candidate(2, MatchTier::Name, 2.006, Some(1.0), 9.0);
		let same_band = candidate(3, MatchTier::Name, 2.0, Some(1.0), 9.0);

		assert_eq!(compare_candidates(&cheaper_far, &pricier_near, &tolerances()), Ordering::Less);
		assert_eq!(by_price(&cheaper_far, &same_band, &tolerances()), Ordering::Equal);
	}

	#[test]
	fn undefined_distance_sorts_last() {
		let located = candidate(2, MatchTier::Name, 2.0, Some(4_000.0), 1.0);
		let unknown = candidate(1, MatchTier::Name, 2.0, None, 9.0);

		assert_eq!(compare_candidates(&located, &unknown, &tolerances()), Ordering::Less);
	}

	#[test]
	fn relevance_then_id_break_remaining_ties() {
		let strong = candidate(2, MatchTier::Name, 2.0, None, 9.0);
		let weak = candidate(1, MatchTier::Name, 2.0, None, 4.0);
		let twin = candidate(3, MatchTier::Name, 2.0, None, 9.0);

		assert_eq!(compare_candidates(&strong, &weak, &tolerances()), Ordering::Less);
		assert_eq!(compare_candidates(&strong, &twin, &tolerances()), Ordering::Less);
		assert_eq!(compare_candidates(&strong, &strong, &tolerances()), Ordering::Equal);
	}

	#[test]
	fn ranking_is_independent_of_input_order() {
		let candidates = vec![
			candidate(1, MatchTier::Description, 1.0, Some(1.0), 0.3),
			candidate(2, MatchTier::Name, 3.5, Some(5.0), 9.0),
			candidate(3, MatchTier::Name, 2.0, None, 9.0),
			candidate(4, MatchTier::NameExact, 8.0, None, 45.0),
			candidate(5, MatchTier::Category, 0.5, Some(0.5), 0.9),
		];
		let mut reversed = candidates.clone();

		reversed.reverse();

		let forward = rank_candidates(candidates, &tolerances())
			.into_iter()
			.map(|c| c.product.id)
			.collect::<Vec<_>>();
		let backward = rank_candidates(reversed, &tolerances())
			.into_iter()
			.map(|c| c.product.id)
			.collect::<Vec<_>>();

		assert_eq!(forward, backward);
		assert_eq!(
			forward,
			vec![
				Uuid::from_u128(4),
				Uuid::from_u128(3),
				Uuid::from_u128(2),
				Uuid::from_u128(5),
				Uuid::from_u128(1),
			]
		);
	}
}
