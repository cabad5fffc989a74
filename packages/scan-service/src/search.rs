mod matcher;
mod ranking;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub use ranking::MatchTier;

use crate::{Error, Result, ScanService};
use ranking::{Tolerances, TierWeights};
use scan_domain::{
	catalog::CatalogEntry,
	geo::{self, GeoPoint},
	prediction::{self, Prediction},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
	#[serde(default)]
	pub image_base64: String,
	/// Free-form location; anything unparsable is treated as absent.
	#[serde(default)]
	pub user_location: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
	pub predictions: Vec<Prediction>,
	pub results: Vec<RankedResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
	pub id: Uuid,
	pub name: String,
	pub price: f64,
	pub image: Option<String>,
	pub unit: Option<String>,
	pub shop: Option<ShopSummary>,
	pub relevance_score: f64,
	pub match_confidence: f64,
	pub matched_in: Option<MatchTier>,
	pub is_exact_match: bool,
	pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopSummary {
	pub id: Uuid,
	pub name: String,
	pub location: Option<GeoPoint>,
}

/// A catalog entry paired with the best prediction it matched.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
	pub product: CatalogEntry,
	pub relevance_score: f64,
	pub match_confidence: f64,
	pub matched_in: Option<MatchTier>,
	pub is_exact_match: bool,
	pub distance_km: Option<f64>,
}

impl ScanService {
	pub async fn match_image(&self, req: MatchRequest) -> Result<MatchResponse> {
		if req.image_base64.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "imageBase64 is required.".to_string() });
		}

		let user_location = req.user_location.as_ref().and_then(geo::parse_location);
		let raw = self.classify(req.image_base64.as_str()).await?;

		if raw.is_empty() {
			tracing::info!("Classifier returned no predictions.");

			return Ok(MatchResponse { predictions: Vec::new(), results: Vec::new() });
		}

		let predictions =
			prediction::select_top_k(raw, self.cfg.matching.top_predictions as usize);
		let terms = prediction::collect_search_terms(&predictions);
		let entries =
			matcher::collect_candidates(self.catalog.as_ref(), &terms, self.cfg.matching.max_results)
				.await?;

		if entries.is_empty() {
			tracing::info!(predictions = predictions.len(), "No catalog entries matched.");

			return Ok(MatchResponse { predictions, results: Vec::new() });
		}

		let weights = TierWeights::from_config(&self.cfg.ranking);
		let tolerances = Tolerances::from_config(&self.cfg.ranking);
		let candidates = entries
			.into_iter()
			.map(|entry| build_candidate(entry, &predictions, &weights, user_location.as_ref()))
			.collect::<Vec<_>>();
		let ranked = ranking::rank_candidates(candidates, &tolerances);

		tracing::info!(
			predictions = predictions.len(),
			results = ranked.len(),
			located = user_location.is_some(),
			"Image match completed."
		);

		Ok(MatchResponse { predictions, results: ranked.into_iter().map(to_result).collect() })
	}

	async fn classify(&self, image_base64: &str) -> Result<Vec<Prediction>> {
		let cfg = &self.cfg.providers.classifier;
		let call = self.providers.classifier.classify(cfg, image_base64);

		match tokio::time::timeout(Duration::from_millis(cfg.timeout_ms), call).await {
			Ok(result) => result,
			Err(_) => Err(Error::Timeout {
				message: format!("Classifier did not answer within {} ms.", cfg.timeout_ms),
			}),
		}
	}
}

fn build_candidate(
	product: CatalogEntry,
	predictions: &[Prediction],
	weights: &TierWeights,
	user_location: Option<&GeoPoint>,
) -> MatchCandidate {
	let best = ranking::best_match(&product, predictions, weights);

	match best.tier {
		Some(tier) => tracing::debug!(
			product_id = %product.id,
			tier = tier.as_str(),
			score = best.score,
			"Scored candidate."
		),
		None => {
			tracing::warn!(product_id = %product.id, "Retrieved product matches no prediction term.")
		},
	}

	let distance_km = geo::distance_km(user_location, product.shop_location());

	MatchCandidate {
		relevance_score: best.score,
		match_confidence: best.confidence,
		matched_in: best.tier,
		is_exact_match: best.is_exact(),
		distance_km,
		product,
	}
}

fn to_result(candidate: MatchCandidate) -> RankedResult {
	let MatchCandidate {
		product,
		relevance_score,
		match_confidence,
		matched_in,
		is_exact_match,
		distance_km,
	} = candidate;

	RankedResult {
		id: product.id,
		name: product.name,
		price: product.price,
		image: product.image,
		unit: product.unit,
		shop: product.shop.map(|shop| ShopSummary {
			id: shop.id,
			name: shop.name,
			location: shop.location,
		}),
		relevance_score: round_to(relevance_score, 4),
		match_confidence: round_to(match_confidence, 4),
		matched_in,
		is_exact_match,
		distance_km: distance_km.map(|distance| round_to(distance, 3)),
	}
}

fn round_to(value: f64, decimals: i32) -> f64 {
	let factor = 10_f64.powi(decimals);

	(value * factor).round() / factor
}
