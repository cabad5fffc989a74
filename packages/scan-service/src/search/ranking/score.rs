use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use scan_config::Ranking;
use scan_domain::{catalog::CatalogEntry, prediction::Prediction, text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
	NameExact,
	Name,
	Category,
	Description,
}
impl MatchTier {
	pub fn priority(self) -> u8 {
		match self {
			Self::NameExact => 4,
			Self::Name => 3,
			Self::Category => 2,
			Self::Description => 1,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::NameExact => "name_exact",
			Self::Name => "name",
			Self::Category => "category",
			Self::Description => "description",
		}
	}
}

pub fn tier_priority(tier: Option<MatchTier>) -> u8 {
	tier.map(MatchTier::priority).unwrap_or(0)
}

#[derive(Debug, Clone, Copy)]
pub struct TierWeights {
	pub name: f64,
	pub category: f64,
	pub description: f64,
	pub exact_bonus: f64,
}
impl TierWeights {
	pub fn from_config(cfg: &Ranking) -> Self {
		Self {
			name: cfg.weight_name,
			category: cfg.weight_category,
			description: cfg.weight_description,
			exact_bonus: cfg.exact_match_bonus,
		}
	}

	pub fn weight(&self, tier: MatchTier) -> f64 {
		match tier {
			MatchTier::NameExact => self.name * self.exact_bonus,
			MatchTier::Name => self.name,
			MatchTier::Category => self.category,
			MatchTier::Description => self.description,
		}
	}
}

/// Best (tier, score) pair found for one product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMatch {
	pub tier: Option<MatchTier>,
	pub score: f64,
	pub confidence: f64,
}
impl ScoredMatch {
	pub fn unmatched() -> Self {
		Self { tier: None, score: 0.0, confidence: 0.0 }
	}

	pub fn is_exact(&self) -> bool {
		self.tier == Some(MatchTier::NameExact)
	}

	/// Higher score wins, then higher tier; on a full tie the earlier pair is kept.
	fn better(self, other: Self) -> Self {
		let ord = other
			.score
			.total_cmp(&self.score)
			.then_with(|| tier_priority(other.tier).cmp(&tier_priority(self.tier)));

		if ord == Ordering::Greater { other } else { self }
	}
}

struct NormalizedFields {
	name: String,
	category: String,
	description: String,
}
impl NormalizedFields {
	fn new(product: &CatalogEntry) -> Self {
		Self {
			name: text::normalize(&product.name),
			category: text::normalize(&product.category),
			description: text::normalize(&product.description),
		}
	}

	/// First matching tier for `term`; a name hit is never re-checked against weaker fields.
	fn classify(&self, term: &str) -> Option<MatchTier> {
		if term.is_empty() {
			return None;
		}
		if self.name == term {
			return Some(MatchTier::NameExact);
		}
		if self.name.contains(term) {
			return Some(MatchTier::Name);
		}
		if self.category.contains(term) {
			return Some(MatchTier::Category);
		}
		if self.description.contains(term) {
			return Some(MatchTier::Description);
		}

		None
	}
}

/// Folds every (prediction, term) pair into the single best-scoring match for `product`.
pub fn best_match(
	product: &CatalogEntry,
	predictions: &[Prediction],
	weights: &TierWeights,
) -> ScoredMatch {
	let fields = NormalizedFields::new(product);

	predictions
		.iter()
		.flat_map(|prediction| {
			prediction.search_terms().into_iter().map(move |term| (prediction, term))
		})
		.filter_map(|(prediction, term)| {
			let tier = fields.classify(&term)?;

			Some(ScoredMatch {
				tier: Some(tier),
				score: prediction.confidence * weights.weight(tier),
				confidence: prediction.confidence,
			})
		})
		.fold(ScoredMatch::unmatched(), ScoredMatch::better)
}
