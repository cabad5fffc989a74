use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::text;

/// One classifier guess: the label, its localized variants, and a confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
	pub label: String,
	pub confidence: f64,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub variants: Vec<String>,
}
impl Prediction {
	pub fn new(label: impl Into<String>, confidence: f64) -> Self {
		Self { label: label.into(), confidence: clamp_confidence(confidence), variants: Vec::new() }
	}

	pub fn with_variants<I, S>(mut self, variants: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.variants = variants.into_iter().map(Into::into).collect();

		self
	}

	/// Normalized, de-duplicated search terms: the label first, then each variant.
	pub fn search_terms(&self) -> Vec<String> {
		let mut out = Vec::new();
		let mut seen = HashSet::new();

		for raw in std::iter::once(&self.label).chain(self.variants.iter()) {
			let term = text::normalize(raw);

			if term.is_empty() {
				continue;
			}
			if seen.insert(term.clone()) {
				out.push(term);
			}
		}

		out
	}
}

/// Maps any confidence into `[0, 1]`. NaN and negative zero become `+0.0`.
pub fn clamp_confidence(confidence: f64) -> f64 {
	if confidence.is_nan() || confidence <= 0.0 {
		return 0.0;
	}

	confidence.min(1.0)
}

/// Keeps the `k` most confident predictions. Equal confidences keep their input order.
pub fn select_top_k(mut predictions: Vec<Prediction>, k: usize) -> Vec<Prediction> {
	predictions.sort_by(|left, right| right.confidence.total_cmp(&left.confidence));
	predictions.truncate(k);

	predictions
}

/// Union of every prediction's search terms, in prediction order.
pub fn collect_search_terms(predictions: &[Prediction]) -> Vec<String> {
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for prediction in predictions {
		for term in prediction.search_terms() {
			if seen.insert(term.clone()) {
				out.push(term);
			}
		}
	}

	out
}
