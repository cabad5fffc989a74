use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};

use crate::{Error, Result};
use scan_domain::prediction::Prediction;

const VARIANT_KEYS: [&str; 2] = ["fr", "ar"];

pub async fn classify(
	cfg: &scan_config::ClassifierProviderConfig,
	image_base64: &str,
) -> Result<Vec<Prediction>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({ "image_base64": image_base64 });
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_classifier_response(json)
}

/// Accepts `{ "predictions": [...] }` or a bare array of guesses.
pub fn parse_classifier_response(json: Value) -> Result<Vec<Prediction>> {
	let items = match &json {
		Value::Array(items) => items,
		Value::Object(map) => map.get("predictions").and_then(Value::as_array).ok_or_else(|| {
			Error::InvalidResponse {
				message: "Classifier response is missing predictions array.".to_string(),
			}
		})?,
		_ => {
			return Err(Error::InvalidResponse {
				message: "Classifier response must be an object or an array.".to_string(),
			});
		},
	};
	let mut out = Vec::with_capacity(items.len());

	for item in items {
		let Some(entry) = item.as_object() else {
			return Err(Error::InvalidResponse {
				message: "Classifier prediction must be an object.".to_string(),
			});
		};

		out.push(parse_prediction(entry)?);
	}

	Ok(out)
}

fn parse_prediction(entry: &Map<String, Value>) -> Result<Prediction> {
	let label = entry
		.get("label")
		.or_else(|| entry.get("name"))
		.and_then(Value::as_str)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Classifier prediction missing label.".to_string(),
		})?;
	let confidence = entry
		.get("confidence")
		.or_else(|| entry.get("value"))
		.and_then(Value::as_f64)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Classifier prediction missing numeric confidence.".to_string(),
		})?;
	let mut variants = Vec::new();

	for key in VARIANT_KEYS {
		if let Some(text) = entry.get(key).and_then(Value::as_str) {
			variants.push(text.to_string());
		}
	}

	if let Some(extra) = entry.get("variants").and_then(Value::as_array) {
		variants.extend(extra.iter().filter_map(Value::as_str).map(str::to_string));
	}

	Ok(Prediction::new(label, confidence).with_variants(variants))
}
