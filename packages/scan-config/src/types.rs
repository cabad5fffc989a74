use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub matching: Matching,
	#[serde(default)]
	pub ranking: Ranking,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
	/// Upper bound for request bodies; encoded images dominate the payload.
	#[serde(default = "default_max_body_bytes")]
	pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub classifier: ClassifierProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ClassifierProviderConfig {
	pub api_base: String,
	pub path: String,
	/// Optional. Sent as a bearer token when present.
	#[serde(default)]
	pub api_key: Option<String>,
	#[serde(default = "default_classifier_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Matching {
	/// Predictions kept after the confidence sort.
	pub top_predictions: u32,
	/// Cap on candidates collected across all catalog passes.
	pub max_results: u32,
}
impl Default for Matching {
	fn default() -> Self {
		Self { top_predictions: 5, max_results: 20 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	pub weight_name: f64,
	pub weight_category: f64,
	pub weight_description: f64,
	pub exact_match_bonus: f64,
	pub price_tolerance: f64,
	pub distance_tolerance_km: f64,
}
impl Default for Ranking {
	fn default() -> Self {
		Self {
			weight_name: 10.0,
			weight_category: 1.0,
			weight_description: 0.3,
			exact_match_bonus: 5.0,
			price_tolerance: 0.01,
			distance_tolerance_km: 0.01,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
}

fn default_max_body_bytes() -> usize {
	10 * 1_024 * 1_024
}

fn default_classifier_timeout_ms() -> u64 {
	60_000
}
