use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use scan_config::ClassifierProviderConfig;

#[test]
fn builds_bearer_auth_header() {
	let headers =
		scan_providers::auth_headers(Some("secret"), &Map::new()).expect("Failed to build headers.");
	let value = headers.get(AUTHORIZATION).expect("Missing authorization header.");

	assert_eq!(value, "Bearer secret");
}

#[test]
fn omits_auth_header_without_key() {
	let headers = scan_providers::auth_headers(None, &Map::new()).expect("Failed to build headers.");

	assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn rejects_non_string_default_headers() {
	let mut default_headers = Map::new();

	default_headers.insert("x-retries".to_string(), Value::from(3));

	let err = scan_providers::auth_headers(None, &default_headers)
		.expect_err("Expected invalid header config.");

	assert!(matches!(err, scan_providers::Error::InvalidConfig { .. }));
}

#[tokio::test]
async fn unreachable_classifier_is_an_error() {
	let cfg = ClassifierProviderConfig {
		api_base: "http://127.0.0.1:1".to_string(),
		path: "/api/marchify/predict/".to_string(),
		api_key: None,
		timeout_ms: 1_000,
		default_headers: Map::new(),
	};
	let result = scan_providers::classifier::classify(&cfg, "aGVsbG8=").await;

	assert!(matches!(result, Err(scan_providers::Error::Reqwest(_))));
}
