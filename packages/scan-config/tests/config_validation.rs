use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use scan_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.expect("Template config must include the requested section.");

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn sample_toml_without(section: &str) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");

	root.as_table_mut().expect("Template config must be a table.").remove(section);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("scan_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> scan_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = scan_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation_message(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error kind: {err:?}");
	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Sample config must load.");

	assert_eq!(cfg.matching.top_predictions, 5);
	assert_eq!(cfg.matching.max_results, 20);
	assert_eq!(cfg.providers.classifier.timeout_ms, 60_000);
	assert_eq!(cfg.providers.classifier.api_base, "http://127.0.0.1:8000");
	assert!(cfg.providers.classifier.api_key.is_none());
	assert_eq!(cfg.service.max_body_bytes, 10 * 1_024 * 1_024);
}

#[test]
fn matching_and_ranking_sections_default_when_absent() {
	let payload = sample_toml_without("matching");
	let mut root: Value = toml::from_str(&payload).expect("Failed to parse config.");

	root.as_table_mut().expect("Config must be a table.").remove("ranking");

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Config without matching and ranking must load.");

	assert_eq!(cfg.matching.top_predictions, 5);
	assert_eq!(cfg.matching.max_results, 20);
	assert_eq!(cfg.ranking.weight_name, 10.0);
	assert_eq!(cfg.ranking.weight_category, 1.0);
	assert_eq!(cfg.ranking.weight_description, 0.3);
	assert_eq!(cfg.ranking.exact_match_bonus, 5.0);
	assert_eq!(cfg.ranking.price_tolerance, 0.01);
	assert_eq!(cfg.ranking.distance_tolerance_km, 0.01);
}

#[test]
fn top_predictions_must_be_positive() {
	expect_validation_message(
		sample_toml_with("matching", "top_predictions", Value::Integer(0)),
		"matching.top_predictions must be greater than zero.",
	);
}

#[test]
fn max_results_must_be_positive() {
	expect_validation_message(
		sample_toml_with("matching", "max_results", Value::Integer(0)),
		"matching.max_results must be greater than zero.",
	);
}

#[test]
fn negative_weights_are_rejected() {
	expect_validation_message(
		sample_toml_with("ranking", "weight_description", Value::Float(-0.3)),
		"ranking.weight_description must be zero or greater.",
	);
}

#[test]
fn non_finite_weights_are_rejected() {
	expect_validation_message(
		sample_toml_with("ranking", "weight_name", Value::Float(f64::INFINITY)),
		"ranking.weight_name must be a finite number.",
	);
}

#[test]
fn exact_match_bonus_cannot_shrink_scores() {
	expect_validation_message(
		sample_toml_with("ranking", "exact_match_bonus", Value::Float(0.5)),
		"ranking.exact_match_bonus must be 1.0 or greater.",
	);
}

#[test]
fn classifier_timeout_must_be_positive() {
	expect_validation_message(
		sample_toml_with("providers", "classifier", {
			let mut root: Value = toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML)
				.expect("Failed to parse template config.");
			let classifier = root
				.get_mut("providers")
				.and_then(|providers| providers.get_mut("classifier"))
				.and_then(Value::as_table_mut)
				.expect("Template config must include [providers.classifier].");

			classifier.insert("timeout_ms".to_string(), Value::Integer(0));

			Value::Table(classifier.clone())
		}),
		"providers.classifier.timeout_ms must be greater than zero.",
	);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("scan_config_test_missing_file.toml");
	let err = scan_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error kind: {err:?}");
	assert!(err.to_string().starts_with("Failed to read scan service config at"));
}

#[test]
fn malformed_toml_reports_parse_error() {
	let err = load_payload("[service\nhttp_bind = 1".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error kind: {err:?}");
	assert!(err.to_string().starts_with("Failed to parse scan service config at"));
}
