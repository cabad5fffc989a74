mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	ClassifierProviderConfig, Config, Matching, Postgres, Providers, Ranking, Security, Service,
	Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.max_body_bytes == 0 {
		return Err(Error::Validation {
			message: "service.max_body_bytes must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.classifier.api_base.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.classifier.api_base must be non-empty.".to_string(),
		});
	}
	if cfg.providers.classifier.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.classifier.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.top_predictions == 0 {
		return Err(Error::Validation {
			message: "matching.top_predictions must be greater than zero.".to_string(),
		});
	}
	if cfg.matching.max_results == 0 {
		return Err(Error::Validation {
			message: "matching.max_results must be greater than zero.".to_string(),
		});
	}

	let ranking = &cfg.ranking;

	for (label, value) in [
		("ranking.weight_name", ranking.weight_name),
		("ranking.weight_category", ranking.weight_category),
		("ranking.weight_description", ranking.weight_description),
		("ranking.exact_match_bonus", ranking.exact_match_bonus),
		("ranking.price_tolerance", ranking.price_tolerance),
		("ranking.distance_tolerance_km", ranking.distance_tolerance_km),
	] {
		if !value.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		if value < 0.0 {
			return Err(Error::Validation { message: format!("{label} must be zero or greater.") });
		}
	}

	if ranking.exact_match_bonus < 1.0 {
		return Err(Error::Validation {
			message: "ranking.exact_match_bonus must be 1.0 or greater.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.providers
		.classifier
		.api_key
		.as_deref()
		.map(|key| key.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.providers.classifier.api_key = None;
	}

	let trimmed = cfg.providers.classifier.api_base.trim_end_matches('/').to_string();

	cfg.providers.classifier.api_base = trimmed;
}
