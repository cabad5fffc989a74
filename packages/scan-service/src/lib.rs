pub mod search;

mod error;

use std::{future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

pub use error::{Error, Result};
pub use search::{
	MatchCandidate, MatchRequest, MatchResponse, MatchTier, RankedResult, ShopSummary,
};

use scan_config::{ClassifierProviderConfig, Config};
use scan_domain::{
	catalog::{CatalogEntry, TextField},
	prediction::Prediction,
};
use scan_providers::classifier;
use scan_storage::{db::Db, queries};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// External image classifier. Returns raw guesses; ordering and truncation happen downstream.
pub trait ClassifierProvider
where
	Self: Send + Sync,
{
	fn classify<'a>(
		&'a self,
		cfg: &'a ClassifierProviderConfig,
		image_base64: &'a str,
	) -> BoxFuture<'a, Result<Vec<Prediction>>>;
}

/// One "contains" query against a single catalog field.
#[derive(Debug, Clone, Copy)]
pub struct CatalogQuery<'a> {
	pub field: TextField,
	pub terms: &'a [String],
	pub excluded_ids: &'a [Uuid],
	pub limit: u32,
}

/// Read-only, text-searchable product store.
pub trait CatalogStore
where
	Self: Send + Sync,
{
	fn find_containing<'a>(
		&'a self,
		query: CatalogQuery<'a>,
	) -> BoxFuture<'a, Result<Vec<CatalogEntry>>>;
}

#[derive(Clone)]
pub struct Providers {
	pub classifier: Arc<dyn ClassifierProvider>,
}

pub struct ScanService {
	pub cfg: Config,
	pub catalog: Arc<dyn CatalogStore>,
	pub providers: Providers,
}

struct DefaultProviders;

impl ClassifierProvider for DefaultProviders {
	fn classify<'a>(
		&'a self,
		cfg: &'a ClassifierProviderConfig,
		image_base64: &'a str,
	) -> BoxFuture<'a, Result<Vec<Prediction>>> {
		Box::pin(async move { Ok(classifier::classify(cfg, image_base64).await?) })
	}
}

impl CatalogStore for Db {
	fn find_containing<'a>(
		&'a self,
		query: CatalogQuery<'a>,
	) -> BoxFuture<'a, Result<Vec<CatalogEntry>>> {
		Box::pin(async move {
			let entries = queries::find_products_containing(
				self,
				query.field,
				query.terms,
				query.excluded_ids,
				query.limit,
			)
			.await?;

			Ok(entries)
		})
	}
}

impl Providers {
	pub fn new(classifier: Arc<dyn ClassifierProvider>) -> Self {
		Self { classifier }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { classifier: Arc::new(DefaultProviders) }
	}
}

impl ScanService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, catalog: Arc::new(db), providers: Providers::default() }
	}

	pub fn with_parts(cfg: Config, catalog: Arc<dyn CatalogStore>, providers: Providers) -> Self {
		Self { cfg, catalog, providers }
	}
}
