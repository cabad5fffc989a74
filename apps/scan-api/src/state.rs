use std::sync::Arc;

use scan_service::ScanService;
use scan_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ScanService>,
	pub max_body_bytes: usize,
}
impl AppState {
	pub async fn new(config: scan_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(ScanService::new(config, db)))
	}

	/// Wraps an already assembled service, e.g. one built with in-memory collaborators.
	pub fn from_service(service: ScanService) -> Self {
		let max_body_bytes = service.cfg.service.max_body_bytes;

		Self { service: Arc::new(service), max_body_bytes }
	}
}
