use std::sync::Arc;

use vault_service::VaultService;
use vault_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<VaultService>,
}
impl AppState {
	pub async fn new(config: vault_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(VaultService::with_postgres(config, db)))
	}

	pub fn from_service(service: VaultService) -> Self {
		Self { service: Arc::new(service) }
	}
}
